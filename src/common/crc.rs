// src/common/crc.rs

use crc::{Algorithm, Crc};

/// CRC-4 of the MS5607 PROM (Measurement Specialties AN520), expressed as a
/// 16-bit CRC whose top nibble is the CRC-4.
///
/// AN520 XORs each PROM byte into the low end of a 16-bit remainder, then
/// shifts it eight times with the feedback term `0x3000`. A non-reflected
/// CRC-16 XORs into the top end instead, so it runs one byte ahead: the
/// AN520 remainder over 16 bytes equals this CRC over the first 15. The
/// trailing (zeroed) byte is therefore never fed.
/// Polynomial: 0x3000
/// Initial Value: 0x0000
/// Input Reflected: false
/// Output Reflected: false
/// Final XOR: 0x0000
/// Check Value: 0xE000 (for "123456789")
pub const MS5607_PROM_CRC: Algorithm<u16> = Algorithm {
    width: 16,
    poly: 0x3000,
    init: 0x0000,
    refin: false,
    refout: false,
    xorout: 0x0000,
    check: 0xE000,
    residue: 0x0000,
};

const CRC_COMPUTER: Crc<u16> = Crc::<u16>::new(&MS5607_PROM_CRC);

/// Number of 16-bit words in the MS5607 PROM.
pub const PROM_WORDS: usize = 8;

/// Calculates the CRC-4 of an MS5607 calibration table.
///
/// Words 0..=6 are fed big-endian, then only the high byte of word 7; its
/// low byte holds the stored CRC.
pub fn calculate_prom_crc4(prom: &[u16; PROM_WORDS]) -> u8 {
    let mut digest = CRC_COMPUTER.digest();
    for word in &prom[..PROM_WORDS - 1] {
        digest.update(&word.to_be_bytes());
    }
    digest.update(&[(prom[PROM_WORDS - 1] >> 8) as u8]);
    ((digest.finalize() >> 12) & 0x0F) as u8
}

/// CRC-4 stored in the low nibble of the last PROM word.
#[inline]
pub fn stored_prom_crc4(prom: &[u16; PROM_WORDS]) -> u8 {
    (prom[PROM_WORDS - 1] & 0x0F) as u8
}

/// Checks the table against its stored CRC-4, returning
/// `Err((stored, computed))` on mismatch.
pub fn verify_prom_crc4(prom: &[u16; PROM_WORDS]) -> Result<(), (u8, u8)> {
    let stored = stored_prom_crc4(prom);
    let computed = calculate_prom_crc4(prom);
    if stored == computed {
        Ok(())
    } else {
        Err((stored, computed))
    }
}
