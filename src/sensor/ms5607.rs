// src/sensor/ms5607.rs

//! MS5607-02BA03 barometric pressure sensor.
//!
//! The factory calibration table (PROM) is read once and checked against
//! its CRC-4 before the driver is handed out, so a [`Ms5607`] always holds a
//! trusted table. Each measurement runs a pressure (D1) and a temperature
//! (D2) conversion at OSR 4096 and applies the first-order compensation of
//! the datasheet. The second-order low-temperature correction is not applied.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::debug;

use super::{command_read, wait, write, SensorError};
use crate::common::crc::{verify_prom_crc4, PROM_WORDS};
use crate::common::timing;

/// Address with CSB pulled high, as on the HAT.
pub const DEFAULT_ADDRESS: u8 = 0x77;

const CMD_CONVERT_D1_OSR_4096: u8 = 0x48;
const CMD_CONVERT_D2_OSR_4096: u8 = 0x58;
const CMD_READ_ADC: u8 = 0x00;
const CMD_READ_PROM: u8 = 0xA0;

/// A compensated sample.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PressureReading {
    /// Pressure in mbar (hPa).
    pub pressure_mbar: f64,
    /// Temperature in °C.
    pub temperature_c: f64,
}

/// First-order compensation of raw D1 (pressure) and D2 (temperature)
/// conversions with calibration words `prom[1..=6]`.
///
/// The arithmetic mirrors the reference code: intermediate terms are formed
/// in double precision and truncated to 32-bit `dT` and 64-bit `OFF`/`SENS`.
pub fn compensate(prom: &[u16; PROM_WORDS], d1: u32, d2: u32) -> PressureReading {
    const P2_6: f64 = 64.0;
    const P2_7: f64 = 128.0;
    const P2_8: f64 = 256.0;
    const P2_15: f64 = 32_768.0;
    const P2_16: f64 = 65_536.0;
    const P2_17: f64 = 131_072.0;
    const P2_21: f64 = 2_097_152.0;
    const P2_23: f64 = 8_388_608.0;

    let c = |i: usize| f64::from(prom[i]);

    let dt = (f64::from(d2) - c(5) * P2_8) as i32;
    let temp = (2000.0 + f64::from(dt) * c(6) / P2_23) / 100.0;

    let off = (c(2) * P2_17 + f64::from(dt) * c(4) / P2_6) as i64;
    let sens = (c(1) * P2_16 + f64::from(dt) * c(3) / P2_7) as i64;
    let pressure = ((i64::from(d1) * sens) as f64 / P2_21 - off as f64) / P2_15 / 100.0;

    PressureReading { pressure_mbar: pressure, temperature_c: temp }
}

/// MS5607 on an I2C bus.
#[derive(Debug)]
pub struct Ms5607<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    prom: [u16; PROM_WORDS],
}

impl<I2C, D> Ms5607<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Reads and validates the calibration table.
    pub fn new(mut i2c: I2C, delay: D, address: u8) -> Result<Self, SensorError<I2C::Error>> {
        let prom = read_prom(&mut i2c, address)?;
        if let Err((stored, computed)) = verify_prom_crc4(&prom) {
            return Err(SensorError::CalibrationCrc { stored, computed });
        }
        debug!("MS5607 PROM {:04x?}", prom);
        Ok(Ms5607 { i2c, delay, address, prom })
    }

    pub fn prom(&self) -> &[u16; PROM_WORDS] {
        &self.prom
    }

    /// Runs both conversions and compensates them.
    pub fn measure(&mut self) -> Result<PressureReading, SensorError<I2C::Error>> {
        let d1 = self.convert(CMD_CONVERT_D1_OSR_4096)?;
        let d2 = self.convert(CMD_CONVERT_D2_OSR_4096)?;
        debug!("MS5607 D1 {} D2 {}", d1, d2);
        Ok(compensate(&self.prom, d1, d2))
    }

    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn convert(&mut self, command: u8) -> Result<u32, SensorError<I2C::Error>> {
        write(&mut self.i2c, self.address, &[command])?;
        wait(&mut self.delay, timing::MS5607_CONVERSION);
        let raw: [u8; 3] = command_read(&mut self.i2c, self.address, &[CMD_READ_ADC])?;
        Ok(u32::from_be_bytes([0, raw[0], raw[1], raw[2]]))
    }
}

fn read_prom<I2C: I2c>(i2c: &mut I2C, address: u8) -> Result<[u16; PROM_WORDS], SensorError<I2C::Error>> {
    let mut prom = [0u16; PROM_WORDS];
    for (i, word) in prom.iter_mut().enumerate() {
        let raw: [u8; 2] = command_read(i2c, address, &[CMD_READ_PROM + 2 * i as u8])?;
        *word = u16::from_be_bytes(raw);
    }
    Ok(prom)
}
