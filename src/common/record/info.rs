// src/common/record/info.rs

//! The info record the driver returns for command 1.
//!
//! Its length depends on the driver generation: the Moitessier driver appends
//! a button/GNSS tail before the `valid` flag. The flag gates everything else,
//! so decoding reads it first and stops there when the board is not ready.

use super::super::error::CodecError;
use super::super::generation::Generation;
use super::receiver::{ReceiverConfig, SimulatorConfig};
use super::{check_len, fixed_str, WireReader, WireRecord, WireWriter, NUM_RECEIVERS};

const HW_ID_LEN: usize = 16;
const HW_VER_LEN: usize = 8;
const BOOT_VER_LEN: usize = 22;
const APP_VER_LEN: usize = 22;
const GNSS_VER_LEN: usize = 32;

/// 96-bit board serial number, high word first.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct SerialNumber {
    pub h: u32,
    pub m: u32,
    pub l: u32,
}

impl WireRecord for SerialNumber {
    const SIZE: usize = 12;
    const ALIGN: usize = 4;

    fn write_fields(&self, w: &mut WireWriter<'_>) {
        w.put_u32(self.h);
        w.put_u32(self.m);
        w.put_u32(self.l);
    }

    fn read_fields(r: &mut WireReader<'_>) -> Self {
        SerialNumber { h: r.u32(), m: r.u32(), l: r.u32() }
    }
}

/// Active receiver configuration plus the per-channel RNG readout.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct ReceiverInfo {
    pub config: ReceiverConfig,
    pub rng: [u8; 2],
}

impl WireRecord for ReceiverInfo {
    const SIZE: usize = 28;
    const ALIGN: usize = 4;

    fn write_fields(&self, w: &mut WireWriter<'_>) {
        w.record(&self.config);
        w.put_bytes(&self.rng);
    }

    fn read_fields(r: &mut WireReader<'_>) -> Self {
        ReceiverInfo { config: r.record(), rng: r.bytes() }
    }
}

/// Fields only the Moitessier driver reports.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct InfoExtension {
    pub button_pressed: u8,
    pub gnss_version: [u8; GNSS_VER_LEN],
    /// Bitmask of the GNSS systems the receiver supports.
    pub gnss_systems: u8,
}

impl InfoExtension {
    pub fn gnss_version(&self) -> &str {
        fixed_str(&self.gnss_version)
    }
}

impl Default for InfoExtension {
    fn default() -> Self {
        InfoExtension { button_pressed: 0, gnss_version: [0; GNSS_VER_LEN], gnss_systems: 0 }
    }
}

/// Decoded board information, only produced when the `valid` flag is set.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct InfoRecord {
    /// Operating mode as a single ASCII character.
    pub mode: u8,
    pub hardware_id: [u8; HW_ID_LEN],
    pub hardware_version: [u8; HW_VER_LEN],
    pub bootloader_version: [u8; BOOT_VER_LEN],
    pub app_version: [u8; APP_VER_LEN],
    pub functionality: u32,
    /// Non-zero when the firmware has recorded system errors.
    pub system_errors: u32,
    pub serial: SerialNumber,
    pub receivers: [ReceiverInfo; NUM_RECEIVERS],
    pub simulator: SimulatorConfig,
    pub eeprom_write_protect: u8,
    /// Present for generations with the extended record.
    pub extended: Option<InfoExtension>,
}

impl Default for InfoRecord {
    fn default() -> Self {
        InfoRecord {
            mode: 0,
            hardware_id: [0; HW_ID_LEN],
            hardware_version: [0; HW_VER_LEN],
            bootloader_version: [0; BOOT_VER_LEN],
            app_version: [0; APP_VER_LEN],
            functionality: 0,
            system_errors: 0,
            serial: SerialNumber::default(),
            receivers: [ReceiverInfo::default(); NUM_RECEIVERS],
            simulator: SimulatorConfig::default(),
            eeprom_write_protect: 0,
            extended: None,
        }
    }
}

impl InfoRecord {
    /// Record size the given generation's driver writes.
    pub const fn wire_size(generation: Generation) -> usize {
        if generation.has_extended_info() {
            200
        } else {
            168
        }
    }

    /// Offset of the `valid` flag.
    pub const fn valid_offset(generation: Generation) -> usize {
        if generation.has_extended_info() {
            199
        } else {
            165
        }
    }

    pub fn hardware_id(&self) -> &str {
        fixed_str(&self.hardware_id)
    }

    pub fn hardware_version(&self) -> &str {
        fixed_str(&self.hardware_version)
    }

    pub fn bootloader_version(&self) -> &str {
        fixed_str(&self.bootloader_version)
    }

    pub fn app_version(&self) -> &str {
        fixed_str(&self.app_version)
    }

    pub fn has_system_errors(&self) -> bool {
        self.system_errors != 0
    }

    /// Encodes the record as the given generation's driver would, with the
    /// `valid` flag set. A missing extension is written as zeros. The driver
    /// never receives an info record; this builds test answers only.
    #[cfg(test)]
    pub(crate) fn encode_into(&self, out: &mut [u8], generation: Generation) -> Result<(), CodecError> {
        let size = Self::wire_size(generation);
        check_len(size, out.len())?;
        let mut w = WireWriter::new(&mut out[..size]);

        w.put_u8(self.mode);
        w.put_bytes(&self.hardware_id);
        w.put_bytes(&self.hardware_version);
        w.put_bytes(&self.bootloader_version);
        w.put_bytes(&self.app_version);
        w.put_u32(self.functionality);
        w.put_u32(self.system_errors);
        w.record(&self.serial);
        for receiver in &self.receivers {
            w.record(receiver);
        }
        w.record(&self.simulator);
        w.put_u8(self.eeprom_write_protect);
        if generation.has_extended_info() {
            let ext = self.extended.unwrap_or_default();
            w.put_u8(ext.button_pressed);
            w.put_bytes(&ext.gnss_version);
            w.put_u8(ext.gnss_systems);
        }
        w.put_bool(true);
        w.pad_to(size);
        Ok(())
    }

    fn read_body(r: &mut WireReader<'_>, generation: Generation) -> Self {
        let mut record = InfoRecord {
            mode: r.u8(),
            hardware_id: r.bytes(),
            hardware_version: r.bytes(),
            bootloader_version: r.bytes(),
            app_version: r.bytes(),
            functionality: r.u32(),
            system_errors: r.u32(),
            serial: r.record(),
            receivers: [r.record(), r.record()],
            simulator: r.record(),
            eeprom_write_protect: r.u8(),
            extended: None,
        };
        if generation.has_extended_info() {
            record.extended = Some(InfoExtension {
                button_pressed: r.u8(),
                gnss_version: r.bytes(),
                gnss_systems: r.u8(),
            });
        }
        record
    }
}

/// Result of decoding an info response.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum InfoStatus {
    /// The board has not completed its first acquisition cycle; no other
    /// field was read.
    NotReady,
    Ready(InfoRecord),
}

impl InfoStatus {
    /// Decodes an info response for the given generation.
    pub fn decode(bytes: &[u8], generation: Generation) -> Result<Self, CodecError> {
        let size = InfoRecord::wire_size(generation);
        check_len(size, bytes.len())?;
        if bytes[InfoRecord::valid_offset(generation)] == 0 {
            return Ok(InfoStatus::NotReady);
        }
        let mut r = WireReader::new(&bytes[..size]);
        Ok(InfoStatus::Ready(InfoRecord::read_body(&mut r, generation)))
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, InfoStatus::Ready(_))
    }
}
