// src/common/command.rs

//! HAT control command definitions.
//!
//! Every command travels as one ioctl on the driver's control node. The op
//! code is the command number encoded with Linux `_IO('N', nr)`; the request
//! payload (if any) sits at the start of the shared control buffer.

use core::fmt;

use arrayvec::ArrayVec;

use super::error::CommandError;
use super::generation::Generation;
use super::record::{ConfigHat, WireRecord};

/// Largest request payload any command writes (the configuration record).
pub const MAX_PAYLOAD_LEN: usize = ConfigHat::SIZE;

/// Command selector as typed by the operator (`0..N`).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum CommandKind {
    /// Read the SPI/FIFO/CRC counters.
    Statistics = 0,
    /// Read the board identification and current configuration.
    Info = 1,
    /// Reset the HAT.
    Reset = 2,
    /// Zero the statistics counters.
    ResetStatistics = 3,
    /// Switch the GNSS receiver on or off.
    GnssEnable = 4,
    /// Write a full receiver/simulator configuration.
    Configure = 5,
    /// Switch the ID EEPROM write protection on or off.
    EepromWriteProtect = 6,
    /// Select the NMEA sentences the GNSS receiver emits (Moitessier only).
    GnssMessageConfig = 7,
}

/// Kind of positional parameter a command consumes.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ParamKind {
    None,
    /// `0` or `1`.
    Bool(&'static str),
    /// Decimal `u8` bitmask.
    Mask(&'static str),
    /// Path of the configuration file to compile.
    ConfigPath(&'static str),
}

impl CommandKind {
    pub const ALL: [CommandKind; 8] = [
        CommandKind::Statistics,
        CommandKind::Info,
        CommandKind::Reset,
        CommandKind::ResetStatistics,
        CommandKind::GnssEnable,
        CommandKind::Configure,
        CommandKind::EepromWriteProtect,
        CommandKind::GnssMessageConfig,
    ];

    /// Validates an operator selector against the generation's command set.
    pub fn from_selector(selector: i64, generation: Generation) -> Result<Self, CommandError> {
        let supported = generation.command_count();
        if selector < 0 || selector >= i64::from(supported) {
            return Err(CommandError::Unsupported { selector, supported });
        }
        // In range for every generation, ALL has 8 entries.
        Ok(Self::ALL[selector as usize])
    }

    #[inline]
    pub const fn selector(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn op_code(self) -> OpCode {
        OpCode(self as u8)
    }

    pub const fn name(self) -> &'static str {
        match self {
            CommandKind::Statistics => "statistics",
            CommandKind::Info => "info",
            CommandKind::Reset => "reset",
            CommandKind::ResetStatistics => "reset-statistics",
            CommandKind::GnssEnable => "gnss",
            CommandKind::Configure => "configure",
            CommandKind::EepromWriteProtect => "eeprom-write-protect",
            CommandKind::GnssMessageConfig => "gnss-messages",
        }
    }

    /// One line of help text, used in the CLI command table.
    pub const fn description(self) -> &'static str {
        match self {
            CommandKind::Statistics => "Read HAT statistics",
            CommandKind::Info => "Get HAT info",
            CommandKind::Reset => "Reset HAT",
            CommandKind::ResetStatistics => "Reset HAT statistics",
            CommandKind::GnssEnable => "Enable (1) or disable (0) GNSS",
            CommandKind::Configure => "Configure HAT from a config file",
            CommandKind::EepromWriteProtect => "Enable (1) or disable (0) ID EEPROM write protection",
            CommandKind::GnssMessageConfig => "Select GNSS sentences (255 = all, 1 = RMC only)",
        }
    }

    pub const fn param_kind(self) -> ParamKind {
        match self {
            CommandKind::GnssEnable => ParamKind::Bool("enable"),
            CommandKind::Configure => ParamKind::ConfigPath("config-file"),
            CommandKind::EepromWriteProtect => ParamKind::Bool("enable"),
            CommandKind::GnssMessageConfig => ParamKind::Mask("mask"),
            _ => ParamKind::None,
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.selector())
    }
}

/// ioctl operation code of a command.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct OpCode(u8);

impl OpCode {
    /// ioctl type ("magic") the driver registers.
    pub const MAGIC: u8 = b'N';

    #[inline]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Linux `_IO(MAGIC, nr)`: no direction bits, no size.
    #[inline]
    pub const fn request_code(self) -> u32 {
        ((Self::MAGIC as u32) << 8) | self.0 as u32
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.request_code())
    }
}

/// A fully validated command, ready to be encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Statistics,
    Info,
    Reset,
    ResetStatistics,
    GnssEnable { enabled: bool },
    /// Carries the compiled configuration record.
    Configure(ConfigHat),
    EepromWriteProtect { enabled: bool },
    GnssMessageConfig { mask: u8 },
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Statistics => CommandKind::Statistics,
            Command::Info => CommandKind::Info,
            Command::Reset => CommandKind::Reset,
            Command::ResetStatistics => CommandKind::ResetStatistics,
            Command::GnssEnable { .. } => CommandKind::GnssEnable,
            Command::Configure(_) => CommandKind::Configure,
            Command::EepromWriteProtect { .. } => CommandKind::EepromWriteProtect,
            Command::GnssMessageConfig { .. } => CommandKind::GnssMessageConfig,
        }
    }

    #[inline]
    pub fn op_code(&self) -> OpCode {
        self.kind().op_code()
    }

    /// Builds a command whose parameter is a scalar (everything but `Configure`).
    ///
    /// Returns `Ok(None)` for `Configure`; its record has to come from the
    /// config compiler.
    pub fn from_scalar_param(
        kind: CommandKind,
        param: Option<&str>,
    ) -> Result<Option<Self>, CommandError> {
        let command = match kind {
            CommandKind::Statistics => Command::Statistics,
            CommandKind::Info => Command::Info,
            CommandKind::Reset => Command::Reset,
            CommandKind::ResetStatistics => Command::ResetStatistics,
            CommandKind::GnssEnable => Command::GnssEnable {
                enabled: parse_bool_param(kind, param)?,
            },
            CommandKind::EepromWriteProtect => Command::EepromWriteProtect {
                enabled: parse_bool_param(kind, param)?,
            },
            CommandKind::GnssMessageConfig => Command::GnssMessageConfig {
                mask: parse_u8_param(kind, param)?,
            },
            CommandKind::Configure => return Ok(None),
        };
        Ok(Some(command))
    }

    /// Request bytes written to the start of the control buffer.
    pub fn payload(&self) -> ArrayVec<u8, MAX_PAYLOAD_LEN> {
        let mut payload = ArrayVec::new();
        match self {
            Command::Statistics | Command::Info | Command::Reset | Command::ResetStatistics => {}
            Command::GnssEnable { enabled } | Command::EepromWriteProtect { enabled } => {
                payload.push(u8::from(*enabled));
            }
            Command::GnssMessageConfig { mask } => payload.push(*mask),
            Command::Configure(config) => payload.extend(config.to_bytes()),
        }
        payload
    }
}

fn param_name(kind: CommandKind) -> &'static str {
    match kind.param_kind() {
        ParamKind::Bool(name) | ParamKind::Mask(name) | ParamKind::ConfigPath(name) => name,
        ParamKind::None => "",
    }
}

fn parse_u8_param(kind: CommandKind, param: Option<&str>) -> Result<u8, CommandError> {
    let name = param_name(kind);
    let text = param.ok_or(CommandError::MissingParameter { command: kind, name })?;
    text.trim()
        .parse::<u8>()
        .map_err(|source| CommandError::InvalidParameter { name, source })
}

fn parse_bool_param(kind: CommandKind, param: Option<&str>) -> Result<bool, CommandError> {
    match parse_u8_param(kind, param)? {
        0 => Ok(false),
        1 => Ok(true),
        value => Err(CommandError::NotBoolean { name: param_name(kind), value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::record::{ReceiverConfig, SimulatorConfig};
    use core::fmt::Write;
    use heapless::String as HeaplessString;

    #[test]
    fn test_selector_boundaries_per_generation() {
        assert_eq!(
            CommandKind::from_selector(7, Generation::Moitessier),
            Ok(CommandKind::GnssMessageConfig)
        );
        assert_eq!(
            CommandKind::from_selector(8, Generation::Moitessier),
            Err(CommandError::Unsupported { selector: 8, supported: 8 })
        );
        assert_eq!(
            CommandKind::from_selector(7, Generation::NaviDev),
            Err(CommandError::Unsupported { selector: 7, supported: 7 })
        );
        assert_eq!(
            CommandKind::from_selector(-1, Generation::NaviDev),
            Err(CommandError::Unsupported { selector: -1, supported: 7 })
        );
        for (i, kind) in CommandKind::ALL.iter().enumerate().take(7) {
            assert_eq!(CommandKind::from_selector(i as i64, Generation::NaviDev), Ok(*kind));
        }
    }

    #[test]
    fn test_op_codes_follow_io_macro() {
        assert_eq!(CommandKind::Statistics.op_code().request_code(), 0x4E00);
        assert_eq!(CommandKind::Configure.op_code().request_code(), 0x4E05);
        assert_eq!(CommandKind::GnssMessageConfig.op_code().request_code(), 0x4E07);
        assert_eq!(CommandKind::Info.op_code().number(), 1);
    }

    #[test]
    fn test_kind_display() {
        let mut out = HeaplessString::<32>::new();
        write!(out, "{}", CommandKind::ResetStatistics).unwrap();
        assert_eq!(out.as_str(), "reset-statistics (3)");

        out.clear();
        write!(out, "{}", CommandKind::Info.op_code()).unwrap();
        assert_eq!(out.as_str(), "0x4e01");
    }

    #[test]
    fn test_scalar_params() {
        assert_eq!(
            Command::from_scalar_param(CommandKind::GnssEnable, Some("1")),
            Ok(Some(Command::GnssEnable { enabled: true }))
        );
        assert_eq!(
            Command::from_scalar_param(CommandKind::EepromWriteProtect, Some(" 0 ")),
            Ok(Some(Command::EepromWriteProtect { enabled: false }))
        );
        assert_eq!(
            Command::from_scalar_param(CommandKind::GnssMessageConfig, Some("255")),
            Ok(Some(Command::GnssMessageConfig { mask: 255 }))
        );
        assert_eq!(Command::from_scalar_param(CommandKind::Statistics, None), Ok(Some(Command::Statistics)));
        assert_eq!(Command::from_scalar_param(CommandKind::Configure, Some("x.xml")), Ok(None));
    }

    #[test]
    fn test_scalar_param_errors() {
        assert_eq!(
            Command::from_scalar_param(CommandKind::GnssEnable, None),
            Err(CommandError::MissingParameter { command: CommandKind::GnssEnable, name: "enable" })
        );
        assert_eq!(
            Command::from_scalar_param(CommandKind::GnssEnable, Some("2")),
            Err(CommandError::NotBoolean { name: "enable", value: 2 })
        );
        assert!(matches!(
            Command::from_scalar_param(CommandKind::GnssMessageConfig, Some("256")),
            Err(CommandError::InvalidParameter { name: "mask", .. })
        ));
        assert!(matches!(
            Command::from_scalar_param(CommandKind::EepromWriteProtect, Some("yes")),
            Err(CommandError::InvalidParameter { name: "enable", .. })
        ));
    }

    #[test]
    fn test_payloads() {
        assert!(Command::Statistics.payload().is_empty());
        assert!(Command::Reset.payload().is_empty());
        assert_eq!(Command::GnssEnable { enabled: true }.payload().as_slice(), &[1]);
        assert_eq!(Command::EepromWriteProtect { enabled: false }.payload().as_slice(), &[0]);
        assert_eq!(Command::GnssMessageConfig { mask: 0x81 }.payload().as_slice(), &[0x81]);

        let config = ConfigHat {
            receivers: [ReceiverConfig::default(); 2],
            simulator: SimulatorConfig::default(),
            eeprom_write_protect: 1,
        };
        let payload = Command::Configure(config).payload();
        assert_eq!(payload.len(), ConfigHat::SIZE);
        assert_eq!(payload.as_slice(), &config.to_bytes()[..]);
    }
}
