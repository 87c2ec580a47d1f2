// src/common/generation.rs

use core::fmt;

/// Driver generation the control node belongs to.
///
/// Both generations share the op-code numbering and the record layouts; the
/// newer Moitessier driver adds the GNSS message configuration command and a
/// tail of GNSS fields to the info record.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Generation {
    /// Moitessier HAT driver: 8 commands, extended info record.
    #[default]
    Moitessier,
    /// nav.HAT (naviDev) driver: 7 commands, short info record.
    NaviDev,
}

impl Generation {
    /// Number of supported commands; valid selectors are `0..command_count()`.
    pub const fn command_count(self) -> u8 {
        match self {
            Generation::Moitessier => 8,
            Generation::NaviDev => 7,
        }
    }

    /// Whether the driver understands the GNSS message configuration command.
    pub const fn has_gnss_message_config(self) -> bool {
        matches!(self, Generation::Moitessier)
    }

    /// Whether the info record carries the button/GNSS tail.
    pub const fn has_extended_info(self) -> bool {
        matches!(self, Generation::Moitessier)
    }

    /// Control node the driver creates.
    pub const fn default_device(self) -> &'static str {
        match self {
            Generation::Moitessier => "/dev/moitessier.ctrl",
            Generation::NaviDev => "/dev/naviDev.ctrl",
        }
    }

    /// Short lowercase name, as accepted on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Generation::Moitessier => "moitessier",
            Generation::NaviDev => "navidev",
        }
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
