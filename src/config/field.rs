// src/config/field.rs

use core::fmt;

use crate::common::ConfigHat;

use super::error::ConfigError;

/// One configurable value of the HAT configuration.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ConfigField {
    ChannelFreq { receiver: usize, channel: usize },
    MetaDataMask { receiver: usize },
    AfcRange { receiver: usize },
    TcxoFreq { receiver: usize },
    SimulatorEnabled,
    SimulatorInterval,
    Mmsi { slot: usize },
    EepromWriteProtect,
}

impl ConfigField {
    /// Field order of the line-oriented grammar, one field per line.
    pub const LINE_ORDER: [ConfigField; 15] = [
        ConfigField::ChannelFreq { receiver: 0, channel: 0 },
        ConfigField::ChannelFreq { receiver: 0, channel: 1 },
        ConfigField::MetaDataMask { receiver: 0 },
        ConfigField::AfcRange { receiver: 0 },
        ConfigField::TcxoFreq { receiver: 0 },
        ConfigField::ChannelFreq { receiver: 1, channel: 0 },
        ConfigField::ChannelFreq { receiver: 1, channel: 1 },
        ConfigField::MetaDataMask { receiver: 1 },
        ConfigField::AfcRange { receiver: 1 },
        ConfigField::TcxoFreq { receiver: 1 },
        ConfigField::SimulatorEnabled,
        ConfigField::SimulatorInterval,
        ConfigField::Mmsi { slot: 0 },
        ConfigField::Mmsi { slot: 1 },
        ConfigField::EepromWriteProtect,
    ];

    /// Parses `text` as a decimal number of the field's width and stores it.
    pub fn assign(self, config: &mut ConfigHat, text: &str) -> Result<(), ConfigError> {
        let text = text.trim();
        match self {
            ConfigField::ChannelFreq { receiver, channel } => {
                config.receivers[receiver].channel_freq[channel] = self.parse(text)?;
            }
            ConfigField::MetaDataMask { receiver } => {
                config.receivers[receiver].meta_data_mask = self.parse(text)?;
            }
            ConfigField::AfcRange { receiver } => {
                config.receivers[receiver].afc_range = self.parse(text)?;
            }
            ConfigField::TcxoFreq { receiver } => {
                config.receivers[receiver].tcxo_freq = self.parse(text)?;
            }
            ConfigField::SimulatorEnabled => config.simulator.enabled = self.parse(text)?,
            ConfigField::SimulatorInterval => config.simulator.interval = self.parse(text)?,
            ConfigField::Mmsi { slot } => config.simulator.mmsi[slot] = self.parse(text)?,
            ConfigField::EepromWriteProtect => config.eeprom_write_protect = self.parse(text)?,
        }
        Ok(())
    }

    fn parse<T>(self, text: &str) -> Result<T, ConfigError>
    where
        T: core::str::FromStr<Err = core::num::ParseIntError>,
    {
        text.parse::<T>().map_err(|source| ConfigError::Parse {
            field: self,
            value: text.to_owned(),
            source,
        })
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigField::ChannelFreq { receiver, channel } => {
                write!(f, "receiver[{}]/channelFreq/freq[{}]", receiver, channel)
            }
            ConfigField::MetaDataMask { receiver } => write!(f, "receiver[{}]/metamask", receiver),
            ConfigField::AfcRange { receiver } => write!(f, "receiver[{}]/afcRange", receiver),
            ConfigField::TcxoFreq { receiver } => write!(f, "receiver[{}]/tcxoFreq", receiver),
            ConfigField::SimulatorEnabled => f.write_str("simulator/enabled"),
            ConfigField::SimulatorInterval => f.write_str("simulator/interval"),
            ConfigField::Mmsi { slot } => write!(f, "simulator/mmsi/id[{}]", slot),
            ConfigField::EepromWriteProtect => f.write_str("misc/eepromWpEnabled"),
        }
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_order_covers_every_field_once() {
        for (i, a) in ConfigField::LINE_ORDER.iter().enumerate() {
            for b in &ConfigField::LINE_ORDER[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_assign_respects_field_width() {
        let mut config = ConfigHat::default();
        ConfigField::MetaDataMask { receiver: 1 }.assign(&mut config, " 255 ").unwrap();
        assert_eq!(config.receivers[1].meta_data_mask, 255);

        let err = ConfigField::MetaDataMask { receiver: 1 }.assign(&mut config, "256").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Parse { field: ConfigField::MetaDataMask { receiver: 1 }, ref value, .. } if value == "256"
        ));

        ConfigField::TcxoFreq { receiver: 0 }.assign(&mut config, "4294967295").unwrap();
        assert_eq!(config.receivers[0].tcxo_freq, u32::MAX);
    }

    #[test]
    fn test_non_numeric_text_is_an_error() {
        let mut config = ConfigHat::default();
        assert!(ConfigField::Mmsi { slot: 0 }.assign(&mut config, "abc").is_err());
        assert!(ConfigField::SimulatorInterval.assign(&mut config, "").is_err());
        assert!(ConfigField::AfcRange { receiver: 0 }.assign(&mut config, "-5").is_err());
        assert_eq!(config, ConfigHat::default());
    }

    #[test]
    fn test_display_uses_markup_paths() {
        assert_eq!(
            ConfigField::ChannelFreq { receiver: 1, channel: 0 }.to_string(),
            "receiver[1]/channelFreq/freq[0]"
        );
        assert_eq!(ConfigField::Mmsi { slot: 1 }.to_string(), "simulator/mmsi/id[1]");
        assert_eq!(ConfigField::EepromWriteProtect.to_string(), "misc/eepromWpEnabled");
    }
}
