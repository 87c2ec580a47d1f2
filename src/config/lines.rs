// src/config/lines.rs

//! Line-oriented front-end (the nav.HAT `config.txt`).
//!
//! One decimal value per line, in the order of [`ConfigField::LINE_ORDER`]:
//! receiver 1 frequencies, meta data mask, AFC range and TCXO frequency, the
//! same five values for receiver 2, then simulator enabled, interval, both
//! MMSIs, and finally the ID EEPROM write protection. Blank lines are
//! skipped; anything after the 15th value is ignored.

use log::debug;

use crate::common::ConfigHat;

use super::error::ConfigError;
use super::field::ConfigField;
use super::ConfigFrontEnd;

/// Compiles the positional line grammar.
#[derive(Debug, Default, Copy, Clone)]
pub struct LineConfig;

impl ConfigFrontEnd for LineConfig {
    fn compile(&self, source: &str) -> Result<ConfigHat, ConfigError> {
        let mut values = source
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty());

        let mut config = ConfigHat::default();
        for field in ConfigField::LINE_ORDER {
            let value = values.next().ok_or(ConfigError::MissingField { field })?;
            debug!("{} = {:?}", field, value);
            field.assign(&mut config, value)?;
        }
        Ok(config)
    }
}
