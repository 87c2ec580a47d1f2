// src/config/error.rs

use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

use super::field::ConfigField;

/// Failure while turning a config file into a configuration record.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be opened or read.
    #[error("could not open config file \"{}\": {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The markup is not well-formed.
    #[error("malformed config markup: {0}")]
    Markup(#[from] roxmltree::Error),

    /// A required value is absent from the source.
    #[error("config field {field} is missing")]
    MissingField { field: ConfigField },

    /// A value is not a decimal number that fits the field.
    #[error("config field {field}: \"{value}\" is not a valid number: {source}")]
    Parse {
        field: ConfigField,
        value: String,
        #[source]
        source: ParseIntError,
    },
}
