// src/config/mod.rs

//! Config compiler: turns a human-edited config file into the
//! [`ConfigHat`] record sent with the configure command.
//!
//! Two grammars produce the same record: nested markup (Moitessier tools)
//! and positional lines (nav.HAT tools). `afc_range_default` is not
//! configurable and is always 0 in the compiled record.

pub mod error;
pub mod field;
pub mod lines;
pub mod markup;

pub use error::ConfigError;
pub use field::ConfigField;
pub use lines::LineConfig;
pub use markup::MarkupConfig;

use core::fmt;
use std::fs;
use std::path::Path;

use log::info;

use crate::common::{ConfigHat, Generation};

/// A config grammar.
pub trait ConfigFrontEnd {
    /// Compiles the whole source text into a configuration record.
    fn compile(&self, source: &str) -> Result<ConfigHat, ConfigError>;
}

/// Selects one of the two grammars.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ConfigFormat {
    Markup,
    Lines,
}

impl ConfigFormat {
    /// Grammar the generation's own tools ship with.
    pub const fn native(generation: Generation) -> Self {
        match generation {
            Generation::Moitessier => ConfigFormat::Markup,
            Generation::NaviDev => ConfigFormat::Lines,
        }
    }

    /// `.xml` files are markup; anything else uses the generation's grammar.
    pub fn detect(path: &Path, generation: Generation) -> Self {
        let is_xml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"));
        if is_xml {
            ConfigFormat::Markup
        } else {
            Self::native(generation)
        }
    }

    pub fn front_end(self) -> &'static dyn ConfigFrontEnd {
        match self {
            ConfigFormat::Markup => &MarkupConfig,
            ConfigFormat::Lines => &LineConfig,
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConfigFormat::Markup => "markup",
            ConfigFormat::Lines => "lines",
        })
    }
}

/// Reads and compiles a config file. The file is closed before returning.
pub fn compile_file(path: &Path, format: ConfigFormat) -> Result<ConfigHat, ConfigError> {
    info!("compiling {} config {}", format, path.display());
    let source = fs::read_to_string(path).map_err(|source| ConfigError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    format.front_end().compile(&source)
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    const MARKUP: &str = "<config>\
        <receiver><channelFreq><freq>161975000</freq><freq>162025000</freq></channelFreq>\
        <metamask>3</metamask><afcRange>2000</afcRange><tcxoFreq>26000000</tcxoFreq></receiver>\
        <receiver><channelFreq><freq>156025000</freq><freq>157425000</freq></channelFreq>\
        <metamask>0</metamask><afcRange>1500</afcRange><tcxoFreq>26000003</tcxoFreq></receiver>\
        <simulator><enabled>1</enabled><interval>10</interval>\
        <mmsi><id>111111111</id><id>222222222</id></mmsi></simulator>\
        <misc><eepromWpEnabled>1</eepromWpEnabled></misc></config>";

    const LINES: &str = "161975000\n162025000\n3\n2000\n26000000\n\
                         156025000\n157425000\n0\n1500\n26000003\n\
                         1\n10\n111111111\n222222222\n1\n";

    fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_both_grammars_compile_the_same_record() {
        let xml = temp_file(".xml", MARKUP);
        let txt = temp_file(".txt", LINES);
        let from_markup = compile_file(xml.path(), ConfigFormat::Markup).unwrap();
        let from_lines = compile_file(txt.path(), ConfigFormat::Lines).unwrap();
        assert_eq!(from_markup, from_lines);
        assert_eq!(from_markup.to_bytes(), from_lines.to_bytes());
        assert!(from_markup.receivers.iter().all(|r| r.afc_range_default == 0));
    }

    #[test]
    fn test_missing_file_is_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.xml");
        match compile_file(&path, ConfigFormat::Markup) {
            Err(ConfigError::Open { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_wrong_grammar_fails() {
        let txt = temp_file(".txt", LINES);
        assert!(matches!(compile_file(txt.path(), ConfigFormat::Markup), Err(ConfigError::Markup(_))));
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(ConfigFormat::detect(Path::new("config.xml"), Generation::NaviDev), ConfigFormat::Markup);
        assert_eq!(ConfigFormat::detect(Path::new("CONFIG.XML"), Generation::NaviDev), ConfigFormat::Markup);
        assert_eq!(ConfigFormat::detect(Path::new("config.txt"), Generation::Moitessier), ConfigFormat::Markup);
        assert_eq!(ConfigFormat::detect(Path::new("config.txt"), Generation::NaviDev), ConfigFormat::Lines);
        assert_eq!(ConfigFormat::detect(Path::new("config"), Generation::NaviDev), ConfigFormat::Lines);
    }
}
