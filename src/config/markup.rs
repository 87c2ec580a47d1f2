// src/config/markup.rs

//! Markup front-end (the Moitessier `config.xml`).
//!
//! ```xml
//! <config>
//!   <receiver>
//!     <channelFreq><freq>161975000</freq><freq>162025000</freq></channelFreq>
//!     <metamask>0</metamask>
//!     <afcRange>2000</afcRange>
//!     <tcxoFreq>26000000</tcxoFreq>
//!   </receiver>
//!   <receiver>...</receiver>
//!   <simulator>
//!     <enabled>0</enabled>
//!     <interval>1000</interval>
//!     <mmsi><id>111111111</id><id>222222222</id></mmsi>
//!   </simulator>
//!   <misc><eepromWpEnabled>1</eepromWpEnabled></misc>
//! </config>
//! ```
//!
//! The root element's name is not checked.

use log::debug;
use roxmltree::{Document, Node};

use crate::common::ConfigHat;

use super::error::ConfigError;
use super::field::ConfigField;
use super::ConfigFrontEnd;

/// Compiles the nested-element grammar.
#[derive(Debug, Default, Copy, Clone)]
pub struct MarkupConfig;

impl ConfigFrontEnd for MarkupConfig {
    fn compile(&self, source: &str) -> Result<ConfigHat, ConfigError> {
        let doc = Document::parse(source)?;
        let root = doc.root_element();

        let mut config = ConfigHat::default();
        for field in ConfigField::LINE_ORDER {
            let node = locate(root, field).ok_or(ConfigError::MissingField { field })?;
            let text = node.text().unwrap_or("");
            debug!("{} = {:?}", field, text.trim());
            field.assign(&mut config, text)?;
        }
        Ok(config)
    }
}

/// `n`-th child element called `name`.
fn child<'a, 'input>(node: Node<'a, 'input>, name: &str, n: usize) -> Option<Node<'a, 'input>> {
    node.children()
        .filter(|c| c.is_element() && c.has_tag_name(name))
        .nth(n)
}

fn locate<'a, 'input>(root: Node<'a, 'input>, field: ConfigField) -> Option<Node<'a, 'input>> {
    match field {
        ConfigField::ChannelFreq { receiver, channel } => {
            let rcv = child(root, "receiver", receiver)?;
            child(child(rcv, "channelFreq", 0)?, "freq", channel)
        }
        ConfigField::MetaDataMask { receiver } => child(child(root, "receiver", receiver)?, "metamask", 0),
        ConfigField::AfcRange { receiver } => child(child(root, "receiver", receiver)?, "afcRange", 0),
        ConfigField::TcxoFreq { receiver } => child(child(root, "receiver", receiver)?, "tcxoFreq", 0),
        ConfigField::SimulatorEnabled => child(child(root, "simulator", 0)?, "enabled", 0),
        ConfigField::SimulatorInterval => child(child(root, "simulator", 0)?, "interval", 0),
        ConfigField::Mmsi { slot } => {
            let mmsi = child(child(root, "simulator", 0)?, "mmsi", 0)?;
            child(mmsi, "id", slot)
        }
        ConfigField::EepromWriteProtect => child(child(root, "misc", 0)?, "eepromWpEnabled", 0),
    }
}
