// src/common/error.rs

use super::command::CommandKind;
use core::num::ParseIntError;

/// Failure while moving a wire record in or out of a byte buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The buffer cannot hold the whole record.
    #[error("buffer too short: needed {needed} bytes, got {got}")]
    BufferTooShort { needed: usize, got: usize },
}

/// Invalid operator input, detected before the transport is touched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// Command number outside `0..supported` for the selected driver generation.
    #[error("command {selector} not supported (valid commands are 0..={max})", max = .supported - 1)]
    Unsupported { selector: i64, supported: u8 },

    /// A command was given fewer positional parameters than it consumes.
    #[error("command {command} requires parameter <{name}>")]
    MissingParameter { command: CommandKind, name: &'static str },

    /// A positional parameter is not a decimal number in range.
    #[error("invalid parameter <{name}>: {source}")]
    InvalidParameter {
        name: &'static str,
        #[source]
        source: ParseIntError,
    },

    /// A boolean parameter other than `0` or `1`.
    #[error("parameter <{name}> must be 0 or 1, got {value}")]
    NotBoolean { name: &'static str, value: u8 },
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;
    use heapless::String as HeaplessString;

    #[test]
    fn test_unsupported_message_names_valid_range() {
        let err = CommandError::Unsupported { selector: 8, supported: 7 };
        let mut out = HeaplessString::<64>::new();
        write!(out, "{}", err).unwrap();
        assert_eq!(out.as_str(), "command 8 not supported (valid commands are 0..=6)");
    }

    #[test]
    fn test_buffer_too_short_message() {
        let err = CodecError::BufferTooShort { needed: 68, got: 12 };
        let mut out = HeaplessString::<64>::new();
        write!(out, "{}", err).unwrap();
        assert_eq!(out.as_str(), "buffer too short: needed 68 bytes, got 12");
    }
}
