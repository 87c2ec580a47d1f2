// src/controller/error.rs

use crate::common::{CodecError, CommandError};
use crate::config::ConfigError;

/// Everything that can end a control invocation.
///
/// The display prefix tells the operator which side failed: their input,
/// the config file, the bytes the driver answered with, or the transport.
/// A board that is not ready yet is not an error (see `InfoStatus`).
#[derive(Debug, thiserror::Error)]
pub enum HatError<E> {
    #[error("invalid input: {0}")]
    Command(#[from] CommandError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("device response: {0}")]
    Codec(#[from] CodecError),

    /// The exchange with the driver failed; the buffer was not decoded.
    #[error("transport error: {0}")]
    Transport(E),
}

impl<E> HatError<E> {
    /// Whether the transport was touched before the failure.
    pub fn reached_device(&self) -> bool {
        matches!(self, HatError::Codec(_) | HatError::Transport(_))
    }
}
