// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod command;
pub mod crc;
pub mod error;
pub mod generation;
pub mod hal_traits;
pub mod record;
pub mod timing;

// --- Re-export key types/traits/functions for easier access ---

// From command.rs
pub use command::{Command, CommandKind, OpCode, ParamKind, MAX_PAYLOAD_LEN};

// From crc.rs
pub use crc::{calculate_prom_crc4, verify_prom_crc4};

// From error.rs
pub use error::{CodecError, CommandError};

// From generation.rs
pub use generation::Generation;

// From hal_traits.rs
pub use hal_traits::{ControlBuffer, ControlChannel, CONTROL_BUFFER_LEN};

// From record/mod.rs (and its sub-modules via its own `pub use`)
pub use record::{
    ConfigHat, InfoExtension, InfoRecord, InfoStatus, ReceiverConfig, ReceiverInfo, SerialNumber,
    SimulatorConfig, StatisticsRecord, WireRecord, NUM_RECEIVERS, NUM_RCV_CHANNELS,
};
