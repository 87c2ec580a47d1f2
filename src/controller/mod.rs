// src/controller/mod.rs

//! Command dispatcher for the HAT control node.
//!
//! [`HatController`] owns the control channel and knows the driver
//! generation it talks to. Each [`Command`] is one exchange: the payload is
//! copied into a zeroed control buffer, the driver answers in place, and the
//! answer is decoded into an [`Outcome`].

pub mod error;
pub mod invocation;
pub mod render;

#[cfg(feature = "linux")]
pub mod ioctl;

pub use error::HatError;
pub use render::render;

#[cfg(feature = "linux")]
pub use ioctl::IoctlChannel;

use log::{debug, warn};

use crate::common::{
    Command, CommandError, ConfigHat, ControlBuffer, ControlChannel, Generation, InfoStatus,
    StatisticsRecord, WireRecord, CONTROL_BUFFER_LEN,
};

/// Decoded result of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Statistics(StatisticsRecord),
    Info(InfoStatus),
    Reset,
    StatisticsReset,
    GnssEnabled(bool),
    /// The configuration that was sent (the driver does not echo it).
    Configured(ConfigHat),
    EepromWriteProtect(bool),
    GnssMessageConfig(u8),
}

/// Sends commands to one control channel.
#[derive(Debug)]
pub struct HatController<C>
where
    C: ControlChannel,
{
    channel: C,
    generation: Generation,
}

impl<C> HatController<C>
where
    C: ControlChannel,
{
    pub fn new(channel: C, generation: Generation) -> Self {
        HatController { channel, generation }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn into_channel(self) -> C {
        self.channel
    }

    /// Runs one command: a single exchange, no retries.
    pub fn execute(&mut self, command: &Command) -> Result<Outcome, HatError<C::Error>> {
        let kind = command.kind();
        let supported = self.generation.command_count();
        if kind.selector() >= supported {
            return Err(CommandError::Unsupported {
                selector: i64::from(kind.selector()),
                supported,
            }
            .into());
        }

        let mut buffer: ControlBuffer = [0u8; CONTROL_BUFFER_LEN];
        let payload = command.payload();
        buffer[..payload.len()].copy_from_slice(&payload);

        let op = kind.op_code();
        debug!("{}: op {}, {} byte payload", kind, op, payload.len());
        let ret = self.channel.exchange(op, &mut buffer).map_err(HatError::Transport)?;
        debug!("{}: driver returned {}", kind, ret);

        let outcome = match command {
            Command::Statistics => Outcome::Statistics(StatisticsRecord::decode(&buffer)?),
            Command::Info => {
                let status = InfoStatus::decode(&buffer, self.generation)?;
                match &status {
                    InfoStatus::Ready(info) if info.has_system_errors() => {
                        warn!("HAT reports system errors 0x{:08x}", info.system_errors);
                    }
                    InfoStatus::NotReady => debug!("info record not valid yet"),
                    _ => {}
                }
                Outcome::Info(status)
            }
            Command::Reset => Outcome::Reset,
            Command::ResetStatistics => Outcome::StatisticsReset,
            Command::GnssEnable { enabled } => Outcome::GnssEnabled(*enabled),
            Command::Configure(config) => Outcome::Configured(*config),
            Command::EepromWriteProtect { enabled } => Outcome::EepromWriteProtect(*enabled),
            Command::GnssMessageConfig { mask } => Outcome::GnssMessageConfig(*mask),
        };
        Ok(outcome)
    }
}
