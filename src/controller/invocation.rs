// src/controller/invocation.rs

//! Turns the operator's `<command-number> [params...]` into a [`Command`].
//!
//! Everything here runs before the first exchange: an invalid selector, a
//! bad parameter or a config file that does not compile ends the invocation
//! without touching the driver. Parameters beyond what a command consumes
//! are ignored.

use std::path::Path;

use log::info;

use super::{HatController, HatError, Outcome};
use crate::common::{Command, CommandError, CommandKind, ControlChannel, Generation, ParamKind};
use crate::config::{self, ConfigFormat};

/// Validates the selector and parameters and compiles the config file if the
/// command needs one. `format` forces a config grammar; `None` detects it
/// from the file name.
pub fn prepare_command<S, E>(
    generation: Generation,
    selector: i64,
    params: &[S],
    format: Option<ConfigFormat>,
) -> Result<Command, HatError<E>>
where
    S: AsRef<str>,
{
    let kind = CommandKind::from_selector(selector, generation)?;
    let first = params.first().map(AsRef::as_ref);

    if let Some(command) = Command::from_scalar_param(kind, first)? {
        return Ok(command);
    }

    // Only the configure command carries a record instead of a scalar.
    let name = match kind.param_kind() {
        ParamKind::ConfigPath(name) => name,
        _ => "",
    };
    let path = Path::new(first.ok_or(CommandError::MissingParameter { command: kind, name })?);
    let format = format.unwrap_or_else(|| ConfigFormat::detect(path, generation));
    let compiled = config::compile_file(path, format)?;
    info!("compiled {} config {}", format, path.display());
    Ok(Command::Configure(compiled))
}

impl<C> HatController<C>
where
    C: ControlChannel,
{
    /// [`prepare_command`] for this controller's generation.
    pub fn prepare<S>(
        &self,
        selector: i64,
        params: &[S],
        format: Option<ConfigFormat>,
    ) -> Result<Command, HatError<C::Error>>
    where
        S: AsRef<str>,
    {
        prepare_command(self.generation, selector, params, format)
    }

    /// Prepares and executes one operator invocation.
    pub fn run<S>(
        &mut self,
        selector: i64,
        params: &[S],
        format: Option<ConfigFormat>,
    ) -> Result<Outcome, HatError<C::Error>>
    where
        S: AsRef<str>,
    {
        let command = self.prepare(selector, params, format)?;
        self.execute(&command)
    }
}
