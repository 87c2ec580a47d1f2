// src/bin/hat-ctrl.rs

//! Operator front-end for the HAT control node.
//!
//! ```bash
//! hat-ctrl /dev/moitessier.ctrl 1                 # board info
//! hat-ctrl /dev/moitessier.ctrl 5 config.xml      # write a configuration
//! hat-ctrl --generation navidev /dev/naviDev.ctrl 4 0
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::LevelFilter;

use hat_ctrl::common::{CommandKind, Generation};
use hat_ctrl::config::ConfigFormat;
use hat_ctrl::controller::invocation::prepare_command;
use hat_ctrl::controller::{render, HatController, IoctlChannel};

// --- CLI Arguments ---

/// Sends one command to the Moitessier / nav.HAT kernel driver.
#[derive(Parser, Debug)]
#[command(name = "hat-ctrl", version, about, long_about = None)]
#[command(after_long_help = command_table())]
#[command(allow_negative_numbers = true)]
struct Args {
    /// Control device node
    #[arg(value_name = "DEVICE")]
    device: PathBuf,

    /// Command number (see --help)
    #[arg(value_name = "COMMAND")]
    command: i64,

    /// Command parameters
    #[arg(value_name = "PARAMS")]
    params: Vec<String>,

    /// Driver generation behind the node
    #[arg(short, long, value_enum, default_value_t = GenerationArg::Moitessier)]
    generation: GenerationArg,

    /// Config file grammar for the configure command
    #[arg(short, long, value_enum, default_value_t = FormatArg::Auto)]
    format: FormatArg,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
enum GenerationArg {
    Moitessier,
    Navidev,
}

impl From<GenerationArg> for Generation {
    fn from(arg: GenerationArg) -> Self {
        match arg {
            GenerationArg::Moitessier => Generation::Moitessier,
            GenerationArg::Navidev => Generation::NaviDev,
        }
    }
}

#[derive(Debug, Copy, Clone, ValueEnum)]
enum FormatArg {
    /// `.xml` is markup, anything else the generation's native grammar
    Auto,
    Markup,
    Lines,
}

impl FormatArg {
    fn format(self) -> Option<ConfigFormat> {
        match self {
            FormatArg::Auto => None,
            FormatArg::Markup => Some(ConfigFormat::Markup),
            FormatArg::Lines => Some(ConfigFormat::Lines),
        }
    }
}

fn command_table() -> String {
    let mut table = String::from("Commands:\n");
    for kind in CommandKind::ALL {
        table.push_str(&format!("  {}  {}\n", kind.selector(), kind.description()));
    }
    table.push_str("\nCommand 7 exists on the Moitessier driver only.\n");
    table
}

// --- Main Entry Point ---

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let stdout = io::stdout();
    if let Err(e) = run(&args, &mut stdout.lock()) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

/// Validates the invocation and compiles any config file before the device
/// node is opened, so bad input never reaches the driver.
fn run<W: Write>(args: &Args, out: &mut W) -> anyhow::Result<()> {
    let generation = Generation::from(args.generation);
    let command =
        prepare_command::<_, io::Error>(generation, args.command, &args.params, args.format.format())?;

    let channel = IoctlChannel::open(&args.device)
        .with_context(|| format!("could not open device {}", args.device.display()))?;
    let mut controller = HatController::new(channel, generation);
    let outcome = controller.execute(&command)?;

    render(&outcome, out).context("could not write output")?;
    out.flush()?;
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}
