// src/bin/hat-sensors.rs

//! Polls one of the I2C sensors on the HAT and prints its readings.
//!
//! ```bash
//! hat-sensors ms5607                       # pressure, once a second, forever
//! hat-sensors si7020 --iterations 0        # firmware revision only
//! hat-sensors itg3200 --bus /dev/i2c-5 --iterations 10 --csv
//! ```

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use log::{warn, LevelFilter};

use hat_ctrl::common::timing;
use hat_ctrl::sensor::{itg3200, mpu9250, ms5607, si7020, DeviceId, Itg3200, LinuxI2c, Mpu9250, Ms5607, Si7020, StdDelay};

// --- CLI Arguments ---

/// Reads the sensors soldered to the Moitessier / nav.HAT.
#[derive(Parser, Debug)]
#[command(name = "hat-sensors", version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    sensor: Sensor,

    /// I2C bus device (default depends on the sensor)
    #[arg(short, long, global = true, value_name = "PATH")]
    bus: Option<PathBuf>,

    /// 7-bit slave address (default depends on the sensor)
    #[arg(short, long, global = true, value_parser = parse_address)]
    address: Option<u8>,

    /// Number of readings; runs until interrupted if omitted
    #[arg(short = 'n', long, global = true)]
    iterations: Option<u64>,

    /// Pause between readings
    #[arg(long, global = true, default_value_t = timing::DEFAULT_POLL_INTERVAL.as_millis() as u64)]
    interval_ms: u64,

    /// Comma separated values without units
    #[arg(long, global = true)]
    csv: bool,

    /// Treat an unexpected device ID as an error
    #[arg(long, global = true)]
    strict: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug, Copy, Clone, PartialEq, Eq)]
enum Sensor {
    /// MS5607 barometric pressure sensor
    Ms5607,
    /// Si7020 humidity sensor; --iterations 0 prints the firmware revision
    Si7020,
    /// ITG-3200 gyroscope die temperature
    Itg3200,
    /// MPU-9250 IMU die temperature
    Mpu9250,
}

impl Sensor {
    fn default_bus(self) -> &'static str {
        match self {
            Sensor::Itg3200 => "/dev/i2c-5",
            _ => "/dev/i2c-1",
        }
    }

    fn default_address(self) -> u8 {
        match self {
            Sensor::Ms5607 => ms5607::DEFAULT_ADDRESS,
            Sensor::Si7020 => si7020::DEFAULT_ADDRESS,
            Sensor::Itg3200 => itg3200::DEFAULT_ADDRESS,
            Sensor::Mpu9250 => mpu9250::DEFAULT_ADDRESS,
        }
    }
}

fn parse_address(s: &str) -> Result<u8, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse::<u8>(),
    };
    match parsed {
        Ok(addr) if addr <= 0x7F => Ok(addr),
        _ => Err(format!("`{}` is not a 7-bit I2C address", s)),
    }
}

// --- Main Entry Point ---

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let bus_path = args
        .bus
        .clone()
        .unwrap_or_else(|| PathBuf::from(args.sensor.default_bus()));
    let address = args.address.unwrap_or_else(|| args.sensor.default_address());
    let bus = open_bus(&bus_path)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.sensor {
        Sensor::Ms5607 => {
            let mut sensor = Ms5607::new(bus, StdDelay, address).context("MS5607 initialisation failed")?;
            poll(args, || {
                let r = sensor.measure().context("measuring pressure failed")?;
                Ok(if args.csv {
                    format!("{:.2},{:.2}", r.pressure_mbar, r.temperature_c)
                } else {
                    format!("{:.2} mbar, {:.2} °C", r.pressure_mbar, r.temperature_c)
                })
            }, &mut out)
        }
        Sensor::Si7020 => {
            let mut sensor = Si7020::new(bus, StdDelay, address);
            if args.iterations == Some(0) {
                let rev = sensor.firmware_revision().context("communication with sensor failed")?;
                if args.csv {
                    writeln!(out, "{:02X}", rev)?;
                } else {
                    writeln!(out, "Firmware revision: 0x{:02X}", rev)?;
                }
                return Ok(());
            }
            poll(args, || {
                let r = sensor.measure().context("humidity measurement failed")?;
                Ok(if args.csv {
                    format!("{:.2},{:.2},{:.2}", r.temperature_c, r.relative_humidity, r.rh_temperature_c)
                } else {
                    format!(
                        "{:.2} °C, {:.2} %RH ({:.2} °C)",
                        r.temperature_c, r.relative_humidity, r.rh_temperature_c
                    )
                })
            }, &mut out)
        }
        Sensor::Itg3200 => {
            let mut sensor = Itg3200::new(bus, address);
            let id = sensor.identify().context("communication with sensor failed")?;
            let verdict = if id.part.is_some() { "ITG-3200 found" } else { "ITG-3200 not found" };
            report_id(args, id, "ITG-3200", verdict, &mut out)?;
            poll(args, || temperature_line(args, sensor.temperature()), &mut out)
        }
        Sensor::Mpu9250 => {
            let mut sensor = Mpu9250::new(bus, address);
            let id = sensor.identify().context("communication with sensor failed")?;
            report_id(args, id, "MPU-9250", id.part.unwrap_or("failure"), &mut out)?;
            poll(args, || temperature_line(args, sensor.temperature()), &mut out)
        }
    }
}

fn open_bus(path: &Path) -> anyhow::Result<LinuxI2c> {
    LinuxI2c::open(path).with_context(|| format!("opening {} failed", path.display()))
}

fn report_id<W: Write>(args: &Args, id: DeviceId, expected: &'static str, verdict: &str, out: &mut W) -> anyhow::Result<()> {
    if !args.csv {
        writeln!(out, "Device ID: 0x{:02X} - {}", id.raw, verdict)?;
    }
    if args.strict {
        id.ensure_known::<()>(expected)?;
    } else if id.part.is_none() {
        warn!("unexpected device ID 0x{:02X}, reading anyway", id.raw);
    }
    Ok(())
}

fn temperature_line<E: std::fmt::Debug>(
    args: &Args,
    reading: Result<f64, hat_ctrl::sensor::SensorError<E>>,
) -> anyhow::Result<String> {
    let temp = reading.map_err(|e| anyhow!("communication with sensor failed: {}", e))?;
    Ok(if args.csv { format!("{:.2}", temp) } else { format!("{:.2} °C", temp) })
}

/// Prints one line per reading, pausing between readings.
fn poll<W, F>(args: &Args, mut read: F, out: &mut W) -> anyhow::Result<()>
where
    W: Write,
    F: FnMut() -> anyhow::Result<String>,
{
    let interval = Duration::from_millis(args.interval_ms);
    let mut done = 0u64;
    while args.iterations.map_or(true, |n| done < n) {
        let line = read()?;
        writeln!(out, "{}", line)?;
        out.flush()?;
        done += 1;
        if args.iterations.map_or(true, |n| done < n) {
            thread::sleep(interval);
        }
    }
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

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let a = args(&["hat-sensors", "itg3200"]);
        assert_eq!(a.sensor, Sensor::Itg3200);
        assert_eq!(a.sensor.default_bus(), "/dev/i2c-5");
        assert_eq!(a.sensor.default_address(), 0x68);
        assert_eq!(a.interval_ms, 1000);
        assert_eq!(a.iterations, None);
        assert!(!a.csv && !a.strict);
    }

    #[test]
    fn test_address_parsing() {
        assert_eq!(parse_address("0x77"), Ok(0x77));
        assert_eq!(parse_address("64"), Ok(64));
        assert!(parse_address("0x80").is_err());
        assert!(parse_address("bus").is_err());
        let a = args(&["hat-sensors", "ms5607", "--address", "0x76", "--csv"]);
        assert_eq!(a.address, Some(0x76));
        assert!(a.csv);
    }

    #[test]
    fn test_poll_counts_iterations() {
        let a = args(&["hat-sensors", "mpu9250", "-n", "3", "--interval-ms", "0"]);
        let mut out = Vec::new();
        let mut n = 0;
        poll(&a, || {
            n += 1;
            Ok(format!("{}", n))
        }, &mut out)
        .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1\n2\n3\n");
    }

    #[test]
    fn test_poll_stops_on_first_failure() {
        let a = args(&["hat-sensors", "ms5607", "--interval-ms", "0"]);
        let mut out = Vec::new();
        let mut n = 0;
        let err = poll(&a, || {
            n += 1;
            if n == 2 { Err(anyhow!("measuring pressure failed")) } else { Ok("ok".into()) }
        }, &mut out)
        .unwrap_err();
        assert_eq!(err.to_string(), "measuring pressure failed");
        assert_eq!(out, b"ok\n");
    }

    #[test]
    fn test_strict_id_check() {
        let unknown = DeviceId { raw: 0x12, part: None };
        let mut out = Vec::new();
        let lenient = args(&["hat-sensors", "mpu9250"]);
        report_id(&lenient, unknown, "MPU-9250", "failure", &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Device ID: 0x12 - failure\n");

        let strict = args(&["hat-sensors", "mpu9250", "--strict"]);
        let err = report_id(&strict, unknown, "MPU-9250", "failure", &mut Vec::new()).unwrap_err();
        assert_eq!(err.to_string(), "unexpected device ID 0x12 (expected MPU-9250)");
    }
}
