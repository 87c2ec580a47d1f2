// src/controller/render.rs

//! Operator-facing text for each [`Outcome`].

use std::io::{self, Write};

use super::Outcome;
use crate::common::{InfoRecord, InfoStatus, ReceiverConfig, SimulatorConfig, StatisticsRecord};

const SYSTEM_ERRORS_BANNER: &str = "\n\n***** SYSTEM ERRORS HAVE OCCURRED *****\n\n";

/// Writes the text the operator sees for `outcome`.
pub fn render<W: Write>(outcome: &Outcome, out: &mut W) -> io::Result<()> {
    match outcome {
        Outcome::Statistics(stats) => render_statistics(stats, out),
        Outcome::Info(InfoStatus::NotReady) => writeln!(out, "Data is not valid yet!!!"),
        Outcome::Info(InfoStatus::Ready(info)) => render_info(info, out),
        Outcome::Reset => Ok(()),
        Outcome::StatisticsReset => writeln!(out, "statistics reset"),
        Outcome::GnssEnabled(enabled) => writeln!(out, "GNSS enabled = {}", u8::from(*enabled)),
        Outcome::Configured(config) => {
            writeln!(out, "configuration set")?;
            for (i, receiver) in config.receivers.iter().enumerate() {
                render_receiver(i, receiver, out)?;
            }
            render_simulator(&config.simulator, out)?;
            writeln!(out, "misc")?;
            writeln!(out, "\twrite protection ID EEPROM:\t {}", config.eeprom_write_protect)
        }
        Outcome::EepromWriteProtect(enabled) => {
            writeln!(out, "ID EEPROM write protection = {}", u8::from(*enabled))
        }
        Outcome::GnssMessageConfig(mask) => writeln!(out, "GNSS message configuration = {}", mask),
    }
}

fn render_statistics<W: Write>(stats: &StatisticsRecord, out: &mut W) -> io::Result<()> {
    for (name, value) in stats.counters() {
        writeln!(out, "{} - {}", name, value)?;
    }
    Ok(())
}

fn render_receiver<W: Write>(index: usize, config: &ReceiverConfig, out: &mut W) -> io::Result<()> {
    writeln!(out, "receiver {}", index + 1)?;
    writeln!(out, "\tchannel frequency 1 [Hz]:\t {}", config.channel_freq[0])?;
    writeln!(out, "\tchannel frequency 2 [Hz]:\t {}", config.channel_freq[1])?;
    writeln!(out, "\ttcxo frequency [Hz]:\t\t {}", config.tcxo_freq)?;
    writeln!(out, "\tmeta data mask:\t\t\t 0x{:02x}", config.meta_data_mask)?;
    writeln!(out, "\tafc range [Hz]:\t\t\t {}", config.afc_range)
}

fn render_simulator<W: Write>(simulator: &SimulatorConfig, out: &mut W) -> io::Result<()> {
    writeln!(out, "simulator")?;
    writeln!(out, "\tenabled:\t\t\t {}", simulator.enabled)?;
    writeln!(out, "\tinterval:\t\t\t {}", simulator.interval)?;
    writeln!(out, "\tmmsi:\t\t\t\t {:09} {:09}", simulator.mmsi[0], simulator.mmsi[1])
}

fn render_info<W: Write>(info: &InfoRecord, out: &mut W) -> io::Result<()> {
    writeln!(out, "mode - {}", char::from(info.mode))?;
    writeln!(out, "hardware ID - {}", info.hardware_id())?;
    writeln!(out, "hardware version - {}", info.hardware_version())?;
    writeln!(out, "boot version - {}", info.bootloader_version())?;
    writeln!(out, "app version - {}", info.app_version())?;
    if let Some(ext) = &info.extended {
        writeln!(out, "gnss version - {}", ext.gnss_version())?;
    }
    writeln!(out, "functionality - 0x{:08x}", info.functionality)?;
    writeln!(out, "system errors - 0x{:08x}", info.system_errors)?;
    writeln!(out, "serial - {:08x}{:08x}{:08x}", info.serial.h, info.serial.m, info.serial.l)?;

    for (i, receiver) in info.receivers.iter().enumerate() {
        render_receiver(i, &receiver.config, out)?;
        writeln!(out, "\tdefault afc range [Hz]:\t\t {}", receiver.config.afc_range_default)?;
        writeln!(out, "\trng:\t\t\t\t 0x{:02x} 0x{:02x}", receiver.rng[0], receiver.rng[1])?;
    }
    render_simulator(&info.simulator, out)?;

    writeln!(out, "misc")?;
    writeln!(out, "\twrite protection ID EEPROM:\t {}", info.eeprom_write_protect)?;
    if let Some(ext) = &info.extended {
        writeln!(out, "\twrite button pressed:\t\t {}", ext.button_pressed)?;
        writeln!(out, "\tgnss satellite systems:\t\t {}", ext.gnss_systems)?;
    }

    if info.has_system_errors() {
        write!(out, "{}", SYSTEM_ERRORS_BANNER)?;
    }
    Ok(())
}
