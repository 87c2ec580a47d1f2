// src/sensor/linux_i2c.rs

//! `embedded-hal` bus and delay on top of Linux `i2c-dev`.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{self, ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use log::{debug, info};

/// `I2C_SLAVE` from `<linux/i2c-dev.h>`.
const I2C_SLAVE: libc::c_ulong = 0x0703;

/// I/O failure on the bus device.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct I2cDevError(#[from] pub io::Error);

impl i2c::Error for I2cDevError {
    fn kind(&self) -> ErrorKind {
        match self.0.raw_os_error() {
            Some(libc::ENXIO) | Some(libc::EREMOTEIO) => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown),
            Some(libc::EAGAIN) => ErrorKind::ArbitrationLoss,
            _ => ErrorKind::Other,
        }
    }
}

/// An opened `/dev/i2c-N`. Each read and write is its own bus transfer.
#[derive(Debug)]
pub struct LinuxI2c {
    file: File,
    path: PathBuf,
    address: Option<u8>,
}

impl LinuxI2c {
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        info!("opening I2C bus {}", path.display());
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        Ok(LinuxI2c { file, path: path.to_path_buf(), address: None })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn select(&mut self, address: u8) -> io::Result<()> {
        if self.address == Some(address) {
            return Ok(());
        }
        debug!("selecting slave 0x{:02x} on {}", address, self.path.display());
        // SAFETY: I2C_SLAVE takes the address by value; no memory is shared.
        let ret = unsafe { libc::ioctl(self.file.as_raw_fd(), I2C_SLAVE as _, libc::c_ulong::from(address)) };
        if ret < 0 {
            return Err(io::Error::last_os_error());
        }
        self.address = Some(address);
        Ok(())
    }
}

fn short_transfer(what: &str, done: usize, wanted: usize) -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, format!("short {}: {} of {} bytes", what, done, wanted))
}

impl ErrorType for LinuxI2c {
    type Error = I2cDevError;
}

impl I2c for LinuxI2c {
    fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
        self.select(address)?;
        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    let n = self.file.write(bytes)?;
                    if n != bytes.len() {
                        return Err(short_transfer("write", n, bytes.len()).into());
                    }
                }
                Operation::Read(buf) => {
                    let n = self.file.read(buf)?;
                    if n != buf.len() {
                        return Err(short_transfer("read", n, buf.len()).into());
                    }
                }
            }
        }
        Ok(())
    }
}

/// Blocking delay on the calling thread.
#[derive(Debug, Default, Copy, Clone)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(u64::from(ns)));
    }
}
