// src/sensor/mod.rs

//! Drivers for the I2C sensors on the HAT.
//!
//! All drivers are generic over the `embedded-hal` 1.0 blocking traits, so
//! they run against `/dev/i2c-N` (see `linux_i2c`) or any other bus. Every
//! transfer is a plain write followed by a separate read: the Raspberry Pi
//! I2C controller does not support clock stretching, so no hold-master
//! commands or repeated starts are used. Nothing is retried.

pub mod error;
pub mod itg3200;
pub mod mpu9250;
pub mod ms5607;
pub mod si7020;

#[cfg(feature = "linux")]
pub mod linux_i2c;

pub use error::SensorError;
pub use itg3200::Itg3200;
pub use mpu9250::Mpu9250;
pub use ms5607::{compensate, Ms5607, PressureReading};
pub use si7020::{HumidityReading, Si7020};

#[cfg(feature = "linux")]
pub use linux_i2c::{I2cDevError, LinuxI2c, StdDelay};

use core::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::common::timing::delay_chunks_ns;

/// Identification register readout.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DeviceId {
    pub raw: u8,
    /// Part name when the value is one the driver knows.
    pub part: Option<&'static str>,
}

impl DeviceId {
    /// Fails with `UnknownDevice` unless the part was recognised.
    pub fn ensure_known<E: core::fmt::Debug>(self, expected: &'static str) -> Result<&'static str, SensorError<E>> {
        self.part.ok_or(SensorError::UnknownDevice { expected, found: self.raw })
    }
}

// --- Bus helpers shared by the drivers ---

pub(crate) fn write<I2C: I2c>(i2c: &mut I2C, address: u8, bytes: &[u8]) -> Result<(), SensorError<I2C::Error>> {
    i2c.write(address, bytes).map_err(SensorError::Bus)
}

/// Writes `command`, then reads `N` bytes in a separate transfer.
pub(crate) fn command_read<I2C: I2c, const N: usize>(
    i2c: &mut I2C,
    address: u8,
    command: &[u8],
) -> Result<[u8; N], SensorError<I2C::Error>> {
    write(i2c, address, command)?;
    let mut buf = [0u8; N];
    i2c.read(address, &mut buf).map_err(SensorError::Bus)?;
    Ok(buf)
}

pub(crate) fn wait<D: DelayNs>(delay: &mut D, duration: Duration) {
    for ns in delay_chunks_ns(duration) {
        delay.delay_ns(ns);
    }
}

// --- Test Doubles ---
#[cfg(test)]
pub(crate) mod mock {
    use embedded_hal::delay::DelayNs;
    use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};
    use std::collections::VecDeque;
    use std::vec::Vec;

    // Logs writes and serves staged reads in order.
    #[derive(Debug, Default)]
    pub(crate) struct MockI2c {
        pub(crate) writes: Vec<(u8, Vec<u8>)>,
        pub(crate) reads: VecDeque<Vec<u8>>,
        pub(crate) fail: bool,
    }

    impl MockI2c {
        pub(crate) fn stage(&mut self, bytes: &[u8]) {
            self.reads.push_back(bytes.to_vec());
        }

        pub(crate) fn written(&self) -> Vec<Vec<u8>> {
            self.writes.iter().map(|(_, bytes)| bytes.clone()).collect()
        }
    }

    impl ErrorType for MockI2c {
        type Error = ErrorKind;
    }

    impl I2c for MockI2c {
        fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            for op in operations {
                match op {
                    Operation::Write(bytes) => self.writes.push((address, bytes.to_vec())),
                    Operation::Read(buf) => {
                        let staged = self.reads.pop_front().ok_or(ErrorKind::Other)?;
                        assert_eq!(staged.len(), buf.len(), "staged read has the wrong length");
                        buf.copy_from_slice(&staged);
                    }
                }
            }
            Ok(())
        }
    }

    #[derive(Debug, Default)]
    pub(crate) struct MockDelay {
        pub(crate) total_ns: u64,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
        }
    }
}
