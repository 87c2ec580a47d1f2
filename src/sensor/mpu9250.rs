// src/sensor/mpu9250.rs

//! MPU-9250 / MPU-9255 IMU; only its die temperature is read.

use embedded_hal::i2c::I2c;

use super::{command_read, DeviceId, SensorError};

pub const DEFAULT_ADDRESS: u8 = 0x68;

const REG_TEMP_OUT_H: u8 = 65;
const REG_WHO_AM_I: u8 = 117;

/// Converts TEMP_OUT to °C (room temperature offset 21 °C, 333.87 LSB/°C).
///
/// TEMP_OUT is a two's complement register; it is read as signed so that
/// readings below 21 °C come out right.
pub fn temperature_from_raw(raw: i16) -> f64 {
    f64::from(raw) / 333.87 + 21.0
}

/// MPU-9250 on an I2C bus.
#[derive(Debug)]
pub struct Mpu9250<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Mpu9250<I2C> {
    pub fn new(i2c: I2C, address: u8) -> Self {
        Mpu9250 { i2c, address }
    }

    pub fn identify(&mut self) -> Result<DeviceId, SensorError<I2C::Error>> {
        let [raw] = command_read::<_, 1>(&mut self.i2c, self.address, &[REG_WHO_AM_I])?;
        let part = match raw {
            0x71 => Some("MPU-9250"),
            0x73 => Some("MPU-9255"),
            _ => None,
        };
        Ok(DeviceId { raw, part })
    }

    /// Die temperature, °C.
    pub fn temperature(&mut self) -> Result<f64, SensorError<I2C::Error>> {
        let raw: [u8; 2] = command_read(&mut self.i2c, self.address, &[REG_TEMP_OUT_H])?;
        Ok(temperature_from_raw(i16::from_be_bytes(raw)))
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::mock::MockI2c;

    #[test]
    fn test_identify_variants() {
        let mut i2c = MockI2c::default();
        i2c.stage(&[0x71]);
        i2c.stage(&[0x73]);
        i2c.stage(&[0x00]);
        let mut imu = Mpu9250::new(i2c, DEFAULT_ADDRESS);
        assert_eq!(imu.identify().unwrap().part, Some("MPU-9250"));
        assert_eq!(imu.identify().unwrap().part, Some("MPU-9255"));
        assert_eq!(imu.identify().unwrap(), DeviceId { raw: 0, part: None });
        assert_eq!(imu.release().written(), vec![vec![117], vec![117], vec![117]]);
    }

    #[test]
    fn test_temperature() {
        let mut i2c = MockI2c::default();
        i2c.stage(&1000i16.to_be_bytes());
        i2c.stage(&(-334i16).to_be_bytes());
        let mut imu = Mpu9250::new(i2c, DEFAULT_ADDRESS);
        assert!((imu.temperature().unwrap() - 23.995_177_763_8).abs() < 1e-6);
        assert!(imu.temperature().unwrap() < 20.0);
    }
}
