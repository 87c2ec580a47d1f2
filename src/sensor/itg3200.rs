// src/sensor/itg3200.rs

//! ITG-3200 gyroscope; only its die temperature is read.

use embedded_hal::i2c::I2c;

use super::{command_read, DeviceId, SensorError};

pub const DEFAULT_ADDRESS: u8 = 0x68;

const REG_WHO_AM_I: u8 = 0x00;
const REG_TEMP_OUT_H: u8 = 0x1B;

/// WHO_AM_I holds the 7-bit address bits 6..1, which read back as 0x69 on
/// the HAT.
const EXPECTED_ID: u8 = 0x69;

/// Converts the signed temperature register to °C.
pub fn temperature_from_raw(raw: i16) -> f64 {
    f64::from(raw) / 280.0 + 82.142857
}

/// ITG-3200 on an I2C bus.
#[derive(Debug)]
pub struct Itg3200<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Itg3200<I2C> {
    pub fn new(i2c: I2C, address: u8) -> Self {
        Itg3200 { i2c, address }
    }

    pub fn identify(&mut self) -> Result<DeviceId, SensorError<I2C::Error>> {
        let [raw] = command_read::<_, 1>(&mut self.i2c, self.address, &[REG_WHO_AM_I])?;
        let part = (raw == EXPECTED_ID).then_some("ITG-3200");
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
    fn test_identify() {
        let mut i2c = MockI2c::default();
        i2c.stage(&[0x69]);
        i2c.stage(&[0x34]);
        let mut gyro = Itg3200::new(i2c, DEFAULT_ADDRESS);

        let id = gyro.identify().unwrap();
        assert_eq!(id, DeviceId { raw: 0x69, part: Some("ITG-3200") });
        assert_eq!(id.ensure_known::<()>("ITG-3200"), Ok("ITG-3200"));

        let other = gyro.identify().unwrap();
        assert_eq!(other.part, None);
        assert_eq!(
            other.ensure_known::<()>("ITG-3200"),
            Err(SensorError::UnknownDevice { expected: "ITG-3200", found: 0x34 })
        );
    }

    #[test]
    fn test_negative_temperature_register() {
        let mut i2c = MockI2c::default();
        i2c.stage(&(-2000i16).to_be_bytes());
        let mut gyro = Itg3200::new(i2c, DEFAULT_ADDRESS);
        let temp = gyro.temperature().unwrap();
        assert!((temp - 74.999_999_857).abs() < 1e-6);
        assert_eq!(gyro.release().written(), vec![vec![0x1B]]);
    }
}
