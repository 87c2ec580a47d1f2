// src/sensor/si7020.rs

//! Si7020-A20 relative humidity and temperature sensor.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use super::{command_read, wait, write, SensorError};
use crate::common::timing;

pub const DEFAULT_ADDRESS: u8 = 0x40;

// No-hold-master variants only.
const CMD_MEASURE_RH: u8 = 0xF5;
const CMD_MEASURE_TEMP: u8 = 0xF3;
const CMD_READ_TEMP_FROM_RH: u8 = 0xE0;
const CMD_READ_FW_REV: [u8; 2] = [0x84, 0xB8];

/// One humidity sample.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HumidityReading {
    /// Temperature from a dedicated temperature conversion, °C.
    pub temperature_c: f64,
    /// Relative humidity, %RH. Not clamped to 0..=100.
    pub relative_humidity: f64,
    /// Temperature measured during the humidity conversion, °C.
    pub rh_temperature_c: f64,
}

/// Converts a temperature code to °C.
pub fn temperature_from_code(code: u16) -> f64 {
    175.72 * f64::from(code) / 65536.0 - 46.85
}

/// Converts a humidity code to %RH.
pub fn humidity_from_code(code: u16) -> f64 {
    125.0 * f64::from(code) / 65536.0 - 6.0
}

/// Si7020 on an I2C bus.
#[derive(Debug)]
pub struct Si7020<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
}

impl<I2C, D> Si7020<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    pub fn new(i2c: I2C, delay: D, address: u8) -> Self {
        Si7020 { i2c, delay, address }
    }

    /// Firmware revision byte (0xFF = 1.0, 0x20 = 2.0).
    pub fn firmware_revision(&mut self) -> Result<u8, SensorError<I2C::Error>> {
        let [rev] = command_read::<_, 1>(&mut self.i2c, self.address, &CMD_READ_FW_REV)?;
        Ok(rev)
    }

    /// Temperature conversion, °C.
    pub fn temperature(&mut self) -> Result<f64, SensorError<I2C::Error>> {
        let code = self.convert(CMD_MEASURE_TEMP, timing::SI7020_TEMP_CONVERSION)?;
        Ok(temperature_from_code(code))
    }

    /// Temperature conversion followed by a humidity conversion.
    pub fn measure(&mut self) -> Result<HumidityReading, SensorError<I2C::Error>> {
        let temperature_c = self.temperature()?;
        let rh_code = self.convert(CMD_MEASURE_RH, timing::SI7020_RH_CONVERSION)?;
        let temp_code: [u8; 2] = command_read(&mut self.i2c, self.address, &[CMD_READ_TEMP_FROM_RH])?;
        Ok(HumidityReading {
            temperature_c,
            relative_humidity: humidity_from_code(rh_code),
            rh_temperature_c: temperature_from_code(u16::from_be_bytes(temp_code)),
        })
    }

    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn convert(&mut self, command: u8, duration: core::time::Duration) -> Result<u16, SensorError<I2C::Error>> {
        write(&mut self.i2c, self.address, &[command])?;
        wait(&mut self.delay, duration);
        let mut code = [0u8; 2];
        self.i2c.read(self.address, &mut code).map_err(SensorError::Bus)?;
        Ok(u16::from_be_bytes(code))
    }
}
