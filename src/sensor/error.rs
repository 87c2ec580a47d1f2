// src/sensor/error.rs

use core::fmt::Debug;

/// Failure while talking to one of the board's I2C sensors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SensorError<E>
where
    E: Debug,
{
    /// The bus transfer failed.
    #[error("I2C transfer failed: {0:?}")]
    Bus(E),

    /// The factory calibration table does not match its CRC-4; no reading
    /// may be computed from it.
    #[error("PROM CRC invalid (stored 0x{stored:x}, computed 0x{computed:x})")]
    CalibrationCrc { stored: u8, computed: u8 },

    /// The identification register holds an unexpected value.
    #[error("unexpected device ID 0x{found:02X} (expected {expected})")]
    UnknownDevice { expected: &'static str, found: u8 },
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;
    use heapless::String as HeaplessString;

    #[test]
    fn test_messages() {
        let mut out = HeaplessString::<64>::new();
        write!(out, "{}", SensorError::<()>::CalibrationCrc { stored: 8, computed: 0xb }).unwrap();
        assert_eq!(out.as_str(), "PROM CRC invalid (stored 0x8, computed 0xb)");

        out.clear();
        write!(out, "{}", SensorError::<()>::UnknownDevice { expected: "ITG-3200", found: 0x68 }).unwrap();
        assert_eq!(out.as_str(), "unexpected device ID 0x68 (expected ITG-3200)");
    }
}
