// src/common/timing.rs

use core::time::Duration;

// Nominal values from the sensor datasheets. Drivers wait at least this long;
// none of them poll a ready flag.

// === MS5607-02BA03 ===

/// Conversion time at OSR 4096 is 9.04 ms max; the board tools wait 100 ms.
pub const MS5607_CONVERSION: Duration = Duration::from_millis(100);

// === Si7020-A20 ===

/// Worst-case RH conversion (12 bit, 12 ms) plus temperature (14 bit, 10.8 ms).
pub const SI7020_RH_CONVERSION: Duration = Duration::from_millis(25);
/// Worst-case temperature conversion at 14 bit.
pub const SI7020_TEMP_CONVERSION: Duration = Duration::from_millis(11);

// === Polling ===

/// Default pause between two samples of the polling tool.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Splits a duration into the `u32` nanosecond chunks `DelayNs` accepts.
pub fn delay_chunks_ns(duration: Duration) -> impl Iterator<Item = u32> {
    let total = duration.as_nanos();
    let full = (total / u128::from(u32::MAX)) as u64;
    let rest = (total % u128::from(u32::MAX)) as u32;
    (0..full).map(|_| u32::MAX).chain(core::iter::once(rest).filter(|&ns| ns > 0))
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_delay_is_one_chunk() {
        let mut chunks = delay_chunks_ns(MS5607_CONVERSION);
        assert_eq!(chunks.next(), Some(100_000_000));
        assert_eq!(chunks.next(), None);
    }

    #[test]
    fn test_long_delay_is_split() {
        let total: u64 = delay_chunks_ns(Duration::from_secs(10)).map(u64::from).sum();
        assert_eq!(total, 10_000_000_000);
        assert_eq!(delay_chunks_ns(Duration::from_secs(10)).count(), 3);
    }

    #[test]
    fn test_zero_delay_is_empty() {
        assert_eq!(delay_chunks_ns(Duration::ZERO).count(), 0);
    }
}
