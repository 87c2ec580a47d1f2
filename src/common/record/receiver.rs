// src/common/record/receiver.rs

//! Receiver, simulator and whole-board configuration records.

use super::{WireReader, WireRecord, WireWriter, NUM_RCV_CHANNELS, NUM_RECEIVERS};

/// Configuration of one AIS receiver (two channels).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct ReceiverConfig {
    /// Selects the meta data the receiver attaches to each sentence.
    pub meta_data_mask: u8,
    /// AFC range in Hz.
    pub afc_range: u32,
    /// Not configurable; the compiler always leaves it at 0.
    pub afc_range_default: u32,
    /// Nominal TCXO frequency in Hz.
    pub tcxo_freq: u32,
    /// Channel frequencies in Hz.
    pub channel_freq: [u32; NUM_RCV_CHANNELS],
}

impl WireRecord for ReceiverConfig {
    const SIZE: usize = 24;
    const ALIGN: usize = 4;

    fn write_fields(&self, w: &mut WireWriter<'_>) {
        w.put_u8(self.meta_data_mask);
        w.put_u32(self.afc_range);
        w.put_u32(self.afc_range_default);
        w.put_u32(self.tcxo_freq);
        for freq in self.channel_freq {
            w.put_u32(freq);
        }
    }

    fn read_fields(r: &mut WireReader<'_>) -> Self {
        ReceiverConfig {
            meta_data_mask: r.u8(),
            afc_range: r.u32(),
            afc_range_default: r.u32(),
            tcxo_freq: r.u32(),
            channel_freq: [r.u32(), r.u32()],
        }
    }
}

/// AIS simulator settings.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct SimulatorConfig {
    /// Simulated MMSI per channel. Both slots are sent even when disabled.
    pub mmsi: [u32; NUM_RCV_CHANNELS],
    /// Non-zero enables the simulator.
    pub enabled: u32,
    /// Transmit interval in seconds.
    pub interval: u32,
}

impl WireRecord for SimulatorConfig {
    const SIZE: usize = 16;
    const ALIGN: usize = 4;

    fn write_fields(&self, w: &mut WireWriter<'_>) {
        for mmsi in self.mmsi {
            w.put_u32(mmsi);
        }
        w.put_u32(self.enabled);
        w.put_u32(self.interval);
    }

    fn read_fields(r: &mut WireReader<'_>) -> Self {
        SimulatorConfig {
            mmsi: [r.u32(), r.u32()],
            enabled: r.u32(),
            interval: r.u32(),
        }
    }
}

/// The byte image sent with the configure command.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct ConfigHat {
    pub receivers: [ReceiverConfig; NUM_RECEIVERS],
    pub simulator: SimulatorConfig,
    /// Non-zero enables the ID EEPROM write protection.
    pub eeprom_write_protect: u8,
}

impl ConfigHat {
    /// Encodes the record into a fresh array of exactly `SIZE` bytes.
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        let mut w = WireWriter::new(&mut out);
        w.record(self);
        out
    }
}

impl WireRecord for ConfigHat {
    const SIZE: usize = 68;
    const ALIGN: usize = 4;

    fn write_fields(&self, w: &mut WireWriter<'_>) {
        for receiver in &self.receivers {
            w.record(receiver);
        }
        w.record(&self.simulator);
        w.put_u8(self.eeprom_write_protect);
    }

    fn read_fields(r: &mut WireReader<'_>) -> Self {
        ConfigHat {
            receivers: [r.record(), r.record()],
            simulator: r.record(),
            eeprom_write_protect: r.u8(),
        }
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn sample() -> ConfigHat {
        ConfigHat {
            receivers: [
                ReceiverConfig {
                    meta_data_mask: 0x01,
                    afc_range: 2000,
                    afc_range_default: 0,
                    tcxo_freq: 26_000_000,
                    channel_freq: [161_975_000, 162_025_000],
                },
                ReceiverConfig {
                    meta_data_mask: 0xFF,
                    afc_range: 1500,
                    afc_range_default: 0,
                    tcxo_freq: 26_000_003,
                    channel_freq: [156_025_000, 157_425_000],
                },
            ],
            simulator: SimulatorConfig {
                mmsi: [111_111_111, 222_222_222],
                enabled: 1,
                interval: 5,
            },
            eeprom_write_protect: 1,
        }
    }

    fn random_receiver(rng: &mut StdRng) -> ReceiverConfig {
        ReceiverConfig {
            meta_data_mask: rng.gen(),
            afc_range: rng.gen(),
            afc_range_default: rng.gen(),
            tcxo_freq: rng.gen(),
            channel_freq: [rng.gen(), rng.gen()],
        }
    }

    #[test]
    fn test_config_offsets() {
        let config = sample();
        let bytes = config.to_bytes();
        assert_eq!(bytes.len(), 68);

        // receiver 0
        assert_eq!(bytes[0], 0x01);
        assert_eq!(&bytes[1..4], &[0, 0, 0]);
        assert_eq!(&bytes[4..8], &2000u32.to_ne_bytes());
        assert_eq!(&bytes[8..12], &0u32.to_ne_bytes());
        assert_eq!(&bytes[12..16], &26_000_000u32.to_ne_bytes());
        assert_eq!(&bytes[16..20], &161_975_000u32.to_ne_bytes());
        assert_eq!(&bytes[20..24], &162_025_000u32.to_ne_bytes());
        // receiver 1
        assert_eq!(bytes[24], 0xFF);
        assert_eq!(&bytes[44..48], &157_425_000u32.to_ne_bytes());
        // simulator
        assert_eq!(&bytes[48..52], &111_111_111u32.to_ne_bytes());
        assert_eq!(&bytes[52..56], &222_222_222u32.to_ne_bytes());
        assert_eq!(&bytes[56..60], &1u32.to_ne_bytes());
        assert_eq!(&bytes[60..64], &5u32.to_ne_bytes());
        // write protection and tail padding
        assert_eq!(bytes[64], 1);
        assert_eq!(&bytes[65..68], &[0, 0, 0]);
    }

    #[test]
    fn test_to_bytes_matches_encode_into() {
        let config = sample();
        let mut buf = [0xAAu8; 100];
        config.encode_into(&mut buf).unwrap();
        assert_eq!(&buf[..68], &config.to_bytes()[..]);
        assert_eq!(&buf[68..], &[0xAA; 32]);
    }

    #[test]
    fn test_config_round_trip_fuzz() {
        let mut rng = StdRng::seed_from_u64(0x4E41_5648);
        for _ in 0..500 {
            let config = ConfigHat {
                receivers: [random_receiver(&mut rng), random_receiver(&mut rng)],
                simulator: SimulatorConfig {
                    mmsi: [rng.gen(), rng.gen()],
                    enabled: rng.gen(),
                    interval: rng.gen(),
                },
                eeprom_write_protect: rng.gen(),
            };
            let bytes = config.to_bytes();
            assert_eq!(ConfigHat::decode(&bytes).unwrap(), config);
        }
    }

    #[test]
    fn test_decode_ignores_padding_content() {
        let config = sample();
        let mut bytes = config.to_bytes();
        bytes[1] = 0x5A;
        bytes[66] = 0x5A;
        assert_eq!(ConfigHat::decode(&bytes).unwrap(), config);
    }

    #[test]
    fn test_decode_short_buffer() {
        let bytes = [0u8; 67];
        assert!(ConfigHat::decode(&bytes).is_err());
        assert!(ReceiverConfig::decode(&bytes[..23]).is_err());
        assert!(SimulatorConfig::decode(&bytes[..16]).is_ok());
    }
}
