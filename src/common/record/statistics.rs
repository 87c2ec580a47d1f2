// src/common/record/statistics.rs

use super::{WireReader, WireRecord, WireWriter};

/// Driver counters returned by command 0. They only grow until command 3
/// resets them.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct StatisticsRecord {
    pub spi_cycles: u64,
    pub total_rx_payload_bytes: u64,
    pub fifo_overflows: u64,
    pub fifo_bytes_processed: u64,
    pub payload_crc_errors: u64,
    pub header_crc_errors: u64,
    pub keep_alive_errors: u64,
}

impl StatisticsRecord {
    /// Counter names (as the driver documents them) and values in wire order.
    pub fn counters(&self) -> [(&'static str, u64); 7] {
        [
            ("spiCycles", self.spi_cycles),
            ("totalRxPayloadBytes", self.total_rx_payload_bytes),
            ("fifoOverflows", self.fifo_overflows),
            ("fifoBytesProcessed", self.fifo_bytes_processed),
            ("payloadCrcErrors", self.payload_crc_errors),
            ("headerCrcErrors", self.header_crc_errors),
            ("keepAliveErrors", self.keep_alive_errors),
        ]
    }
}

impl WireRecord for StatisticsRecord {
    const SIZE: usize = 56;
    const ALIGN: usize = 8;

    fn write_fields(&self, w: &mut WireWriter<'_>) {
        for (_, value) in self.counters() {
            w.put_u64(value);
        }
    }

    fn read_fields(r: &mut WireReader<'_>) -> Self {
        StatisticsRecord {
            spi_cycles: r.u64(),
            total_rx_payload_bytes: r.u64(),
            fifo_overflows: r.u64(),
            fifo_bytes_processed: r.u64(),
            payload_crc_errors: r.u64(),
            header_crc_errors: r.u64(),
            keep_alive_errors: r.u64(),
        }
    }
}
