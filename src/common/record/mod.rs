// src/common/record/mod.rs

//! Fixed-layout records shared with the kernel driver.
//!
//! The driver exchanges plain C structs, so every record is laid out the way
//! a C compiler lays it out: fields in declaration order, each aligned to its
//! natural alignment, padding zero-filled, integers in native byte order.
//! Encoding and decoding are explicit and bounds-checked; nothing here
//! reinterprets raw memory.

pub mod info;
pub mod receiver;
pub mod statistics;

pub use info::{InfoExtension, InfoRecord, InfoStatus, ReceiverInfo, SerialNumber};
pub use receiver::{ConfigHat, ReceiverConfig, SimulatorConfig};
pub use statistics::StatisticsRecord;

use super::error::CodecError;

/// Number of receivers on the board.
pub const NUM_RECEIVERS: usize = 2;
/// Number of channels per receiver.
pub const NUM_RCV_CHANNELS: usize = 2;

/// A record with a fixed wire size.
pub trait WireRecord: Sized {
    /// Encoded size in bytes, including trailing padding.
    const SIZE: usize;
    /// Alignment of the record when nested in another record.
    const ALIGN: usize;

    /// Writes the fields; the writer is positioned at the (aligned) record start.
    fn write_fields(&self, w: &mut WireWriter<'_>);

    /// Reads the fields; the reader is positioned at the (aligned) record start.
    fn read_fields(r: &mut WireReader<'_>) -> Self;

    /// Encodes the record into the first `SIZE` bytes of `out`.
    fn encode_into(&self, out: &mut [u8]) -> Result<(), CodecError> {
        check_len(Self::SIZE, out.len())?;
        let mut w = WireWriter::new(&mut out[..Self::SIZE]);
        w.record(self);
        Ok(())
    }

    /// Decodes the record from the first `SIZE` bytes of `bytes`. Field
    /// values are not range-checked.
    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        check_len(Self::SIZE, bytes.len())?;
        let mut r = WireReader::new(&bytes[..Self::SIZE]);
        Ok(r.record())
    }
}

#[inline]
pub(crate) fn check_len(needed: usize, got: usize) -> Result<(), CodecError> {
    if got < needed {
        Err(CodecError::BufferTooShort { needed, got })
    } else {
        Ok(())
    }
}

#[inline]
const fn align_up(pos: usize, align: usize) -> usize {
    (pos + align - 1) / align * align
}

/// Sequential writer over a buffer already checked to hold the record.
#[derive(Debug)]
pub struct WireWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> WireWriter<'a> {
    pub(crate) fn new(buf: &'a mut [u8]) -> Self {
        WireWriter { buf, pos: 0 }
    }

    /// Current offset from the start of the outermost record.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn pad_to(&mut self, end: usize) {
        self.buf[self.pos..end].fill(0);
        self.pos = end;
    }

    fn align(&mut self, align: usize) {
        let end = align_up(self.pos, align);
        self.pad_to(end);
    }

    pub fn put_u8(&mut self, value: u8) {
        self.buf[self.pos] = value;
        self.pos += 1;
    }

    pub fn put_bool(&mut self, value: bool) {
        self.put_u8(u8::from(value));
    }

    pub fn put_u32(&mut self, value: u32) {
        self.put_aligned(&value.to_ne_bytes());
    }

    pub fn put_u64(&mut self, value: u64) {
        self.put_aligned(&value.to_ne_bytes());
    }

    /// Byte array field (alignment 1).
    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }

    /// Nested record, aligned and padded to its own size.
    pub fn record<R: WireRecord>(&mut self, record: &R) {
        self.align(R::ALIGN);
        let end = self.pos + R::SIZE;
        record.write_fields(self);
        self.pad_to(end);
    }

    fn put_aligned(&mut self, bytes: &[u8]) {
        self.align(bytes.len());
        self.put_bytes(bytes);
    }
}

/// Sequential reader over a buffer already checked to hold the record.
#[derive(Debug)]
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        WireReader { buf, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    fn align(&mut self, align: usize) {
        self.pos = align_up(self.pos, align);
    }

    pub fn u8(&mut self) -> u8 {
        let value = self.buf[self.pos];
        self.pos += 1;
        value
    }

    /// C `bool`: any non-zero byte is true.
    pub fn bool(&mut self) -> bool {
        self.u8() != 0
    }

    pub fn u32(&mut self) -> u32 {
        u32::from_ne_bytes(self.aligned_array())
    }

    pub fn u64(&mut self) -> u64 {
        u64::from_ne_bytes(self.aligned_array())
    }

    /// Byte array field (alignment 1).
    pub fn bytes<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.pos..self.pos + N]);
        self.pos += N;
        out
    }

    /// Nested record, aligned, skipping its trailing padding.
    pub fn record<R: WireRecord>(&mut self) -> R {
        self.align(R::ALIGN);
        let end = self.pos + R::SIZE;
        let record = R::read_fields(self);
        self.pos = end;
        record
    }

    fn aligned_array<const N: usize>(&mut self) -> [u8; N] {
        self.align(N);
        self.bytes()
    }
}

/// Interprets a NUL-padded text field, stopping at the first NUL. Invalid
/// UTF-8 truncates the text at the first bad byte.
pub fn fixed_str(bytes: &[u8]) -> &str {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    let text = &bytes[..end];
    match core::str::from_utf8(text) {
        Ok(s) => s,
        Err(e) => core::str::from_utf8(&text[..e.valid_up_to()]).unwrap_or_default(),
    }
}

/// Copies `text` into a NUL-padded field, truncating if it does not fit.
pub fn to_fixed<const N: usize>(text: &str) -> [u8; N] {
    let mut out = [0u8; N];
    let len = text.len().min(N);
    out[..len].copy_from_slice(&text.as_bytes()[..len]);
    out
}
