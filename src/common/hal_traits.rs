// src/common/hal_traits.rs

use super::command::OpCode;
use core::fmt::Debug;

/// Size of the buffer shared with the driver for every exchange.
pub const CONTROL_BUFFER_LEN: usize = 1024;

/// The request/response buffer. The request payload sits at offset 0 and the
/// driver overwrites the buffer in place with its answer.
pub type ControlBuffer = [u8; CONTROL_BUFFER_LEN];

/// Abstraction for the driver's control channel.
///
/// One call is one ioctl-style round trip: the driver receives the op code
/// and the buffer, may mutate the buffer, and returns a status code. At most
/// one exchange is in flight at a time.
pub trait ControlChannel {
    /// Associated error type for failed exchanges.
    type Error: Debug;

    /// Performs one exchange.
    ///
    /// Returns the driver's non-negative return value on success. A failed
    /// exchange (negative return, closed handle, ...) is an `Err`; the caller
    /// must not decode the buffer in that case.
    fn exchange(&mut self, op: OpCode, buffer: &mut ControlBuffer) -> Result<i32, Self::Error>;
}

impl<T: ControlChannel + ?Sized> ControlChannel for &mut T {
    type Error = T::Error;

    fn exchange(&mut self, op: OpCode, buffer: &mut ControlBuffer) -> Result<i32, Self::Error> {
        (**self).exchange(op, buffer)
    }
}
