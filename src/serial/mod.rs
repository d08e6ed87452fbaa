pub mod fake;
pub mod sync;

pub use sync::SerialChannel;

use crate::Result;

/// Byte-level transport the session drives. One implementation wraps a real
/// serial port; tests script a fake one.
pub trait ByteChannel {
    /// Read one newline-terminated chunk, or whatever arrived before the
    /// configured timeout. Returns `Ok(0)` when nothing arrived in time;
    /// a bare timeout is steady-state, not an error.
    fn read_chunk(&mut self, buf: &mut Vec<u8>) -> Result<usize>;

    /// Drop any input still buffered beyond the last read.
    fn discard_pending(&mut self);

    /// Write the full payload and flush. Failure here is fatal to the
    /// session: the device may or may not have seen the command.
    fn send_bytes(&mut self, bytes: &[u8]) -> Result<()>;
}
