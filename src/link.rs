use crate::console::Console;
use crate::decode::decode;
use crate::logger::Logger;
use crate::serial::ByteChannel;
use crate::Result;

/// What one bounded read attempt produced. A bare timeout is the normal
/// idle case, not an error, so there is no error variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The chunk contained the ready marker; the device wants a command.
    MarkerFound,
    /// Nothing arrived before the timeout (or the line glitched).
    TimedOut,
}

/// Bridges the byte channel and the console: every chunk read is decoded
/// and echoed exactly once, in order, and scanned for the ready marker.
pub struct LinkReader {
    marker: char,
    buf: Vec<u8>,
}

impl LinkReader {
    pub fn new(marker: char) -> Self {
        Self {
            marker,
            buf: Vec::new(),
        }
    }

    /// One bounded read. On data: decode, echo verbatim (marker included),
    /// drop whatever else is already buffered, then scan for the marker.
    /// Channel read errors are demoted to `TimedOut` so transient line
    /// noise never kills the session.
    pub fn poll_once<C, O>(
        &mut self,
        channel: &mut C,
        console: &mut O,
        logger: &Logger,
    ) -> Result<ReadOutcome>
    where
        C: ByteChannel,
        O: Console,
    {
        let read = match channel.read_chunk(&mut self.buf) {
            Ok(n) => n,
            Err(err) => {
                logger.debug(format!("channel read failed, retrying: {err}"));
                return Ok(ReadOutcome::TimedOut);
            }
        };
        if read == 0 {
            return Ok(ReadOutcome::TimedOut);
        }
        let text = decode(&self.buf);
        console.echo(&text)?;
        // Keep only the most recent device state; anything queued behind
        // this chunk is stale by the time the operator reacts.
        channel.discard_pending();
        if text.contains(self.marker) {
            Ok(ReadOutcome::MarkerFound)
        } else {
            Ok(ReadOutcome::TimedOut)
        }
    }

    /// Poll until the marker shows up. Unbounded: device readiness timing
    /// is not under host control, and cancellation is the operator killing
    /// the process.
    pub fn block_until_marker<C, O>(
        &mut self,
        channel: &mut C,
        console: &mut O,
        logger: &Logger,
    ) -> Result<()>
    where
        C: ByteChannel,
        O: Console,
    {
        loop {
            if self.poll_once(channel, console, logger)? == ReadOutcome::MarkerFound {
                return Ok(());
            }
        }
    }
}
