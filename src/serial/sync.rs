use std::io::{ErrorKind, Read, Write};
use std::time::Instant;

use serialport::{ClearBuffer, DataBits, Parity, StopBits};

use crate::config::SessionConfig;
use crate::serial::ByteChannel;
use crate::{Error, Result};

/// Serial transport, 8-N-1 framing with a bounded read timeout.
pub struct SerialChannel {
    port: Box<dyn serialport::SerialPort>,
    timeout: std::time::Duration,
}

impl SerialChannel {
    /// Open the device and purge anything stale in either direction, so the
    /// session starts from a clean line.
    pub fn open(config: &SessionConfig) -> Result<Self> {
        let port = serialport::new(config.device.as_str(), config.baud)
            .timeout(config.timeout())
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .data_bits(DataBits::Eight)
            .open()
            .map_err(Error::Open)?;
        port.clear(ClearBuffer::All).map_err(Error::Open)?;
        Ok(Self {
            port,
            timeout: config.timeout(),
        })
    }
}

impl ByteChannel for SerialChannel {
    fn read_chunk(&mut self, buf: &mut Vec<u8>) -> Result<usize> {
        buf.clear();
        let deadline = Instant::now() + self.timeout;
        let mut byte = [0u8; 1];
        loop {
            match self.port.read(&mut byte) {
                Ok(0) => break,
                Ok(_) => {
                    buf.push(byte[0]);
                    if byte[0] == b'\n' {
                        break;
                    }
                }
                Err(err) if err.kind() == ErrorKind::TimedOut => break,
                Err(err) => return Err(Error::Io(err)),
            }
            if Instant::now() >= deadline {
                break;
            }
        }
        Ok(buf.len())
    }

    fn discard_pending(&mut self) {
        // Input discard is best effort; a failure here just means the next
        // read sees older bytes.
        let _ = self.port.clear(ClearBuffer::Input);
    }

    fn send_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.port.write_all(bytes)?;
        self.port.flush()?;
        Ok(())
    }
}
