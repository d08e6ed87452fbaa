use std::collections::VecDeque;

use crate::serial::ByteChannel;
use crate::{Error, Result};

/// Scripted channel used in tests. Each entry is one `read_chunk` result:
/// `Ok` bytes are delivered as a chunk (empty bytes model a timeout), `Err`
/// models a transient line fault. An exhausted script reads as timeouts.
#[derive(Default)]
pub struct FakeChannel {
    script: VecDeque<Result<Vec<u8>>>,
    writes: Vec<Vec<u8>>,
    discards: usize,
    fail_writes: bool,
}

impl FakeChannel {
    pub fn new(script: Vec<Result<Vec<u8>>>) -> Self {
        Self {
            script: script.into(),
            writes: Vec::new(),
            discards: 0,
            fail_writes: false,
        }
    }

    /// Script from text lines; `""` entries become timeouts.
    pub fn from_lines(lines: Vec<&str>) -> Self {
        Self::new(lines.into_iter().map(|l| Ok(l.as_bytes().to_vec())).collect())
    }

    /// Make every subsequent `send_bytes` fail, to exercise the fatal
    /// write path.
    pub fn fail_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn writes(&self) -> &[Vec<u8>] {
        &self.writes
    }

    pub fn discards(&self) -> usize {
        self.discards
    }
}

impl ByteChannel for FakeChannel {
    fn read_chunk(&mut self, buf: &mut Vec<u8>) -> Result<usize> {
        buf.clear();
        match self.script.pop_front() {
            Some(Ok(bytes)) => {
                buf.extend_from_slice(&bytes);
                Ok(buf.len())
            }
            Some(Err(err)) => Err(err),
            None => Ok(0),
        }
    }

    fn discard_pending(&mut self) {
        self.discards += 1;
    }

    fn send_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        if self.fail_writes {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "scripted write failure",
            )));
        }
        self.writes.push(bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_reads_then_timeouts() {
        let mut fake = FakeChannel::from_lines(vec!["hello\n"]);
        let mut buf = Vec::new();
        assert_eq!(fake.read_chunk(&mut buf).unwrap(), 6);
        assert_eq!(buf, b"hello\n");
        assert_eq!(fake.read_chunk(&mut buf).unwrap(), 0);
    }

    #[test]
    fn records_writes_and_discards() {
        let mut fake = FakeChannel::new(vec![]);
        fake.send_bytes(b"s").unwrap();
        fake.discard_pending();
        assert_eq!(fake.writes(), &[b"s".to_vec()]);
        assert_eq!(fake.discards(), 1);
    }

    #[test]
    fn scripted_write_failure_surfaces() {
        let mut fake = FakeChannel::new(vec![]).fail_writes();
        assert!(fake.send_bytes(b"status").is_err());
    }
}
