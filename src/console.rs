use std::io::{BufRead, Write};

use crate::Result;

/// Operator-facing line console. Echo must reach the operator immediately,
/// so implementations flush on every call; command reads block without a
/// timeout because they wait on a human.
pub trait Console {
    /// Write decoded device text verbatim and flush.
    fn echo(&mut self, text: &str) -> Result<()>;

    /// Read one operator line, trailing newline stripped. `None` means the
    /// input stream is closed.
    fn read_command(&mut self) -> Result<Option<String>>;
}

/// Console backed by the process stdin/stdout.
pub struct StdConsole {
    stdin: std::io::Stdin,
    stdout: std::io::Stdout,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            stdin: std::io::stdin(),
            stdout: std::io::stdout(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdConsole {
    fn echo(&mut self, text: &str) -> Result<()> {
        let mut out = self.stdout.lock();
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    fn read_command(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self.stdin.lock().read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }
}
