//! mcuterm synchronizes a host console with a microcontroller debug shell
//! over a serial line. The device emits free-form text and signals that it
//! is ready for one command by printing a marker character (default `>`);
//! the host echoes everything it receives and only writes a command after
//! the most recent read contained the marker.

pub mod cli;
pub mod config;
pub mod console;
pub mod decode;
pub mod link;
pub mod logger;
pub mod serial;
pub mod session;

use std::fmt;

/// Crate-wide error type.
#[derive(Debug)]
pub enum Error {
    /// Bad command-line arguments.
    InvalidArgs(String),
    /// The serial device could not be opened.
    Open(serialport::Error),
    /// I/O failure on the channel or the console. Fatal on the write path.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgs(msg) => write!(f, "invalid arguments: {msg}"),
            Error::Open(err) => write!(f, "failed to open serial device: {err}"),
            Error::Io(err) => write!(f, "i/o error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidArgs(_) => None,
            Error::Open(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serialport::Error> for Error {
    fn from(err: serialport::Error) -> Self {
        Error::Open(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
