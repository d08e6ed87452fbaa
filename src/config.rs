use std::time::Duration;

pub const DEFAULT_BAUD: u32 = 115_200;
pub const DEFAULT_TIMEOUT_MS: u64 = 500;
/// Character the device prints when it is ready for one command.
pub const DEFAULT_MARKER: char = '>';

/// Everything the session needs to open and drive the serial link.
/// Built once from CLI options; no process-wide state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub device: String,
    pub baud: u32,
    pub timeout_ms: u64,
    pub marker: char,
}

impl SessionConfig {
    pub fn new(device: String, baud: u32) -> Self {
        Self {
            device,
            baud,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            marker: DEFAULT_MARKER,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = SessionConfig::new("/dev/ttyUSB0".into(), DEFAULT_BAUD);
        assert_eq!(cfg.baud, 115_200);
        assert_eq!(cfg.timeout(), Duration::from_millis(500));
        assert_eq!(cfg.marker, '>');
    }
}
