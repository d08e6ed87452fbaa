use crate::config::{SessionConfig, DEFAULT_BAUD, DEFAULT_TIMEOUT_MS};
use crate::{Error, Result};

/// What the process should do after argument parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(RunOptions),
    /// Positional arguments missing; print the short usage and exit 0.
    ShowUsage,
    ShowHelp,
}

/// Parsed command line; flag values are `None` when not provided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub device: String,
    pub baud: u32,
    pub marker: Option<char>,
    pub timeout_ms: Option<u64>,
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

impl Command {
    /// Parse everything after the program name. Two positional arguments
    /// (device, baud) are required; missing either is not an error, it is
    /// the usage path.
    pub fn parse(args: &[String]) -> Result<Command> {
        if args.iter().any(|a| a == "--help" || a == "-h") {
            return Ok(Command::ShowHelp);
        }

        let mut positional: Vec<String> = Vec::new();
        let mut marker = None;
        let mut timeout_ms = None;
        let mut log_level = None;
        let mut log_file = None;

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--marker" => {
                    let raw = take_value(arg, &mut iter)?;
                    let mut chars = raw.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => marker = Some(c),
                        _ => {
                            return Err(Error::InvalidArgs(
                                "marker must be a single character".to_string(),
                            ))
                        }
                    }
                }
                "--timeout-ms" => {
                    let raw = take_value(arg, &mut iter)?;
                    timeout_ms = Some(raw.parse().map_err(|_| {
                        Error::InvalidArgs("timeout-ms must be a positive integer".to_string())
                    })?);
                }
                "--log-level" => {
                    log_level = Some(take_value(arg, &mut iter)?);
                }
                "--log-file" => {
                    log_file = Some(take_value(arg, &mut iter)?);
                }
                flag if flag.starts_with("--") => {
                    return Err(Error::InvalidArgs(format!(
                        "unknown flag '{flag}', try --help"
                    )));
                }
                _ => positional.push(arg.clone()),
            }
        }

        if positional.len() < 2 {
            return Ok(Command::ShowUsage);
        }
        let device = positional[0].clone();
        let baud: u32 = positional[1]
            .parse()
            .map_err(|_| Error::InvalidArgs("baud must be a positive integer".to_string()))?;

        Ok(Command::Run(RunOptions {
            device,
            baud,
            marker,
            timeout_ms,
            log_level,
            log_file,
        }))
    }

    pub fn usage() -> String {
        "Usage:\n    mcuterm [COM4 for windows | /dev/ttyUSB0 for unix] 115200\n".to_string()
    }

    pub fn help() -> String {
        format!(
            "mcuterm - synchronized serial terminal for MCU debug consoles\n\
             \n\
             USAGE:\n\
             \x20\x20mcuterm <device> <baud> [options]\n\
             \n\
             ARGS:\n\
             \x20\x20<device>          Serial device path (COM4, /dev/ttyUSB0, ...)\n\
             \x20\x20<baud>            Baud rate (e.g. {DEFAULT_BAUD})\n\
             \n\
             OPTIONS:\n\
             \x20\x20--marker <char>   Ready marker character (default: >)\n\
             \x20\x20--timeout-ms <n>  Serial read timeout (default: {DEFAULT_TIMEOUT_MS})\n\
             \x20\x20--log-level <error|warn|info|debug>  Log verbosity (default: info)\n\
             \x20\x20--log-file <path> Append logs to a file as well as stderr\n\
             \x20\x20-h, --help        Show this help\n"
        )
    }
}

impl RunOptions {
    pub fn into_config(self) -> SessionConfig {
        let mut config = SessionConfig::new(self.device, self.baud);
        if let Some(marker) = self.marker {
            config.marker = marker;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = timeout_ms;
        }
        config
    }
}

fn take_value(flag: &str, iter: &mut std::slice::Iter<String>) -> Result<String> {
    iter.next()
        .cloned()
        .ok_or_else(|| Error::InvalidArgs(format!("expected a value after {flag}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_MARKER, DEFAULT_TIMEOUT_MS};

    #[test]
    fn missing_positionals_is_the_usage_path() {
        assert_eq!(Command::parse(&[]).unwrap(), Command::ShowUsage);
        let args = vec!["/dev/ttyUSB0".to_string()];
        assert_eq!(Command::parse(&args).unwrap(), Command::ShowUsage);
    }

    #[test]
    fn usage_is_two_lines() {
        assert_eq!(Command::usage().lines().count(), 2);
    }

    #[test]
    fn parse_positionals_with_defaults() {
        let args = vec!["/dev/ttyUSB0".to_string(), "115200".to_string()];
        let cmd = Command::parse(&args).unwrap();
        let opts = match cmd {
            Command::Run(opts) => opts,
            other => panic!("expected Run, got {other:?}"),
        };
        let config = opts.into_config();
        assert_eq!(config.device, "/dev/ttyUSB0");
        assert_eq!(config.baud, 115_200);
        assert_eq!(config.marker, DEFAULT_MARKER);
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn parse_flags_override_defaults() {
        let args: Vec<String> = [
            "COM4",
            "9600",
            "--marker",
            "$",
            "--timeout-ms",
            "250",
            "--log-level",
            "debug",
            "--log-file",
            "/tmp/mcuterm.log",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let cmd = Command::parse(&args).unwrap();
        let opts = match cmd {
            Command::Run(opts) => opts,
            other => panic!("expected Run, got {other:?}"),
        };
        assert_eq!(opts.log_level.as_deref(), Some("debug"));
        assert_eq!(opts.log_file.as_deref(), Some("/tmp/mcuterm.log"));
        let config = opts.into_config();
        assert_eq!(config.marker, '$');
        assert_eq!(config.timeout_ms, 250);
    }

    #[test]
    fn rejects_bad_baud_and_bad_marker() {
        let args = vec!["COM4".to_string(), "fast".to_string()];
        let err = Command::parse(&args).unwrap_err();
        assert!(format!("{err}").contains("baud"));

        let args: Vec<String> = ["COM4", "9600", "--marker", ">>"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let err = Command::parse(&args).unwrap_err();
        assert!(format!("{err}").contains("marker"));
    }

    #[test]
    fn rejects_unknown_flag() {
        let args: Vec<String> = ["COM4", "9600", "--nope"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let err = Command::parse(&args).unwrap_err();
        assert!(format!("{err}").contains("unknown flag"));
    }

    #[test]
    fn help_flag_wins() {
        let args: Vec<String> = ["COM4", "9600", "--help"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(Command::parse(&args).unwrap(), Command::ShowHelp);
    }
}
