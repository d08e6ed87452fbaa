use std::process::ExitCode;

use mcuterm::cli::Command;
use mcuterm::console::StdConsole;
use mcuterm::logger::{LogLevel, Logger};
use mcuterm::serial::SerialChannel;
use mcuterm::session::SessionController;
use mcuterm::Result;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match Command::parse(&args) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match command {
        // Missing positionals print usage and exit cleanly, matching the
        // tool's long-standing behavior.
        Command::ShowUsage => {
            print!("{}", Command::usage());
            ExitCode::SUCCESS
        }
        Command::ShowHelp => {
            print!("{}", Command::help());
            ExitCode::SUCCESS
        }
        Command::Run(opts) => match run(opts) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("{err}");
                ExitCode::FAILURE
            }
        },
    }
}

fn run(opts: mcuterm::cli::RunOptions) -> Result<()> {
    let level = match opts.log_level.as_deref() {
        Some(raw) => raw.parse()?,
        None => LogLevel::Info,
    };
    let logger = Logger::new(level, opts.log_file.as_deref())?;

    let config = opts.into_config();
    let channel = SerialChannel::open(&config)?;
    logger.info(format!(
        "connected to {} at {} baud",
        config.device, config.baud
    ));

    let mut session = SessionController::new(channel, StdConsole::new(), logger, &config);
    session.run()
}
