use crate::config::SessionConfig;
use crate::console::Console;
use crate::link::{LinkReader, ReadOutcome};
use crate::logger::Logger;
use crate::serial::ByteChannel;
use crate::Result;

/// Operator line that releases the device from its start message.
pub const START_TOKEN: &str = "s";
/// Operator line that ends the session without touching the channel.
pub const EXIT_TOKEN: &str = "exit";

/// Where the session is in the output/command alternation. Exactly one
/// state at a time; transitions are strictly sequential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolState {
    AwaitingDeviceStart,
    AwaitingOperatorStart,
    AwaitingDeviceReady,
    AwaitingOperatorCommand,
    Terminated,
}

/// Drives the protocol: handshake first, then one command per ready
/// marker. Owns the channel for the whole session; nothing else reads or
/// writes it.
pub struct SessionController<C, O> {
    channel: C,
    console: O,
    link: LinkReader,
    logger: Logger,
    state: ProtocolState,
}

impl<C, O> SessionController<C, O>
where
    C: ByteChannel,
    O: Console,
{
    pub fn new(channel: C, console: O, logger: Logger, config: &SessionConfig) -> Self {
        Self {
            channel,
            console,
            link: LinkReader::new(config.marker),
            logger,
            state: ProtocolState::AwaitingDeviceStart,
        }
    }

    pub fn state(&self) -> ProtocolState {
        self.state
    }

    /// Hand the channel and console back, releasing the session's
    /// exclusive ownership.
    pub fn into_parts(self) -> (C, O) {
        (self.channel, self.console)
    }

    /// Run the session to termination. Returns when the operator exits or
    /// their input stream closes; a channel write failure propagates as a
    /// fatal error because the command is then in an indeterminate state.
    pub fn run(&mut self) -> Result<()> {
        self.handshake()?;
        while self.state != ProtocolState::Terminated {
            self.command_exchange()?;
        }
        self.logger.info("session terminated");
        Ok(())
    }

    /// Wait for the device start message, then for the operator to release
    /// it with the start token. Anything else the operator types here is
    /// discarded.
    fn handshake(&mut self) -> Result<()> {
        self.logger.debug("waiting for device start message");
        self.link
            .block_until_marker(&mut self.channel, &mut self.console, &self.logger)?;
        self.state = ProtocolState::AwaitingOperatorStart;
        loop {
            match self.console.read_command()? {
                None => {
                    self.state = ProtocolState::Terminated;
                    return Ok(());
                }
                Some(line) if line == START_TOKEN => break,
                Some(_) => continue,
            }
        }
        self.channel.send_bytes(START_TOKEN.as_bytes())?;
        self.logger.debug("start token sent");
        self.state = ProtocolState::AwaitingDeviceReady;
        Ok(())
    }

    /// One full cycle: poll until the device prints the ready marker, take
    /// one operator line, and relay it. Writes only ever happen right
    /// after a `MarkerFound`.
    fn command_exchange(&mut self) -> Result<()> {
        while self.link.poll_once(&mut self.channel, &mut self.console, &self.logger)?
            != ReadOutcome::MarkerFound
        {}
        self.state = ProtocolState::AwaitingOperatorCommand;

        let line = match self.console.read_command()? {
            None => {
                self.state = ProtocolState::Terminated;
                return Ok(());
            }
            Some(line) => line,
        };
        if line == EXIT_TOKEN {
            self.state = ProtocolState::Terminated;
            return Ok(());
        }
        // The transport rejects empty payloads; a bare ENTER becomes a
        // harmless single space.
        let payload = if line.is_empty() { " " } else { line.as_str() };
        self.channel.send_bytes(payload.as_bytes())?;
        self.state = ProtocolState::AwaitingDeviceReady;
        Ok(())
    }
}
