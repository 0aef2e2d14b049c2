//! Serial console command source.
//!
//! Reads `on` / `off` / `1` / `0` lines from the UART console and posts the
//! decoded [`SwitchCommand`] to the [`CommandMailbox`].  This is the
//! command path while no dashboard transport is attached.
//!
//! Line assembly uses a fixed-capacity buffer: overlong lines are dropped
//! whole and reported once their terminator arrives.
//!
//! ESP-IDF stdin is non-blocking while no UART driver is installed: a read
//! with nothing pending returns `WouldBlock` or `Ok(0)`.  The reader thread
//! therefore polls, see [`EndOfInput::Poll`].

use std::io::{self, Read};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use heapless::String;
use log::{info, warn};

use crate::app::commands::SwitchCommand;
use crate::app::mailbox::CommandMailbox;

/// Longest accepted command line, excluding the terminator.
pub const MAX_LINE: usize = 32;

/// Back-off between reads that returned no data.
pub const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// What a zero-length read means to [`pump`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndOfInput {
    /// The stream is finished (files, pipes, test buffers).
    Stop,
    /// Nothing is pending yet; sleep [`POLL_INTERVAL`] and read again.
    Poll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    /// The line was not a recognised switch command.
    Unrecognised,
    /// The line exceeded [`MAX_LINE`] bytes.
    LineTooLong,
}

impl core::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unrecognised => write!(f, "unrecognised command (expected on/off/1/0)"),
            Self::LineTooLong => write!(f, "line longer than {MAX_LINE} bytes"),
        }
    }
}

impl core::error::Error for ConsoleError {}

/// Byte-at-a-time line decoder.
#[derive(Debug, Default)]
pub struct LineDecoder {
    line: String<MAX_LINE>,
    overflow: bool,
    garbage: bool,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one byte.  Returns `Some` when a non-empty line completes.
    pub fn push(&mut self, byte: u8) -> Option<Result<SwitchCommand, ConsoleError>> {
        match byte {
            b'\r' => None,
            b'\n' => self.finish(),
            b if !b.is_ascii() || b.is_ascii_control() => {
                self.garbage = true;
                None
            }
            b => {
                if self.line.push(char::from(b)).is_err() {
                    self.overflow = true;
                }
                None
            }
        }
    }

    fn finish(&mut self) -> Option<Result<SwitchCommand, ConsoleError>> {
        let result = if self.overflow {
            Some(Err(ConsoleError::LineTooLong))
        } else if self.garbage {
            Some(Err(ConsoleError::Unrecognised))
        } else if self.line.trim().is_empty() {
            None
        } else {
            Some(SwitchCommand::parse(&self.line).ok_or(ConsoleError::Unrecognised))
        };
        self.line.clear();
        self.overflow = false;
        self.garbage = false;
        result
    }
}

/// Decode commands from `reader`, posting each to `mailbox`.
///
/// `WouldBlock` always backs off and retries.  Returns `Ok(())` on a
/// zero-length read only with [`EndOfInput::Stop`].
pub fn pump(
    mut reader: impl Read,
    mailbox: &CommandMailbox,
    eof: EndOfInput,
) -> io::Result<()> {
    let mut decoder = LineDecoder::new();
    let mut buf = [0u8; 64];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) if eof == EndOfInput::Stop => return Ok(()),
            Ok(0) => {
                thread::sleep(POLL_INTERVAL);
                continue;
            }
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                thread::sleep(POLL_INTERVAL);
                continue;
            }
            Err(e) => return Err(e),
        };
        for &byte in &buf[..n] {
            match decoder.push(byte) {
                Some(Ok(cmd)) => {
                    info!("Console command: {:?}", cmd);
                    mailbox.post(cmd);
                }
                Some(Err(e)) => warn!("Console: {}", e),
                None => {}
            }
        }
    }
}

/// Start the console reader on its own thread, polling stdin.
pub fn spawn(mailbox: &'static CommandMailbox) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("console".into())
        .stack_size(4096)
        .spawn(move || {
            if let Err(e) = pump(io::stdin().lock(), mailbox, EndOfInput::Poll) {
                warn!("Console reader stopped: {}", e);
            }
        })
}
