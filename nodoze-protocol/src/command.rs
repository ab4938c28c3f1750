//! Host-to-device commands

use core::fmt::{self, Write};

use heapless::String;

use crate::interval_in_range;

/// Keyword prefix of the interval command
const INTERVAL_PREFIX: &str = "interval:";

/// Longest encoded command ("interval:65535")
pub const MAX_COMMAND_LEN: usize = 16;

/// Errors produced while parsing protocol text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// Keyword not recognised; the device stays silent
    UnknownCommand,
    /// `interval:` payload was non-numeric or outside 5..=300
    InvalidInterval,
    /// Device reply did not match any known response
    UnknownResponse,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::UnknownCommand => f.write_str("unknown command"),
            ProtocolError::InvalidInterval => f.write_str("invalid interval"),
            ProtocolError::UnknownResponse => f.write_str("unrecognised response"),
        }
    }
}

/// Commands understood by the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Start emitting keep-awake actions
    On,
    /// Stop emitting keep-awake actions
    Off,
    /// Flip between active and idle
    Toggle,
    /// Report the current activity without changing anything
    Status,
    /// Enable (`true`) or disable (`false`) quiet mode
    Quiet(bool),
    /// Set the action interval in seconds (already range-checked)
    Interval(u16),
}

impl Command {
    /// Parse a command line
    ///
    /// Leading/trailing whitespace and line terminators are ignored and
    /// keywords match case-insensitively. A malformed or out-of-range
    /// interval is reported as [`ProtocolError::InvalidInterval`] so the
    /// caller can answer it; everything else unknown is
    /// [`ProtocolError::UnknownCommand`].
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let line = line.trim();

        if let Some(payload) = strip_prefix_ignore_case(line, INTERVAL_PREFIX) {
            return parse_interval(payload).map(Command::Interval);
        }

        let mut words = line.split_whitespace();
        let first = words.next().ok_or(ProtocolError::UnknownCommand)?;
        let second = words.next();
        if words.next().is_some() {
            return Err(ProtocolError::UnknownCommand);
        }

        let command = match second {
            None if first.eq_ignore_ascii_case("on") => Command::On,
            None if first.eq_ignore_ascii_case("off") => Command::Off,
            None if first.eq_ignore_ascii_case("toggle") => Command::Toggle,
            None if first.eq_ignore_ascii_case("status") => Command::Status,
            Some(arg) if first.eq_ignore_ascii_case("quiet") => {
                if arg.eq_ignore_ascii_case("on") {
                    Command::Quiet(true)
                } else if arg.eq_ignore_ascii_case("off") {
                    Command::Quiet(false)
                } else {
                    return Err(ProtocolError::UnknownCommand);
                }
            }
            _ => return Err(ProtocolError::UnknownCommand),
        };

        Ok(command)
    }

    /// Canonical lower-case wire form, without the line terminator
    pub fn encode(&self) -> String<MAX_COMMAND_LEN> {
        let mut out = String::new();
        // Longest form fits MAX_COMMAND_LEN
        let _ = write!(out, "{}", self);
        out
    }

    /// Check whether applying this command can change device state
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Command::Status)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::On => f.write_str("on"),
            Command::Off => f.write_str("off"),
            Command::Toggle => f.write_str("toggle"),
            Command::Status => f.write_str("status"),
            Command::Quiet(true) => f.write_str("quiet on"),
            Command::Quiet(false) => f.write_str("quiet off"),
            Command::Interval(seconds) => write!(f, "{}{}", INTERVAL_PREFIX, seconds),
        }
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        s.get(prefix.len()..)
    } else {
        None
    }
}

fn parse_interval(payload: &str) -> Result<u16, ProtocolError> {
    let seconds: u16 = payload
        .trim()
        .parse()
        .map_err(|_| ProtocolError::InvalidInterval)?;
    if interval_in_range(seconds) {
        Ok(seconds)
    } else {
        Err(ProtocolError::InvalidInterval)
    }
}
