//! Device-to-host responses

use core::fmt::{self, Write};

use heapless::String;

use crate::command::ProtocolError;

/// Longest encoded response ("ERROR:INVALID_INTERVAL")
pub const MAX_RESPONSE_LEN: usize = 24;

/// Whether the device is currently emitting keep-awake actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Activity {
    /// Ready but not acting
    #[default]
    Idle,
    /// Periodic actions enabled
    Active,
}

impl Activity {
    /// Build from the `active` flag
    pub fn from_active(active: bool) -> Self {
        if active {
            Activity::Active
        } else {
            Activity::Idle
        }
    }

    pub fn is_active(self) -> bool {
        self == Activity::Active
    }

    /// The opposite activity
    pub fn toggled(self) -> Self {
        match self {
            Activity::Idle => Activity::Active,
            Activity::Active => Activity::Idle,
        }
    }

    /// Wire label used after `STATUS:`
    pub fn as_str(self) -> &'static str {
        match self {
            Activity::Idle => "IDLE",
            Activity::Active => "ACTIVE",
        }
    }
}

/// Replies sent by the device, one line per applied command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response {
    /// `STATUS:ACTIVE` or `STATUS:IDLE`
    Status(Activity),
    /// `QUIET:ON` or `QUIET:OFF`
    Quiet(bool),
    /// `INTERVAL:<N>`
    Interval(u16),
    /// `ERROR:INVALID_INTERVAL`
    InvalidInterval,
}

impl Response {
    /// Wire form without the line terminator
    pub fn encode(&self) -> String<MAX_RESPONSE_LEN> {
        let mut out = String::new();
        let _ = write!(out, "{}", self);
        out
    }

    /// Parse a reply line received by the host
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let (key, value) = line
            .trim()
            .split_once(':')
            .ok_or(ProtocolError::UnknownResponse)?;

        match (key, value) {
            ("STATUS", "ACTIVE") => Ok(Response::Status(Activity::Active)),
            ("STATUS", "IDLE") => Ok(Response::Status(Activity::Idle)),
            ("QUIET", "ON") => Ok(Response::Quiet(true)),
            ("QUIET", "OFF") => Ok(Response::Quiet(false)),
            ("INTERVAL", n) => n
                .parse()
                .map(Response::Interval)
                .map_err(|_| ProtocolError::UnknownResponse),
            ("ERROR", "INVALID_INTERVAL") => Ok(Response::InvalidInterval),
            _ => Err(ProtocolError::UnknownResponse),
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Status(activity) => write!(f, "STATUS:{}", activity.as_str()),
            Response::Quiet(true) => f.write_str("QUIET:ON"),
            Response::Quiet(false) => f.write_str("QUIET:OFF"),
            Response::Interval(seconds) => write!(f, "INTERVAL:{}", seconds),
            Response::InvalidInterval => f.write_str("ERROR:INVALID_INTERVAL"),
        }
    }
}
