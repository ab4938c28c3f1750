//! NoDoze serial command protocol
//!
//! This crate defines the text protocol spoken between the host controller
//! and the keep-awake device over a serial link (USB CDC-ACM on the device).
//! Both ends link against it so the grammar lives in exactly one place.
//!
//! # Protocol Overview
//!
//! Every message is a single newline-terminated UTF-8 line:
//! ```text
//! host   -> device   on | off | toggle | status | quiet on | quiet off | interval:<N>
//! device -> host     STATUS:ACTIVE | STATUS:IDLE | QUIET:ON | QUIET:OFF
//!                    INTERVAL:<N> | ERROR:INVALID_INTERVAL
//! ```
//!
//! Command keywords are case-insensitive. Unknown commands get no response.
//! The link is half-duplex in practice: one command, then one response line.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod line;
pub mod response;

pub use command::{Command, ProtocolError};
pub use line::{Line, LineBuffer, LineError};
pub use response::{Activity, Response};

/// Nominal baud rate of the serial link
pub const BAUD_RATE: u32 = 115_200;

/// Shortest accepted action interval (seconds)
pub const MIN_INTERVAL_S: u16 = 5;

/// Longest accepted action interval (seconds)
pub const MAX_INTERVAL_S: u16 = 300;

/// Action interval after power-up (seconds)
pub const DEFAULT_INTERVAL_S: u16 = 30;

/// Longest line either side will accept, excluding the terminator
pub const MAX_LINE_LEN: usize = 64;

/// Check whether an interval is inside the accepted range
pub fn interval_in_range(seconds: u16) -> bool {
    (MIN_INTERVAL_S..=MAX_INTERVAL_S).contains(&seconds)
}
