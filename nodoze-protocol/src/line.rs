//! Line assembly for the byte stream.
//!
//! Bytes arrive in arbitrary chunks (USB packets on the device, read()
//! calls on the host). [`LineBuffer`] accumulates them and yields one
//! complete line at a time:
//! - `\n`, `\r` and `\r\n` all terminate a line
//! - empty lines are skipped
//! - over-long lines are dropped up to the next terminator

use heapless::{String, Vec};

use crate::MAX_LINE_LEN;

/// A complete line, terminator stripped
pub type Line = String<MAX_LINE_LEN>;

/// Errors reported while assembling lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded [`MAX_LINE_LEN`]; the remainder is discarded
    Overflow,
    /// Line was not valid UTF-8
    InvalidUtf8,
}

impl core::fmt::Display for LineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LineError::Overflow => f.write_str("line too long"),
            LineError::InvalidUtf8 => f.write_str("invalid UTF-8"),
        }
    }
}

/// Accumulates bytes until a line terminator is seen
#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    buffer: Vec<u8, MAX_LINE_LEN>,
    /// Set after an overflow until the next terminator
    discarding: bool,
}

impl LineBuffer {
    /// Create an empty line buffer
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            discarding: false,
        }
    }

    /// Drop any partial line
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.discarding = false;
    }

    /// Check whether a partial line is buffered
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(line))` when a terminator completes a non-empty line,
    /// `Ok(None)` when more bytes are needed, or `Err` when the current line
    /// had to be dropped.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Line>, LineError> {
        match byte {
            b'\n' | b'\r' => {
                if self.discarding {
                    self.discarding = false;
                    return Ok(None);
                }
                if self.buffer.is_empty() {
                    // Second half of CRLF, or a blank line
                    return Ok(None);
                }
                let bytes = core::mem::take(&mut self.buffer);
                String::from_utf8(bytes)
                    .map(Some)
                    .map_err(|_| LineError::InvalidUtf8)
            }
            _ if self.discarding => Ok(None),
            _ => {
                if self.buffer.push(byte).is_err() {
                    self.buffer.clear();
                    self.discarding = true;
                    return Err(LineError::Overflow);
                }
                Ok(None)
            }
        }
    }
}
