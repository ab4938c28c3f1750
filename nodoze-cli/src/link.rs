//! Request/response exchange with the device
//!
//! The link is half-duplex: write one command line, wait a moment, read back
//! at most one response line. Unknown commands get no reply, so silence is a
//! normal outcome and is returned as `Ok(None)`.

use std::io::{ErrorKind, Read, Write};
use std::thread;
use std::time::{Duration, Instant};

use nodoze_protocol::{Command, LineBuffer, Response, BAUD_RATE};
use tracing::{debug, trace, warn};

use crate::error::LinkError;

/// Gap between reads while waiting for the device
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Upper bound on reads spent draining stale input before a command
const MAX_DRAIN_READS: usize = 16;

/// Timing and line settings for a device link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkConfig {
    pub baud_rate: u32,
    /// Wait after writing a command before reading the reply
    pub settle: Duration,
    /// Give up on a reply after this long
    pub read_timeout: Duration,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            baud_rate: BAUD_RATE,
            settle: Duration::from_millis(200),
            read_timeout: Duration::from_millis(1000),
        }
    }
}

/// A command channel to one device
pub struct DeviceLink<T> {
    transport: T,
    config: LinkConfig,
    lines: LineBuffer,
}

impl<T: Read + Write> DeviceLink<T> {
    pub fn new(transport: T, config: LinkConfig) -> Self {
        Self {
            transport,
            config,
            lines: LineBuffer::new(),
        }
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Send one command and wait for its response
    pub fn send(&mut self, command: Command) -> Result<Option<Response>, LinkError> {
        let line = format!("{command}\n");

        debug!(%command, "sending");
        self.discard_pending()?;
        self.transport
            .write_all(line.as_bytes())
            .and_then(|()| self.transport.flush())
            .map_err(|e| match e.kind() {
                ErrorKind::TimedOut => LinkError::Timeout,
                _ => LinkError::Io(e),
            })?;

        if !self.config.settle.is_zero() {
            thread::sleep(self.config.settle);
        }

        let response = self.read_response()?;
        match &response {
            Some(response) => debug!(%response, "received"),
            None => debug!("no response"),
        }
        Ok(response)
    }

    /// Drop input left over from an abandoned exchange
    ///
    /// A reply that arrives after its read timeout would otherwise be taken
    /// as the answer to the next command.
    fn discard_pending(&mut self) -> Result<(), LinkError> {
        self.lines.reset();
        let mut buf = [0u8; 64];

        for _ in 0..MAX_DRAIN_READS {
            match self.transport.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => trace!(bytes = n, "discarded stale input"),
                Err(e)
                    if matches!(
                        e.kind(),
                        ErrorKind::TimedOut | ErrorKind::WouldBlock | ErrorKind::Interrupted
                    ) =>
                {
                    break
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Read until a response line arrives or the read timeout passes
    ///
    /// Lines that are not responses (boot chatter, echoes) are skipped.
    fn read_response(&mut self) -> Result<Option<Response>, LinkError> {
        let deadline = Instant::now() + self.config.read_timeout;
        let mut buf = [0u8; 64];

        loop {
            match self.transport.read(&mut buf) {
                Ok(0) => {}
                Ok(n) => {
                    trace!(bytes = n, "read");
                    if let Some(response) = self.scan(&buf[..n]) {
                        return Ok(Some(response));
                    }
                    continue;
                }
                Err(e)
                    if matches!(
                        e.kind(),
                        ErrorKind::TimedOut | ErrorKind::WouldBlock | ErrorKind::Interrupted
                    ) => {}
                Err(e) => return Err(e.into()),
            }

            if Instant::now() >= deadline {
                return Ok(None);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    fn scan(&mut self, bytes: &[u8]) -> Option<Response> {
        let mut found = None;
        for &byte in bytes {
            match self.lines.feed(byte) {
                Ok(Some(line)) if found.is_none() => match Response::parse(&line) {
                    Ok(response) => found = Some(response),
                    Err(_) => debug!(line = line.as_str(), "skipping non-response line"),
                },
                Ok(Some(line)) => warn!(line = line.as_str(), "dropping extra line"),
                Ok(None) => {}
                Err(e) => warn!(error = %LinkError::Garbled(e), "discarding line"),
            }
        }
        found
    }
}
