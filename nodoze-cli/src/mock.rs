//! In-memory device for link and monitor tests
//!
//! Runs the real device state machine behind a `Read + Write` transport.

use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::time::Duration;

use nodoze_core::{ActionPicker, Device, DeviceConfig};
use nodoze_protocol::LineBuffer;

use crate::link::LinkConfig;

pub struct FirstPicker;

impl ActionPicker for FirstPicker {
    fn pick(&mut self, _count: usize) -> usize {
        0
    }
}

/// Link timing that keeps tests fast
pub fn quick_config() -> LinkConfig {
    LinkConfig {
        settle: Duration::ZERO,
        read_timeout: Duration::from_millis(30),
        ..LinkConfig::default()
    }
}

pub struct FakeDevice {
    device: Option<Device<FirstPicker>>,
    incoming: LineBuffer,
    outgoing: VecDeque<u8>,
    written: Vec<u8>,
    /// Emitted ahead of every response
    chatter: Vec<u8>,
    unplugged: bool,
}

impl FakeDevice {
    pub fn new() -> Self {
        Self {
            device: Some(Device::new(DeviceConfig::default(), FirstPicker, 0)),
            incoming: LineBuffer::new(),
            outgoing: VecDeque::new(),
            written: Vec::new(),
            chatter: Vec::new(),
            unplugged: false,
        }
    }

    /// Never answers anything
    pub fn silent() -> Self {
        Self {
            device: None,
            ..Self::new()
        }
    }

    /// Fails every write
    pub fn unplugged() -> Self {
        Self {
            unplugged: true,
            ..Self::new()
        }
    }

    /// Queue bytes the host will read before any response
    pub fn preload(&mut self, bytes: &[u8]) {
        self.outgoing.extend(bytes);
    }

    /// Send `bytes` before each response line
    pub fn chatty(bytes: &[u8]) -> Self {
        Self {
            chatter: bytes.to_vec(),
            ..Self::new()
        }
    }

    pub fn written(&self) -> String {
        String::from_utf8_lossy(&self.written).into_owned()
    }
}

impl Write for FakeDevice {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.unplugged {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "device unplugged"));
        }
        self.written.extend_from_slice(buf);
        for &byte in buf {
            if let Ok(Some(line)) = self.incoming.feed(byte) {
                if let Some(device) = self.device.as_mut() {
                    if let Some(response) = device.handle_line(&line, 0) {
                        self.outgoing.extend(&self.chatter);
                        self.outgoing.extend(response.encode().as_bytes());
                        self.outgoing.extend(b"\r\n");
                    }
                }
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Read for FakeDevice {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.outgoing.len());
        for (slot, byte) in buf.iter_mut().zip(self.outgoing.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }
}
