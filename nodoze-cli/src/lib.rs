//! Host-side controller for the NoDoze keep-awake device
//!
//! Finds the device among the host's serial ports, sends one command at a
//! time and reads back the single response line.

pub mod discovery;
pub mod error;
pub mod link;
pub mod monitor;

#[cfg(test)]
mod mock;

pub use discovery::{
    available_ports, connect, describe_port, find_device, is_candidate, open_port, SerialLink,
};
pub use error::LinkError;
pub use link::{DeviceLink, LinkConfig};
pub use monitor::{describe, run_monitor, MonitorInput};
