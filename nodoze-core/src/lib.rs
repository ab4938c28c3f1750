//! Board-agnostic core logic for the NoDoze keep-awake device
//!
//! Everything here runs unchanged on the microcontroller and on the host
//! (for tests):
//!
//! - Composite activity/visibility state machine
//! - The per-tick device loop ([`Device::tick`])
//! - Touch edge latching
//! - Status indicator model (flash overlays, auto-blank)
//! - Keep-awake action selection
//! - Device configuration
//! - Hardware seam traits implemented by the firmware, and [`run_tick`]
//!   which drives one tick against them

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod action;
pub mod config;
pub mod device;
pub mod indicator;
pub mod runner;
pub mod state;
pub mod touch;
pub mod traits;

pub use action::{ActionPicker, HidStep, KeepAwakeAction, WyRandPicker};
pub use config::{ConfigError, DeviceConfig};
pub use device::{Device, TickInput, TickOutput, TouchOutcome};
pub use indicator::{Color, Indicator, IndicatorFrame, Suppression};
pub use runner::{run_tick, TickReport};
pub use state::{Event, Mode, Visibility};
pub use touch::{EdgeLatch, TouchEdges, TouchLatches, TouchSample};
pub use traits::{CommandLink, HidError, IndicatorOutput, KeepAwakeOutput, TouchInput};
