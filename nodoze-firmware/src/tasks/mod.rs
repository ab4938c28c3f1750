//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod controller;
#[cfg(feature = "serial-commands")]
pub mod serial_rx;
#[cfg(feature = "serial-commands")]
pub mod serial_tx;
pub mod tick;
pub mod usb;

pub use controller::controller_task;
#[cfg(feature = "serial-commands")]
pub use serial_rx::serial_rx_task;
#[cfg(feature = "serial-commands")]
pub use serial_tx::serial_tx_task;
pub use tick::tick_task;
pub use usb::usb_task;
