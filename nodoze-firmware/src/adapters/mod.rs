//! Board adapters for the core hardware traits

pub mod hid;
pub mod leds;
pub mod link;
pub mod touch;

pub use hid::UsbHid;
pub use leds::StatusLeds;
pub use link::ChannelLink;
pub use touch::TouchPads;
