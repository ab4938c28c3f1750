//! Hardware abstraction traits
//!
//! These traits sit between the device loop and the board: HID output,
//! indicator LEDs, touch pads and the serial command link. The firmware
//! implements them; tests use in-memory mocks.

pub mod hid;
pub mod indicator;
pub mod link;
pub mod touch;

pub use hid::{HidError, KeepAwakeOutput};
pub use indicator::IndicatorOutput;
pub use link::CommandLink;
pub use touch::TouchInput;
