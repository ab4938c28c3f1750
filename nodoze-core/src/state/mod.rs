//! Device mode state machine
//!
//! The device is always in one of four composite states:
//! `{Idle, Active} × {Normal, Quiet}`. Transitions are explicit, finite and
//! deterministic; timing lives in [`crate::device`].

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{Mode, Visibility};
