//! Keep-awake HID output trait

use crate::action::{HidStep, KeepAwakeAction};

/// Errors that can occur while sending HID reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidError {
    /// Interface not configured by the host, or the bus was reset
    NotReady,
    /// Report did not fit the endpoint
    ReportTooLarge,
}

/// Trait for the keyboard and mouse half of the device
///
/// Implementations turn each call into one HID report. Actions are short,
/// so a failed step aborts the rest of the sequence.
#[allow(async_fn_in_trait)]
pub trait KeepAwakeOutput {
    /// Press a single key (HID usage ID)
    async fn press_key(&mut self, key: u8) -> Result<(), HidError>;

    /// Release every key
    async fn release_keys(&mut self) -> Result<(), HidError>;

    /// Move the pointer relative to its current position
    async fn move_pointer(&mut self, dx: i8, dy: i8) -> Result<(), HidError>;

    /// Wait between steps
    async fn pause(&mut self, ms: u32);

    /// Send the full HID sequence for an action
    async fn perform(&mut self, action: KeepAwakeAction) -> Result<(), HidError> {
        for step in action.steps() {
            match *step {
                HidStep::Press(key) => self.press_key(key).await?,
                HidStep::ReleaseAll => self.release_keys().await?,
                HidStep::Move { dx, dy } => self.move_pointer(dx, dy).await?,
                HidStep::Pause(ms) => self.pause(ms).await,
            }
        }
        Ok(())
    }
}
