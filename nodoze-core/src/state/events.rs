//! Events that trigger mode transitions

/// Events that can change the device mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Activity events
    /// `on` command
    Activate,
    /// `off` command
    Deactivate,
    /// `toggle` command or a press on the toggle pad
    ToggleActive,

    // Visibility events
    /// `quiet on` command
    QuietOn,
    /// `quiet off` command
    QuietOff,
    /// Press on the quiet pad
    ToggleQuiet,
}

impl Event {
    /// Check if this event affects activity
    pub fn is_activity_event(&self) -> bool {
        matches!(
            self,
            Event::Activate | Event::Deactivate | Event::ToggleActive
        )
    }

    /// Check if this event affects visibility
    pub fn is_visibility_event(&self) -> bool {
        matches!(self, Event::QuietOn | Event::QuietOff | Event::ToggleQuiet)
    }
}
