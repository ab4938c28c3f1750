//! Composite mode definition
//!
//! Indicator colour and whether keep-awake actions fire are both functions
//! of the current mode.

use nodoze_protocol::Activity;

use super::events::Event;

/// Whether status indicators may light up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Visibility {
    /// Indicators reflect the activity
    #[default]
    Normal,
    /// All indicators suppressed
    Quiet,
}

impl Visibility {
    fn toggled(self) -> Self {
        match self {
            Visibility::Normal => Visibility::Quiet,
            Visibility::Quiet => Visibility::Normal,
        }
    }
}

/// Composite device mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Mode {
    pub activity: Activity,
    pub visibility: Visibility,
}

impl Mode {
    /// Mode after power-up: idle, indicators visible
    pub const POWER_ON: Mode = Mode {
        activity: Activity::Idle,
        visibility: Visibility::Normal,
    };

    /// Check if keep-awake actions are enabled
    pub fn is_active(&self) -> bool {
        self.activity.is_active()
    }

    /// Check if indicators are suppressed
    pub fn is_quiet(&self) -> bool {
        self.visibility == Visibility::Quiet
    }

    /// Process an event and return the next mode
    pub fn transition(self, event: Event) -> Self {
        use Event::*;

        let Mode {
            activity,
            visibility,
        } = self;

        match event {
            Activate => Mode {
                activity: Activity::Active,
                visibility,
            },
            Deactivate => Mode {
                activity: Activity::Idle,
                visibility,
            },
            ToggleActive => Mode {
                activity: activity.toggled(),
                visibility,
            },
            QuietOn => Mode {
                activity,
                visibility: Visibility::Quiet,
            },
            QuietOff => Mode {
                activity,
                visibility: Visibility::Normal,
            },
            ToggleQuiet => Mode {
                activity,
                visibility: visibility.toggled(),
            },
        }
    }
}
