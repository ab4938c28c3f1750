//! Device configuration
//!
//! Nothing is persisted; the firmware builds a config at boot from its
//! cargo features and every power cycle starts from it.

use nodoze_protocol::{interval_in_range, DEFAULT_INTERVAL_S, MIN_INTERVAL_S};

use crate::action::KeepAwakeAction;

/// Delay before the first action after a touch activation (seconds)
pub const DEFAULT_ACTION_OFFSET_S: u16 = 2;

/// Duration of the action flash (ms)
pub const DEFAULT_ACTION_FLASH_MS: u32 = 100;

/// Duration of the quiet-toggle alert flash (ms)
pub const DEFAULT_ALERT_FLASH_MS: u32 = 300;

/// Auto-blank timeout used when touch pads drive the device (seconds)
pub const TOUCH_INDICATOR_TIMEOUT_S: u16 = 10;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Initial interval outside 5..=300 s
    IntervalOutOfRange,
    /// Action offset must be shorter than the shortest interval
    OffsetTooLong,
    /// Auto-blank timeout of zero would blank immediately
    ZeroIndicatorTimeout,
    /// No action variants enabled
    NoActions,
}

/// Tunable device behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceConfig {
    /// Action interval after power-up (seconds)
    pub initial_interval_s: u16,
    /// First-action delay after a touch activation (seconds)
    pub action_offset_s: u16,
    /// Action flash length (ms)
    pub action_flash_ms: u32,
    /// Quiet-toggle alert flash length (ms)
    pub alert_flash_ms: u32,
    /// Blank indicators after this long without a change; `None` disables
    pub indicator_timeout_s: Option<u16>,
    /// Action variants to choose from
    pub actions: &'static [KeepAwakeAction],
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            initial_interval_s: DEFAULT_INTERVAL_S,
            action_offset_s: DEFAULT_ACTION_OFFSET_S,
            action_flash_ms: DEFAULT_ACTION_FLASH_MS,
            alert_flash_ms: DEFAULT_ALERT_FLASH_MS,
            indicator_timeout_s: None,
            actions: KeepAwakeAction::ALL,
        }
    }
}

impl DeviceConfig {
    /// Defaults for a device with touch pads: indicators auto-blank
    pub fn with_touch() -> Self {
        Self {
            indicator_timeout_s: Some(TOUCH_INDICATOR_TIMEOUT_S),
            ..Self::default()
        }
    }

    /// Check the configuration for values the device loop cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !interval_in_range(self.initial_interval_s) {
            return Err(ConfigError::IntervalOutOfRange);
        }
        if self.action_offset_s >= MIN_INTERVAL_S {
            return Err(ConfigError::OffsetTooLong);
        }
        if self.indicator_timeout_s == Some(0) {
            return Err(ConfigError::ZeroIndicatorTimeout);
        }
        if self.actions.is_empty() {
            return Err(ConfigError::NoActions);
        }
        Ok(())
    }

    /// Auto-blank timeout in milliseconds
    pub fn indicator_timeout_ms(&self) -> Option<u64> {
        self.indicator_timeout_s.map(|s| s as u64 * 1000)
    }
}
