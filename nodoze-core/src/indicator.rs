//! Status indicator model
//!
//! The indicator shows a colour derived from the mode, optionally overlaid
//! by a short flash. It can be suppressed two ways: quiet mode (user choice)
//! or auto-blank (no indicator change for a while). The output is abstract;
//! mapping colours to LEDs is the firmware's job.

use crate::state::Mode;

/// Abstract indicator colours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    Off,
    /// Keep-awake running
    Active,
    /// Ready, not acting
    Idle,
    /// Shown briefly when an action fires
    ActionFlash,
    /// Shown briefly when quiet mode is toggled from a pad
    AlertFlash,
}

/// Why the indicator is dark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Suppression {
    None,
    /// Quiet mode is on
    Quiet,
    /// Auto-blank timeout elapsed
    AutoBlank,
}

/// What the indicator should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndicatorFrame {
    pub color: Color,
    pub suppression: Suppression,
}

impl IndicatorFrame {
    pub const fn new(color: Color) -> Self {
        Self {
            color,
            suppression: Suppression::None,
        }
    }

    /// Colour actually emitted, after suppression
    pub fn visible_color(&self) -> Color {
        match self.suppression {
            Suppression::None => self.color,
            Suppression::Quiet | Suppression::AutoBlank => Color::Off,
        }
    }

    pub fn is_lit(&self) -> bool {
        self.visible_color() != Color::Off
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Flash {
    color: Color,
    until_ms: u64,
    /// Shown even in quiet mode
    forced: bool,
}

/// Indicator state tracking overlays and the auto-blank timer
#[derive(Debug, Clone)]
pub struct Indicator {
    timeout_ms: Option<u64>,
    flash: Option<Flash>,
    /// Last frame derived from mode and overlay, before auto-blank
    desired: Option<IndicatorFrame>,
    changed_at_ms: u64,
    blanked: bool,
    /// Last frame handed out by `update`
    shown: Option<IndicatorFrame>,
}

impl Indicator {
    /// Create an indicator; `timeout_ms` enables auto-blank
    pub fn new(timeout_ms: Option<u64>, now_ms: u64) -> Self {
        Self {
            timeout_ms,
            flash: None,
            desired: None,
            changed_at_ms: now_ms,
            blanked: false,
            shown: None,
        }
    }

    /// Start a flash overlay
    ///
    /// A non-forced flash is hidden by quiet mode like everything else.
    pub fn flash(&mut self, color: Color, duration_ms: u32, forced: bool, now_ms: u64) {
        self.flash = Some(Flash {
            color,
            until_ms: now_ms + duration_ms as u64,
            forced,
        });
    }

    /// Restart the auto-blank window and wake a blanked indicator
    pub fn rearm(&mut self, now_ms: u64) {
        self.changed_at_ms = now_ms;
        self.blanked = false;
    }

    /// Check whether a flash overlay is running
    pub fn is_flashing(&self) -> bool {
        self.flash.is_some()
    }

    /// Frame implied by the mode and overlay, ignoring auto-blank
    pub fn compose(&self, mode: Mode) -> IndicatorFrame {
        let base = if mode.is_active() {
            Color::Active
        } else {
            Color::Idle
        };

        match self.flash {
            Some(flash) if flash.forced || !mode.is_quiet() => IndicatorFrame::new(flash.color),
            _ if mode.is_quiet() => IndicatorFrame {
                color: base,
                suppression: Suppression::Quiet,
            },
            _ => IndicatorFrame::new(base),
        }
    }

    /// Advance timers and return the frame to show if it changed
    pub fn update(&mut self, mode: Mode, now_ms: u64) -> Option<IndicatorFrame> {
        if let Some(flash) = self.flash {
            if now_ms >= flash.until_ms {
                self.flash = None;
            }
        }

        let desired = self.compose(mode);
        if self.desired != Some(desired) {
            self.desired = Some(desired);
            self.rearm(now_ms);
        }

        if let Some(timeout_ms) = self.timeout_ms {
            let visible = desired.suppression == Suppression::None;
            if visible && !self.blanked && now_ms.saturating_sub(self.changed_at_ms) >= timeout_ms {
                self.blanked = true;
            }
        }

        let frame = if self.blanked && desired.suppression == Suppression::None {
            IndicatorFrame {
                color: desired.color,
                suppression: Suppression::AutoBlank,
            }
        } else {
            desired
        };

        if self.shown == Some(frame) {
            None
        } else {
            self.shown = Some(frame);
            Some(frame)
        }
    }

    /// Last frame returned by [`Indicator::update`]
    pub fn current(&self) -> Option<IndicatorFrame> {
        self.shown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Event;

    fn active() -> Mode {
        Mode::POWER_ON.transition(Event::Activate)
    }

    #[test]
    fn test_first_update_shows_idle() {
        let mut indicator = Indicator::new(None, 0);
        let frame = indicator.update(Mode::POWER_ON, 0).unwrap();
        assert_eq!(frame, IndicatorFrame::new(Color::Idle));
        // Unchanged on the next tick
        assert_eq!(indicator.update(Mode::POWER_ON, 100), None);
        assert_eq!(indicator.current(), Some(frame));
    }

    #[test]
    fn test_quiet_suppresses_and_restores() {
        let mut indicator = Indicator::new(None, 0);
        let before = indicator.update(active(), 0).unwrap();
        assert_eq!(before.visible_color(), Color::Active);

        let quiet = indicator.update(active().transition(Event::QuietOn), 100).unwrap();
        assert_eq!(quiet.suppression, Suppression::Quiet);
        assert!(!quiet.is_lit());

        let after = indicator.update(active(), 200).unwrap();
        assert_eq!(after, before);
    }

    #[test]
    fn test_action_flash_expires() {
        let mut indicator = Indicator::new(None, 0);
        indicator.update(active(), 0);

        indicator.flash(Color::ActionFlash, 100, false, 1_000);
        assert_eq!(
            indicator.update(active(), 1_000),
            Some(IndicatorFrame::new(Color::ActionFlash))
        );
        assert_eq!(indicator.update(active(), 1_050), None);
        assert_eq!(
            indicator.update(active(), 1_100),
            Some(IndicatorFrame::new(Color::Active))
        );
        assert!(!indicator.is_flashing());
    }

    #[test]
    fn test_quiet_hides_unforced_flash() {
        let quiet = active().transition(Event::QuietOn);
        let mut indicator = Indicator::new(None, 0);
        indicator.update(quiet, 0);

        indicator.flash(Color::ActionFlash, 100, false, 500);
        assert_eq!(indicator.update(quiet, 500), None);
    }

    #[test]
    fn test_forced_flash_shows_in_quiet() {
        let quiet = Mode::POWER_ON.transition(Event::QuietOn);
        let mut indicator = Indicator::new(None, 0);
        indicator.update(quiet, 0);

        indicator.flash(Color::AlertFlash, 300, true, 500);
        let frame = indicator.update(quiet, 500).unwrap();
        assert_eq!(frame.visible_color(), Color::AlertFlash);

        let settled = indicator.update(quiet, 800).unwrap();
        assert_eq!(settled.suppression, Suppression::Quiet);
    }

    #[test]
    fn test_auto_blank_after_timeout() {
        let mut indicator = Indicator::new(Some(10_000), 0);
        indicator.update(Mode::POWER_ON, 0);
        assert_eq!(indicator.update(Mode::POWER_ON, 9_900), None);

        let blank = indicator.update(Mode::POWER_ON, 10_000).unwrap();
        assert_eq!(blank.suppression, Suppression::AutoBlank);
        assert_eq!(blank.visible_color(), Color::Off);
    }

    #[test]
    fn test_change_rearms_auto_blank() {
        let mut indicator = Indicator::new(Some(10_000), 0);
        indicator.update(Mode::POWER_ON, 0);
        indicator.update(Mode::POWER_ON, 10_000);

        let woke = indicator.update(active(), 12_000).unwrap();
        assert_eq!(woke, IndicatorFrame::new(Color::Active));
        assert_eq!(indicator.update(active(), 21_999), None);
        assert_eq!(
            indicator.update(active(), 22_000).map(|f| f.suppression),
            Some(Suppression::AutoBlank)
        );
    }

    #[test]
    fn test_rearm_wakes_without_mode_change() {
        let mut indicator = Indicator::new(Some(1_000), 0);
        indicator.update(active(), 0);
        indicator.update(active(), 1_000);

        indicator.rearm(1_500);
        assert_eq!(
            indicator.update(active(), 1_500),
            Some(IndicatorFrame::new(Color::Active))
        );
    }

    #[test]
    fn test_quiet_does_not_auto_blank() {
        let quiet = active().transition(Event::QuietOn);
        let mut indicator = Indicator::new(Some(1_000), 0);
        indicator.update(quiet, 0);
        assert_eq!(indicator.update(quiet, 5_000), None);
    }
}
