//! Keep-awake actions
//!
//! An action is a short, non-interfering burst of HID input that resets the
//! host's idle timer: a tap on F15 (no application binds it) or a one-pixel
//! pointer nudge that is immediately undone.

use nanorand::{Rng, WyRand};

/// HID usage ID of the F15 key
pub const KEY_F15: u8 = 0x6A;

/// Gap between a pointer nudge and its reversal
pub const NUDGE_PAUSE_MS: u32 = 50;

/// The keep-awake action variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeepAwakeAction {
    /// Press and release F15
    TapKey,
    /// Move the pointer one pixel right and back
    NudgeHorizontal,
    /// Move the pointer one pixel down and back
    NudgeVertical,
}

/// One step of HID output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidStep {
    /// Press a key (HID usage ID)
    Press(u8),
    /// Release all keys
    ReleaseAll,
    /// Relative pointer move
    Move { dx: i8, dy: i8 },
    /// Wait before the next step
    Pause(u32),
}

const TAP_KEY_STEPS: &[HidStep] = &[HidStep::Press(KEY_F15), HidStep::ReleaseAll];

const NUDGE_HORIZONTAL_STEPS: &[HidStep] = &[
    HidStep::Move { dx: 1, dy: 0 },
    HidStep::Pause(NUDGE_PAUSE_MS),
    HidStep::Move { dx: -1, dy: 0 },
];

const NUDGE_VERTICAL_STEPS: &[HidStep] = &[
    HidStep::Move { dx: 0, dy: 1 },
    HidStep::Pause(NUDGE_PAUSE_MS),
    HidStep::Move { dx: 0, dy: -1 },
];

impl KeepAwakeAction {
    /// Every action variant
    pub const ALL: &'static [KeepAwakeAction] = &[
        KeepAwakeAction::TapKey,
        KeepAwakeAction::NudgeHorizontal,
        KeepAwakeAction::NudgeVertical,
    ];

    /// HID output sequence for this action
    pub fn steps(self) -> &'static [HidStep] {
        match self {
            KeepAwakeAction::TapKey => TAP_KEY_STEPS,
            KeepAwakeAction::NudgeHorizontal => NUDGE_HORIZONTAL_STEPS,
            KeepAwakeAction::NudgeVertical => NUDGE_VERTICAL_STEPS,
        }
    }

    /// Check if this action uses the pointer
    pub fn is_pointer(self) -> bool {
        !matches!(self, KeepAwakeAction::TapKey)
    }
}

/// Chooses which configured action fires next
pub trait ActionPicker {
    /// Return an index in `0..count`; `count` is never zero
    fn pick(&mut self, count: usize) -> usize;
}

/// Uniform picker backed by WyRand
#[derive(Clone)]
pub struct WyRandPicker {
    rng: WyRand,
}

impl WyRandPicker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: WyRand::new_seed(seed),
        }
    }
}

impl ActionPicker for WyRandPicker {
    fn pick(&mut self, count: usize) -> usize {
        if count <= 1 {
            return 0;
        }
        self.rng.generate_range(0..count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nudges_return_to_origin() {
        for action in KeepAwakeAction::ALL {
            let (x, y) = action.steps().iter().fold((0i32, 0i32), |(x, y), step| match step {
                HidStep::Move { dx, dy } => (x + *dx as i32, y + *dy as i32),
                _ => (x, y),
            });
            assert_eq!((x, y), (0, 0), "{:?}", action);
        }
    }

    #[test]
    fn test_tap_key_releases() {
        let steps = KeepAwakeAction::TapKey.steps();
        assert_eq!(steps.first(), Some(&HidStep::Press(KEY_F15)));
        assert_eq!(steps.last(), Some(&HidStep::ReleaseAll));
        assert!(!KeepAwakeAction::TapKey.is_pointer());
    }

    #[test]
    fn test_wyrand_stays_in_range() {
        let mut picker = WyRandPicker::new(0xC0FFEE);
        let mut seen = [0usize; 3];
        for _ in 0..600 {
            let index = picker.pick(3);
            assert!(index < 3);
            seen[index] += 1;
        }
        // Uniform choice: every variant shows up
        assert!(seen.iter().all(|&n| n > 0));
    }

    #[test]
    fn test_wyrand_single_choice() {
        let mut picker = WyRandPicker::new(1);
        assert_eq!(picker.pick(1), 0);
    }

    #[test]
    fn test_wyrand_is_reproducible() {
        let mut a = WyRandPicker::new(42);
        let mut b = WyRandPicker::new(42);
        for _ in 0..32 {
            assert_eq!(a.pick(3), b.pick(3));
        }
    }
}
