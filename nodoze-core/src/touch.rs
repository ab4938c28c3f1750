//! Touch pad edge detection
//!
//! Capacitive pads are sampled as a level once per tick. A finger resting on
//! a pad stays asserted for many ticks, so each pad goes through a two-state
//! latch that reports only the released → pressed transition.
//!
//! | latch    | sample   | next     | edge |
//! |----------|----------|----------|------|
//! | released | low      | released | no   |
//! | released | high     | pressed  | yes  |
//! | pressed  | high     | pressed  | no   |
//! | pressed  | low      | released | no   |

/// Edge latch for a single level-sensed input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EdgeLatch {
    pressed: bool,
}

impl EdgeLatch {
    pub const fn new() -> Self {
        Self { pressed: false }
    }

    /// Feed one sample; returns true on a rising edge
    pub fn update(&mut self, asserted: bool) -> bool {
        let rising = asserted && !self.pressed;
        self.pressed = asserted;
        rising
    }

    /// Check if the input has been held since the last rising edge
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

/// One sample of both touch pads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchSample {
    /// Pad 1: toggles activity
    pub toggle: bool,
    /// Pad 2: toggles quiet mode
    pub quiet: bool,
}

/// Rising edges detected in one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchEdges {
    pub toggle: bool,
    pub quiet: bool,
}

impl TouchEdges {
    pub fn any(&self) -> bool {
        self.toggle || self.quiet
    }
}

/// Latches for both pads
#[derive(Debug, Clone, Copy, Default)]
pub struct TouchLatches {
    toggle: EdgeLatch,
    quiet: EdgeLatch,
}

impl TouchLatches {
    pub const fn new() -> Self {
        Self {
            toggle: EdgeLatch::new(),
            quiet: EdgeLatch::new(),
        }
    }

    pub fn update(&mut self, sample: TouchSample) -> TouchEdges {
        TouchEdges {
            toggle: self.toggle.update(sample.toggle),
            quiet: self.quiet.update(sample.quiet),
        }
    }
}
