//! Touch pads
//!
//! The pads sit behind touch sensor ICs with a digital output, high while
//! touched.

use embassy_rp::gpio::Input;

use nodoze_core::touch::TouchSample;
use nodoze_core::traits::TouchInput;

pub struct TouchPads {
    toggle: Input<'static>,
    quiet: Input<'static>,
}

impl TouchPads {
    pub fn new(toggle: Input<'static>, quiet: Input<'static>) -> Self {
        Self { toggle, quiet }
    }
}

impl TouchInput for TouchPads {
    fn sample(&mut self) -> TouchSample {
        TouchSample {
            toggle: self.toggle.is_high(),
            quiet: self.quiet.is_high(),
        }
    }
}
