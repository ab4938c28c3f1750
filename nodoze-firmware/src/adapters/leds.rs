//! WS2812 status LEDs
//!
//! All four pixels show the same colour.

use embassy_rp::peripherals::PIO0;
use embassy_rp::pio_programs::ws2812::PioWs2812;
use smart_leds::RGB8;

use nodoze_core::indicator::{Color, IndicatorFrame};
use nodoze_core::traits::IndicatorOutput;

/// Number of pixels on the board
pub const NUM_LEDS: usize = 4;

/// Global brightness (0-255), roughly 30%
const BRIGHTNESS: u8 = 76;

pub type Strip = PioWs2812<'static, PIO0, 0, NUM_LEDS>;

/// Map an indicator colour to full-scale RGB
pub fn rgb(color: Color) -> RGB8 {
    match color {
        Color::Off => RGB8::new(0, 0, 0),
        Color::Active => RGB8::new(0, 255, 0),
        Color::Idle => RGB8::new(0, 0, 255),
        Color::ActionFlash => RGB8::new(255, 255, 0),
        Color::AlertFlash => RGB8::new(255, 0, 255),
    }
}

pub struct StatusLeds {
    strip: Strip,
}

impl StatusLeds {
    pub fn new(strip: Strip) -> Self {
        Self { strip }
    }

    pub async fn fill(&mut self, color: RGB8) {
        let mut pixels = [RGB8::default(); NUM_LEDS];
        for (pixel, dimmed) in pixels
            .iter_mut()
            .zip(smart_leds::brightness(core::iter::repeat(color), BRIGHTNESS))
        {
            *pixel = dimmed;
        }
        self.strip.write(&pixels).await;
    }
}

impl IndicatorOutput for StatusLeds {
    async fn show(&mut self, frame: IndicatorFrame) {
        self.fill(rgb(frame.visible_color())).await;
    }
}
