//! USB HID keyboard and mouse

use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_time::Timer;
use embassy_usb::class::hid::HidWriter;
use embassy_usb::driver::EndpointError;
use usbd_hid::descriptor::{KeyboardReport, MouseReport};

use nodoze_core::traits::{HidError, KeepAwakeOutput};

/// Boot keyboard report size
pub const KEYBOARD_REPORT_LEN: usize = 8;

/// Mouse report size (buttons, x, y, wheel, pan)
pub const MOUSE_REPORT_LEN: usize = 5;

pub type KeyboardWriter = HidWriter<'static, Driver<'static, USB>, KEYBOARD_REPORT_LEN>;
pub type MouseWriter = HidWriter<'static, Driver<'static, USB>, MOUSE_REPORT_LEN>;

/// Keyboard and mouse interfaces of the composite device
pub struct UsbHid {
    keyboard: KeyboardWriter,
    mouse: MouseWriter,
}

impl UsbHid {
    pub fn new(keyboard: KeyboardWriter, mouse: MouseWriter) -> Self {
        Self { keyboard, mouse }
    }

    async fn send_keys(&mut self, keycodes: [u8; 6]) -> Result<(), HidError> {
        let report = KeyboardReport {
            modifier: 0,
            reserved: 0,
            leds: 0,
            keycodes,
        };
        self.keyboard
            .write_serialize(&report)
            .await
            .map_err(map_endpoint_error)
    }
}

impl KeepAwakeOutput for UsbHid {
    async fn press_key(&mut self, key: u8) -> Result<(), HidError> {
        self.send_keys([key, 0, 0, 0, 0, 0]).await
    }

    async fn release_keys(&mut self) -> Result<(), HidError> {
        self.send_keys([0; 6]).await
    }

    async fn move_pointer(&mut self, dx: i8, dy: i8) -> Result<(), HidError> {
        let report = MouseReport {
            buttons: 0,
            x: dx,
            y: dy,
            wheel: 0,
            pan: 0,
        };
        self.mouse
            .write_serialize(&report)
            .await
            .map_err(map_endpoint_error)
    }

    async fn pause(&mut self, ms: u32) {
        Timer::after_millis(ms as u64).await;
    }
}

fn map_endpoint_error(e: EndpointError) -> HidError {
    match e {
        EndpointError::Disabled => HidError::NotReady,
        EndpointError::BufferOverflow => HidError::ReportTooLarge,
    }
}
