//! USB device task
//!
//! Runs the embassy-usb device state machine (enumeration, suspend, resume).
//! The class tasks only make progress while this is running.

use defmt::*;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::UsbDevice;

#[embassy_executor::task]
pub async fn usb_task(mut usb: UsbDevice<'static, Driver<'static, USB>>) -> ! {
    info!("USB task started");
    usb.run().await
}
