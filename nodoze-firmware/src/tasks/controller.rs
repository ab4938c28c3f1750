//! Main controller task
//!
//! Owns the device state. On every tick it pulls a pending command line and
//! a touch sample, runs the device loop, and pushes the response, HID action
//! and indicator frame out to the hardware.

use defmt::*;

use nodoze_core::{run_tick, Device, WyRandPicker};

use crate::adapters::{ChannelLink, StatusLeds, TouchPads, UsbHid};
use crate::tasks::tick::TICK_SIGNAL;

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(
    mut device: Device<WyRandPicker>,
    mut hid: UsbHid,
    mut leds: StatusLeds,
    mut touch: Option<TouchPads>,
) {
    info!("Controller task started");

    let mut link = ChannelLink;
    let mut mode = device.mode();

    loop {
        let now_ms = TICK_SIGNAL.wait().await;

        let report = run_tick(
            &mut device,
            now_ms,
            &mut link,
            touch.as_mut(),
            &mut hid,
            &mut leds,
        )
        .await;

        if let Some(response) = report.output.response {
            debug!("Response: {:?}", response);
        }

        if device.mode() != mode {
            mode = device.mode();
            info!("Mode: {:?}", mode);
        }

        if let Some(action) = report.output.action {
            debug!("Action: {:?}", action);
        }

        if let Some(e) = report.hid_error {
            warn!("HID action failed: {:?}", e);
        }

        if let Some(frame) = report.output.indicator {
            trace!("Indicator: {:?}", frame);
        }
    }
}
