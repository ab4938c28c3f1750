//! NoDoze - USB keep-awake firmware
//!
//! Main firmware binary for RP2040 boards. Enumerates as a composite USB
//! device (CDC-ACM serial, HID keyboard, HID mouse), drives four WS2812
//! status pixels and optionally reads two touch pads.
//!
//! Board wiring:
//! - WS2812 data: GPIO16
//! - Touch pad 1 (toggle activity): GPIO2
//! - Touch pad 2 (toggle quiet mode): GPIO3

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{PIO0, USB};
use embassy_rp::pio::Pio;
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_rp::usb::Driver;
use embassy_time::Instant;
use embassy_usb::class::hid::{
    Config as HidConfig, HidBootProtocol, HidSubclass, HidWriter, State as HidState,
};
use embassy_usb::{Builder, Config as UsbConfig};
use static_cell::StaticCell;
use usbd_hid::descriptor::{KeyboardReport, MouseReport, SerializedDescriptor};
use {defmt_rtt as _, panic_probe as _};

use nodoze_core::{Device, DeviceConfig, WyRandPicker};

use crate::adapters::hid::{KEYBOARD_REPORT_LEN, MOUSE_REPORT_LEN};
use crate::adapters::{StatusLeds, TouchPads, UsbHid};

mod adapters;
mod channels;
mod tasks;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
    PIO0_IRQ_0 => embassy_rp::pio::InterruptHandler<PIO0>;
});

/// pid.codes test VID/PID
const USB_VID: u16 = 0x1209;
const USB_PID: u16 = 0x0001;

/// HID poll interval
const HID_POLL_MS: u8 = 10;

// Static cells for USB descriptors and class state (must live forever)
static CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static KEYBOARD_STATE: StaticCell<HidState> = StaticCell::new();
static MOUSE_STATE: StaticCell<HidState> = StaticCell::new();
#[cfg(feature = "serial-commands")]
static CDC_STATE: StaticCell<embassy_usb::class::cdc_acm::State> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("NoDoze firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Device configuration comes from cargo features; nothing is persisted
    let config = if cfg!(feature = "touch-inputs") {
        DeviceConfig::with_touch()
    } else {
        DeviceConfig::default()
    };
    let config = match config.validate() {
        Ok(()) => config,
        Err(e) => {
            warn!("Invalid device config ({:?}), using defaults", e);
            DeviceConfig::default()
        }
    };

    // Setup USB composite device
    let driver = Driver::new(p.USB, Irqs);

    let mut usb_config = UsbConfig::new(USB_VID, USB_PID);
    usb_config.manufacturer = Some("NoDoze");
    usb_config.product = Some("NoDoze keep-awake");
    usb_config.serial_number = Some("00000001");
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    let mut builder = Builder::new(
        driver,
        usb_config,
        CONFIG_DESC.init([0; 256]),
        BOS_DESC.init([0; 256]),
        &mut [],
        CONTROL_BUF.init([0; 64]),
    );

    #[cfg(feature = "serial-commands")]
    let serial = {
        use embassy_usb::class::cdc_acm::{CdcAcmClass, State as CdcState};
        let class = CdcAcmClass::new(&mut builder, CDC_STATE.init(CdcState::new()), 64);
        class.split()
    };

    let keyboard = HidWriter::<_, KEYBOARD_REPORT_LEN>::new(
        &mut builder,
        KEYBOARD_STATE.init(HidState::new()),
        HidConfig {
            report_descriptor: KeyboardReport::desc(),
            request_handler: None,
            poll_ms: HID_POLL_MS,
            max_packet_size: KEYBOARD_REPORT_LEN as u16,
            hid_subclass: HidSubclass::Boot,
            hid_boot_protocol: HidBootProtocol::Keyboard,
        },
    );

    let mouse = HidWriter::<_, MOUSE_REPORT_LEN>::new(
        &mut builder,
        MOUSE_STATE.init(HidState::new()),
        HidConfig {
            report_descriptor: MouseReport::desc(),
            request_handler: None,
            poll_ms: HID_POLL_MS,
            max_packet_size: MOUSE_REPORT_LEN as u16,
            hid_subclass: HidSubclass::Boot,
            hid_boot_protocol: HidBootProtocol::Mouse,
        },
    );

    let usb = builder.build();
    info!("USB composite device built");

    // Setup PIO0 for the WS2812 status pixels
    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let program = PioWs2812Program::new(&mut common);
    let strip = PioWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_16, &program);
    info!("Status LEDs initialized");

    // Setup touch pads
    #[cfg(feature = "touch-inputs")]
    let touch = {
        use embassy_rp::gpio::{Input, Pull};
        info!("Touch pads enabled");
        Some(TouchPads::new(
            Input::new(p.PIN_2, Pull::Down),
            Input::new(p.PIN_3, Pull::Down),
        ))
    };
    #[cfg(not(feature = "touch-inputs"))]
    let touch: Option<TouchPads> = None;

    let device = Device::new(
        config,
        WyRandPicker::new(Instant::now().as_ticks()),
        Instant::now().as_millis(),
    );
    info!(
        "Device ready: interval={}s, auto-blank={:?}",
        device.interval_s(),
        config.indicator_timeout_s
    );

    // Spawn tasks
    unwrap!(spawner.spawn(tasks::usb_task(usb)));
    unwrap!(spawner.spawn(tasks::tick_task()));

    #[cfg(feature = "serial-commands")]
    {
        let (tx, rx) = serial;
        unwrap!(spawner.spawn(tasks::serial_rx_task(rx)));
        unwrap!(spawner.spawn(tasks::serial_tx_task(tx)));
    }

    unwrap!(spawner.spawn(tasks::controller_task(
        device,
        UsbHid::new(keyboard, mouse),
        StatusLeds::new(strip),
        touch,
    )));

    info!("All tasks spawned");
}
