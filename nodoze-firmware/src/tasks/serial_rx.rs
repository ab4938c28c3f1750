//! USB serial receive task
//!
//! Reassembles newline-terminated command lines from CDC-ACM packets and
//! hands them to the controller.

use defmt::*;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::cdc_acm::Receiver;
use embassy_usb::driver::EndpointError;

use nodoze_protocol::LineBuffer;

use crate::channels::COMMAND_CHANNEL;

/// Full-speed bulk packet size
const RX_BUF_SIZE: usize = 64;

/// Serial RX task - receives command lines from the host
#[embassy_executor::task]
pub async fn serial_rx_task(mut rx: Receiver<'static, Driver<'static, USB>>) {
    info!("Serial RX task started");

    let mut lines = LineBuffer::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        rx.wait_connection().await;
        info!("Host opened serial port");
        lines.reset();

        loop {
            match rx.read_packet(&mut buf).await {
                Ok(n) => {
                    trace!("RX: {} bytes", n);
                    for &byte in &buf[..n] {
                        match lines.feed(byte) {
                            Ok(Some(line)) => {
                                debug!("Line: {=str}", line.as_str());
                                if COMMAND_CHANNEL.try_send(line).is_err() {
                                    warn!("Command channel full, dropping line");
                                }
                            }
                            Ok(None) => {
                                // Need more bytes
                            }
                            Err(e) => {
                                warn!("Line error: {:?}", e);
                            }
                        }
                    }
                }
                Err(EndpointError::BufferOverflow) => {
                    warn!("USB packet too large");
                }
                Err(EndpointError::Disabled) => {
                    info!("Host closed serial port");
                    break;
                }
            }
        }
    }
}
