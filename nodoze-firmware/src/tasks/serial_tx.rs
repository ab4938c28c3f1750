//! USB serial transmit task
//!
//! Writes each response as one newline-terminated line.

use defmt::*;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::cdc_acm::Sender;
use heapless::String;

use nodoze_protocol::Response;

use crate::channels::RESPONSE_CHANNEL;

/// Longest response plus the terminator
const TX_LINE_LEN: usize = 32;

/// Serial TX task - sends responses to the host
#[embassy_executor::task]
pub async fn serial_tx_task(mut tx: Sender<'static, Driver<'static, USB>>) {
    info!("Serial TX task started");

    loop {
        let response = RESPONSE_CHANNEL.receive().await;

        let Some(line) = terminated(response) else {
            warn!("Response too long: {:?}", response);
            continue;
        };

        if let Err(e) = tx.write_packet(line.as_bytes()).await {
            // Host closed the port; the response is dropped
            warn!("Failed to send response: {:?}", e);
        } else {
            trace!("TX: {=str}", line.as_str());
        }
    }
}

fn terminated(response: Response) -> Option<String<TX_LINE_LEN>> {
    let mut line = String::new();
    line.push_str(response.encode().as_str()).ok()?;
    line.push('\n').ok()?;
    Some(line)
}
