//! Command link over the serial task channels

use nodoze_core::traits::CommandLink;
use nodoze_protocol::{Line, Response};

use crate::channels::{COMMAND_CHANNEL, RESPONSE_CHANNEL};

/// Controller-side end of the serial channels
pub struct ChannelLink;

impl CommandLink for ChannelLink {
    fn poll_line(&mut self) -> Option<Line> {
        COMMAND_CHANNEL.try_receive().ok()
    }

    async fn send(&mut self, response: Response) {
        RESPONSE_CHANNEL.send(response).await;
    }
}
