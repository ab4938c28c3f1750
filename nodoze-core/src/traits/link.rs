//! Command link trait

use nodoze_protocol::{Line, Response};

/// Trait for the serial side of the device
///
/// Reading never waits: a line is either complete and ready or absent.
#[allow(async_fn_in_trait)]
pub trait CommandLink {
    /// Take the next complete command line, if one has arrived
    fn poll_line(&mut self) -> Option<Line>;

    /// Queue one response line for the host
    async fn send(&mut self, response: Response);
}
