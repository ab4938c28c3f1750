//! Indicator output trait

use crate::indicator::IndicatorFrame;

/// Trait for whatever displays the status indicator
///
/// The frame carries the abstract colour and why it may be suppressed;
/// implementations normally just render [`IndicatorFrame::visible_color`].
#[allow(async_fn_in_trait)]
pub trait IndicatorOutput {
    async fn show(&mut self, frame: IndicatorFrame);
}
