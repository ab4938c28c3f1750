//! Tick task for time-based updates
//!
//! Drives the controller at a fixed cadence. Each tick carries the
//! milliseconds elapsed since boot.

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Ticker};

/// Tick interval in milliseconds
pub const TICK_INTERVAL_MS: u64 = 100;

/// Signal to notify controller of tick
pub static TICK_SIGNAL: Signal<CriticalSectionRawMutex, u64> = Signal::new();

/// Tick task - sends periodic tick signals with timestamp
#[embassy_executor::task]
pub async fn tick_task() {
    info!("Tick task started");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));

    loop {
        ticker.next().await;

        // Signal overwrites, so a slow controller skips ticks instead of queueing them
        TICK_SIGNAL.signal(Instant::now().as_millis());
    }
}
