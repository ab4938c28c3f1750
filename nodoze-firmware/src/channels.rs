//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Only the controller task touches the device state; the serial tasks talk
//! to it through these.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use nodoze_protocol::{Line, Response};

/// Channel capacity for complete command lines from the host
const COMMAND_CHANNEL_SIZE: usize = 4;

/// Channel capacity for response lines to the host
const RESPONSE_CHANNEL_SIZE: usize = 4;

/// Command lines received over USB serial
pub static COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, Line, COMMAND_CHANNEL_SIZE> =
    Channel::new();

/// Responses waiting to be written back over USB serial
pub static RESPONSE_CHANNEL: Channel<CriticalSectionRawMutex, Response, RESPONSE_CHANNEL_SIZE> =
    Channel::new();
