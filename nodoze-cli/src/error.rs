use thiserror::Error;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("no NoDoze device found on any serial port")]
    TransportUnavailable,

    #[error("cannot open serial port {port}: {source}")]
    Serial {
        port: String,
        #[source]
        source: serialport::Error,
    },

    #[error("cannot list serial ports: {0}")]
    Enumerate(#[source] serialport::Error),

    #[error("timed out writing to the device")]
    Timeout,

    #[error("device sent an unreadable line: {0}")]
    Garbled(nodoze_protocol::LineError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
