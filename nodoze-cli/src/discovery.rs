//! Finding the device among the host's serial ports
//!
//! Candidates are USB serial ports. Each is opened and sent `status`; the
//! first one that answers with a status line is the device.

use std::time::Duration;

use nodoze_protocol::{Command, Response};
use serialport::{DataBits, Parity, SerialPort, SerialPortInfo, SerialPortType, StopBits};
use tracing::{debug, info};

use crate::error::LinkError;
use crate::link::{DeviceLink, LinkConfig};

/// Link over a real serial port
pub type SerialLink = DeviceLink<Box<dyn SerialPort>>;

/// How long a candidate gets to answer the probe
const PROBE_WAIT: Duration = Duration::from_millis(100);
const PROBE_TIMEOUT: Duration = Duration::from_millis(300);

/// Per-read timeout on the port itself; the link enforces the overall deadline
const PORT_READ_TIMEOUT: Duration = Duration::from_millis(50);

/// Name fragments of USB CDC-ACM ports on Linux, macOS and Windows
const USB_NAME_HINTS: &[&str] = &["ACM", "usbmodem", "COM"];

/// Check whether a port could be the device
pub fn is_candidate(info: &SerialPortInfo) -> bool {
    matches!(info.port_type, SerialPortType::UsbPort(_))
        || USB_NAME_HINTS
            .iter()
            .any(|hint| info.port_name.contains(hint))
}

/// Human-readable description of a port, for listings
pub fn describe_port(info: &SerialPortInfo) -> String {
    match &info.port_type {
        SerialPortType::UsbPort(usb) => {
            let product = usb.product.as_deref().unwrap_or("USB Serial Device");
            match usb.manufacturer.as_deref() {
                Some(maker) => format!("{product} ({maker}, {:04x}:{:04x})", usb.vid, usb.pid),
                None => format!("{product} ({:04x}:{:04x})", usb.vid, usb.pid),
            }
        }
        SerialPortType::PciPort => "PCI serial port".to_string(),
        SerialPortType::BluetoothPort => "Bluetooth serial port".to_string(),
        SerialPortType::Unknown => "n/a".to_string(),
    }
}

/// Every serial port on the host
pub fn available_ports() -> Result<Vec<SerialPortInfo>, LinkError> {
    serialport::available_ports().map_err(LinkError::Enumerate)
}

/// Open a serial port with the device's line settings
pub fn open_port(name: &str, config: &LinkConfig) -> Result<Box<dyn SerialPort>, LinkError> {
    serialport::new(name, config.baud_rate)
        .timeout(PORT_READ_TIMEOUT)
        .data_bits(DataBits::Eight)
        .stop_bits(StopBits::One)
        .parity(Parity::None)
        .open()
        .map_err(|source| LinkError::Serial {
            port: name.to_string(),
            source,
        })
}

/// Ask a freshly opened port for its status
fn probe(port: Box<dyn SerialPort>, config: &LinkConfig) -> Option<SerialLink> {
    let probe_config = LinkConfig {
        settle: PROBE_WAIT,
        read_timeout: PROBE_TIMEOUT,
        ..*config
    };
    let mut link = DeviceLink::new(port, probe_config);

    match link.send(Command::Status) {
        Ok(Some(Response::Status(_))) => {
            // Hand back a link with the caller's timing
            Some(DeviceLink::new(link.into_inner(), *config))
        }
        Ok(other) => {
            debug!(?other, "not a NoDoze device");
            None
        }
        Err(e) => {
            debug!(error = %e, "probe failed");
            None
        }
    }
}

/// Scan all candidate ports for the device
pub fn find_device(config: &LinkConfig) -> Result<(String, SerialLink), LinkError> {
    for info in available_ports()?.into_iter().filter(is_candidate) {
        debug!(port = %info.port_name, "probing");
        let port = match open_port(&info.port_name, config) {
            Ok(port) => port,
            Err(e) => {
                debug!(error = %e, "skipping");
                continue;
            }
        };
        if let Some(link) = probe(port, config) {
            info!(port = %info.port_name, "found NoDoze device");
            return Ok((info.port_name, link));
        }
    }
    Err(LinkError::TransportUnavailable)
}

/// Open the named port, or search for the device when none is given
pub fn connect(port: Option<&str>, config: &LinkConfig) -> Result<(String, SerialLink), LinkError> {
    match port {
        Some(name) => {
            let link = DeviceLink::new(open_port(name, config)?, *config);
            info!(port = name, "connected");
            Ok((name.to_string(), link))
        }
        None => find_device(config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serialport::UsbPortInfo;

    fn port(name: &str, port_type: SerialPortType) -> SerialPortInfo {
        SerialPortInfo {
            port_name: name.to_string(),
            port_type,
        }
    }

    fn usb(product: Option<&str>) -> SerialPortType {
        SerialPortType::UsbPort(UsbPortInfo {
            vid: 0x1209,
            pid: 0x0001,
            serial_number: None,
            manufacturer: Some("NoDoze".to_string()),
            product: product.map(str::to_string),
        })
    }

    #[test]
    fn test_usb_ports_are_candidates() {
        assert!(is_candidate(&port("/dev/ttyUSB0", usb(None))));
        assert!(is_candidate(&port("/dev/ttyACM0", SerialPortType::Unknown)));
        assert!(is_candidate(&port("/dev/cu.usbmodem1101", SerialPortType::Unknown)));
        assert!(is_candidate(&port("COM4", SerialPortType::Unknown)));
    }

    #[test]
    fn test_other_ports_are_not_candidates() {
        assert!(!is_candidate(&port("/dev/ttyS0", SerialPortType::Unknown)));
        assert!(!is_candidate(&port("/dev/rfcomm0", SerialPortType::BluetoothPort)));
        assert!(!is_candidate(&port("/dev/ttyS4", SerialPortType::PciPort)));
    }

    #[test]
    fn test_describe_port() {
        assert_eq!(
            describe_port(&port("/dev/ttyACM0", usb(Some("NoDoze keep-awake")))),
            "NoDoze keep-awake (NoDoze, 1209:0001)"
        );
        assert_eq!(
            describe_port(&port("/dev/ttyACM0", usb(None))),
            "USB Serial Device (NoDoze, 1209:0001)"
        );
        assert_eq!(describe_port(&port("/dev/ttyS0", SerialPortType::Unknown)), "n/a");
    }

    #[test]
    fn test_open_missing_port_fails() {
        let err = open_port("/dev/nodoze-does-not-exist", &LinkConfig::default()).unwrap_err();
        assert!(matches!(err, LinkError::Serial { .. }));
        assert!(err.to_string().contains("/dev/nodoze-does-not-exist"));
    }
}
