//! Interactive monitor
//!
//! Reads short commands from stdin, one per line, and prints a friendly
//! result for each. A failed exchange is reported and the loop carries on.

use std::io::{BufRead, Read, Write};

use anyhow::Result;
use nodoze_protocol::{Activity, Command, Response, MAX_INTERVAL_S, MIN_INTERVAL_S};
use tracing::warn;

use crate::link::DeviceLink;

const HELP: &str = "\
Commands:
  1 or 'on'        - Turn ON keep-awake
  0 or 'off'       - Turn OFF keep-awake
  t or 'toggle'    - Toggle on/off
  s or 'status'    - Check status
  i or 'interval'  - Set interval (e.g., 'i 45')
  qon              - Enable quiet mode (LEDs off)
  qoff             - Disable quiet mode (LEDs on)
  q or 'quit'      - Exit monitor";

/// One line of monitor input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorInput {
    Send(Command),
    Quit,
    Empty,
    /// `i` without exactly one argument
    IntervalUsage,
    /// `i` with a non-numeric argument
    InvalidIntervalValue,
    Unknown,
}

impl MonitorInput {
    pub fn parse(input: &str) -> Self {
        let input = input.trim().to_ascii_lowercase();
        let words: Vec<&str> = input.split_whitespace().collect();

        match words.as_slice() {
            [] => MonitorInput::Empty,
            ["q" | "quit" | "exit"] => MonitorInput::Quit,
            ["1" | "on"] => MonitorInput::Send(Command::On),
            ["0" | "off"] => MonitorInput::Send(Command::Off),
            ["t" | "toggle"] => MonitorInput::Send(Command::Toggle),
            ["s" | "status"] => MonitorInput::Send(Command::Status),
            ["qon"] | ["quiet", "on"] => MonitorInput::Send(Command::Quiet(true)),
            ["qoff"] | ["quiet", "off"] => MonitorInput::Send(Command::Quiet(false)),
            ["i" | "interval", value] => match value.parse() {
                // Range is checked by the device so the user sees its verdict
                Ok(seconds) => MonitorInput::Send(Command::Interval(seconds)),
                Err(_) => MonitorInput::InvalidIntervalValue,
            },
            ["i" | "interval", ..] => MonitorInput::IntervalUsage,
            _ => MonitorInput::Unknown,
        }
    }
}

/// Friendly one-line summary of a command's outcome
pub fn describe(command: Command, response: Option<Response>) -> String {
    match (command, response) {
        (_, Some(Response::InvalidInterval)) => format!(
            "✗ Invalid interval (must be {MIN_INTERVAL_S}-{MAX_INTERVAL_S} seconds)"
        ),
        (Command::On, Some(Response::Status(Activity::Active))) => {
            "✓ Keep-awake ACTIVATED".to_string()
        }
        (Command::Off, Some(Response::Status(Activity::Idle))) => {
            "✓ Keep-awake DEACTIVATED".to_string()
        }
        (Command::Toggle, Some(Response::Status(activity))) => {
            format!("✓ Toggled to: {}", activity.as_str())
        }
        (_, Some(Response::Status(activity))) => {
            format!("Current status: {}", activity.as_str())
        }
        (_, Some(Response::Interval(seconds))) => format!("✓ Interval set to {seconds} seconds"),
        (_, Some(Response::Quiet(true))) => "✓ Quiet mode ENABLED (LEDs off)".to_string(),
        (_, Some(Response::Quiet(false))) => "✓ Quiet mode DISABLED (LEDs on)".to_string(),
        (_, None) => "No response from device".to_string(),
    }
}

/// Run the monitor until the user quits or input ends
pub fn run_monitor<T, R, W>(link: &mut DeviceLink<T>, input: R, out: &mut W) -> Result<()>
where
    T: Read + Write,
    R: BufRead,
    W: Write,
{
    let rule = "=".repeat(50);
    writeln!(out, "\n{rule}\nNoDoze Keep-Awake Monitor\n{rule}\n\n{HELP}\n{rule}\n")?;

    match link.send(Command::Status) {
        Ok(Some(Response::Status(activity))) => {
            writeln!(out, "Current status: {}\n", activity.as_str())?
        }
        Ok(_) => writeln!(out, "Current status: unknown\n")?,
        Err(e) => writeln!(out, "Error: {e}\n")?,
    }

    let mut lines = input.lines();
    loop {
        write!(out, "Command> ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            // stdin closed
            writeln!(out)?;
            break;
        };
        let line = line?;

        match MonitorInput::parse(&line) {
            MonitorInput::Quit => break,
            MonitorInput::Empty => {}
            MonitorInput::Unknown => writeln!(out, "Unknown command. Type 'q' to quit.")?,
            MonitorInput::IntervalUsage => {
                writeln!(out, "Usage: i <seconds>  (e.g., 'i 45')")?
            }
            MonitorInput::InvalidIntervalValue => writeln!(out, "✗ Invalid interval value")?,
            MonitorInput::Send(command) => match link.send(command) {
                Ok(response) => writeln!(out, "{}", describe(command, response))?,
                Err(e) => {
                    warn!(error = %e, %command, "command failed");
                    writeln!(out, "Error: {e}")?;
                }
            },
        }
    }

    writeln!(out, "Exiting monitor mode...")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{quick_config, FakeDevice};

    fn run(device: FakeDevice, script: &str) -> (String, String) {
        let mut link = DeviceLink::new(device, quick_config());
        let mut out = Vec::new();
        run_monitor(&mut link, script.as_bytes(), &mut out).unwrap();
        (
            String::from_utf8(out).unwrap(),
            link.into_inner().written(),
        )
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(MonitorInput::parse("1"), MonitorInput::Send(Command::On));
        assert_eq!(MonitorInput::parse(" ON "), MonitorInput::Send(Command::On));
        assert_eq!(MonitorInput::parse("0"), MonitorInput::Send(Command::Off));
        assert_eq!(MonitorInput::parse("t"), MonitorInput::Send(Command::Toggle));
        assert_eq!(MonitorInput::parse("s"), MonitorInput::Send(Command::Status));
        assert_eq!(MonitorInput::parse("qon"), MonitorInput::Send(Command::Quiet(true)));
        assert_eq!(MonitorInput::parse("qoff"), MonitorInput::Send(Command::Quiet(false)));
        assert_eq!(
            MonitorInput::parse("quiet on"),
            MonitorInput::Send(Command::Quiet(true))
        );
        assert_eq!(MonitorInput::parse("q"), MonitorInput::Quit);
        assert_eq!(MonitorInput::parse("exit"), MonitorInput::Quit);
        assert_eq!(MonitorInput::parse(""), MonitorInput::Empty);
        assert_eq!(MonitorInput::parse("reboot"), MonitorInput::Unknown);
    }

    #[test]
    fn test_parse_interval() {
        assert_eq!(
            MonitorInput::parse("i 45"),
            MonitorInput::Send(Command::Interval(45))
        );
        assert_eq!(
            MonitorInput::parse("interval 3"),
            MonitorInput::Send(Command::Interval(3))
        );
        assert_eq!(MonitorInput::parse("i"), MonitorInput::IntervalUsage);
        assert_eq!(MonitorInput::parse("i 4 5"), MonitorInput::IntervalUsage);
        assert_eq!(MonitorInput::parse("i abc"), MonitorInput::InvalidIntervalValue);
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            describe(Command::On, Some(Response::Status(Activity::Active))),
            "✓ Keep-awake ACTIVATED"
        );
        assert_eq!(
            describe(Command::Toggle, Some(Response::Status(Activity::Idle))),
            "✓ Toggled to: IDLE"
        );
        assert_eq!(
            describe(Command::Interval(3), Some(Response::InvalidInterval)),
            "✗ Invalid interval (must be 5-300 seconds)"
        );
        assert_eq!(describe(Command::Status, None), "No response from device");
    }

    #[test]
    fn test_session() {
        let (out, written) = run(FakeDevice::new(), "on\ni 3\ni 60\nqon\nbogus\nq\nstatus\n");

        assert!(out.contains("Current status: IDLE"));
        assert!(out.contains("✓ Keep-awake ACTIVATED"));
        assert!(out.contains("✗ Invalid interval"));
        assert!(out.contains("✓ Interval set to 60 seconds"));
        assert!(out.contains("✓ Quiet mode ENABLED"));
        assert!(out.contains("Unknown command"));
        assert!(out.ends_with("Exiting monitor mode...\n"));

        // Nothing after quit is sent
        assert_eq!(
            written,
            "status\non\ninterval:3\ninterval:60\nquiet on\n"
        );
    }

    #[test]
    fn test_errors_do_not_end_session() {
        let (out, _) = run(FakeDevice::unplugged(), "on\ns\n");
        assert_eq!(out.matches("Error:").count(), 3);
        assert!(out.ends_with("Exiting monitor mode...\n"));
    }

    #[test]
    fn test_silent_device() {
        let (out, _) = run(FakeDevice::silent(), "t\n");
        assert!(out.contains("Current status: unknown"));
        assert!(out.contains("No response from device"));
    }
}
