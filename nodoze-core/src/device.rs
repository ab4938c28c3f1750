//! The device loop
//!
//! [`Device`] holds all mutable device state and advances it one tick at a
//! time. Each tick:
//! 1. applies at most one pending command line and produces its response
//! 2. samples the touch pads (when a touch adapter is present)
//! 3. fires a keep-awake action if the interval has elapsed
//! 4. advances the indicator (flash expiry, auto-blank)
//!
//! Nothing in here blocks or fails; bad input is answered or ignored and
//! the loop carries on.

use nodoze_protocol::{interval_in_range, Command, ProtocolError, Response};

use crate::action::{ActionPicker, KeepAwakeAction};
use crate::config::DeviceConfig;
use crate::indicator::{Color, Indicator, IndicatorFrame};
use crate::state::{Event, Mode};
use crate::touch::{TouchLatches, TouchSample};

/// Inputs gathered for one tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput<'a> {
    /// Milliseconds since boot
    pub now_ms: u64,
    /// Complete command line, if one arrived
    pub line: Option<&'a str>,
    /// Touch pad levels, if the device has pads
    pub touch: Option<TouchSample>,
}

/// Everything a tick asks the outside world to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickOutput {
    /// Reply line to send back over serial
    pub response: Option<Response>,
    /// Keep-awake action to perform over HID
    pub action: Option<KeepAwakeAction>,
    /// New indicator frame, only when it changed
    pub indicator: Option<IndicatorFrame>,
}

/// State changes caused by one touch sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchOutcome {
    pub toggled_active: bool,
    pub toggled_quiet: bool,
}

/// Keep-awake device state
pub struct Device<P> {
    config: DeviceConfig,
    mode: Mode,
    interval_s: u16,
    /// May precede boot after a touch activation backdates it
    last_action_ms: i64,
    touch: TouchLatches,
    indicator: Indicator,
    picker: P,
}

impl<P: ActionPicker> Device<P> {
    /// Create a device in its power-on state
    pub fn new(config: DeviceConfig, picker: P, now_ms: u64) -> Self {
        let interval_s = if interval_in_range(config.initial_interval_s) {
            config.initial_interval_s
        } else {
            nodoze_protocol::DEFAULT_INTERVAL_S
        };

        Self {
            indicator: Indicator::new(config.indicator_timeout_ms(), now_ms),
            config,
            mode: Mode::POWER_ON,
            interval_s,
            last_action_ms: now_ms as i64,
            touch: TouchLatches::new(),
            picker,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current action interval (seconds)
    pub fn interval_s(&self) -> u16 {
        self.interval_s
    }

    /// Timestamp of the last keep-awake action (ms since boot)
    pub fn last_action_ms(&self) -> i64 {
        self.last_action_ms
    }

    /// Parse and apply one command line
    ///
    /// Unknown commands yield `None` (no reply). A bad interval yields
    /// `ERROR:INVALID_INTERVAL` and leaves state untouched.
    pub fn handle_line(&mut self, line: &str, now_ms: u64) -> Option<Response> {
        match Command::parse(line) {
            Ok(command) => Some(self.apply(command, now_ms)),
            Err(ProtocolError::InvalidInterval) => Some(Response::InvalidInterval),
            Err(_) => None,
        }
    }

    /// Apply a parsed command and build its reply
    pub fn apply(&mut self, command: Command, now_ms: u64) -> Response {
        let response = match command {
            Command::On => {
                self.transition(Event::Activate);
                self.status()
            }
            Command::Off => {
                self.transition(Event::Deactivate);
                self.status()
            }
            Command::Toggle => {
                self.transition(Event::ToggleActive);
                self.status()
            }
            Command::Status => self.status(),
            Command::Quiet(true) => {
                self.transition(Event::QuietOn);
                Response::Quiet(true)
            }
            Command::Quiet(false) => {
                self.transition(Event::QuietOff);
                Response::Quiet(false)
            }
            Command::Interval(seconds) => {
                if !interval_in_range(seconds) {
                    return Response::InvalidInterval;
                }
                self.interval_s = seconds;
                Response::Interval(seconds)
            }
        };

        if command.is_mutating() {
            self.indicator.rearm(now_ms);
        }
        response
    }

    /// Feed one touch sample
    ///
    /// A press on the toggle pad flips activity; when that activates the
    /// device the first action is scheduled `action_offset_s` from now
    /// instead of a full interval. A press on the quiet pad flips quiet mode
    /// and shows an alert flash that quiet mode does not hide.
    pub fn sample_touch(&mut self, sample: TouchSample, now_ms: u64) -> TouchOutcome {
        let edges = self.touch.update(sample);

        if edges.toggle {
            self.transition(Event::ToggleActive);
            if self.mode.is_active() {
                let lead_s = self.interval_s.saturating_sub(self.config.action_offset_s);
                self.last_action_ms = now_ms as i64 - lead_s as i64 * 1000;
            }
            self.indicator.rearm(now_ms);
        }

        if edges.quiet {
            self.transition(Event::ToggleQuiet);
            self.indicator
                .flash(Color::AlertFlash, self.config.alert_flash_ms, true, now_ms);
            self.indicator.rearm(now_ms);
        }

        TouchOutcome {
            toggled_active: edges.toggle,
            toggled_quiet: edges.quiet,
        }
    }

    /// Fire a keep-awake action if active and the interval has elapsed
    pub fn poll_action(&mut self, now_ms: u64) -> Option<KeepAwakeAction> {
        if !self.mode.is_active() {
            return None;
        }

        let elapsed_ms = now_ms as i64 - self.last_action_ms;
        if elapsed_ms < self.interval_s as i64 * 1000 {
            return None;
        }

        let actions = self.config.actions;
        if actions.is_empty() {
            return None;
        }
        let index = self.picker.pick(actions.len());
        let action = actions.get(index).or(actions.first()).copied()?;

        self.last_action_ms = now_ms as i64;
        self.indicator
            .flash(Color::ActionFlash, self.config.action_flash_ms, false, now_ms);
        Some(action)
    }

    /// Advance the indicator; returns a frame only when it changed
    pub fn indicator_frame(&mut self, now_ms: u64) -> Option<IndicatorFrame> {
        self.indicator.update(self.mode, now_ms)
    }

    /// Run one full loop pass
    pub fn tick(&mut self, input: TickInput<'_>) -> TickOutput {
        let now_ms = input.now_ms;

        let response = input
            .line
            .and_then(|line| self.handle_line(line, now_ms));

        if let Some(sample) = input.touch {
            self.sample_touch(sample, now_ms);
        }

        let action = self.poll_action(now_ms);
        let indicator = self.indicator_frame(now_ms);

        TickOutput {
            response,
            action,
            indicator,
        }
    }

    fn status(&self) -> Response {
        Response::Status(self.mode.activity)
    }

    fn transition(&mut self, event: Event) {
        self.mode = self.mode.transition(event);
    }
}
