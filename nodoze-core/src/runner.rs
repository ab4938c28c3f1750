//! One tick against real (or mock) hardware
//!
//! [`run_tick`] gathers inputs from the adapters, runs [`Device::tick`] and
//! pushes the outputs back out. Output order is fixed: the response goes out
//! first, then the HID action, then the indicator frame.

use crate::action::ActionPicker;
use crate::device::{Device, TickInput, TickOutput};
use crate::traits::{CommandLink, HidError, IndicatorOutput, KeepAwakeOutput, TouchInput};

/// Result of one hardware tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    pub output: TickOutput,
    /// Set when the HID action could not be sent
    pub hid_error: Option<HidError>,
}

/// Run one device tick against the given adapters
///
/// `touch` is `None` on boards without pads. A failed HID action is
/// reported but does not stop the indicator update.
pub async fn run_tick<P, L, T, H, I>(
    device: &mut Device<P>,
    now_ms: u64,
    link: &mut L,
    touch: Option<&mut T>,
    hid: &mut H,
    indicator: &mut I,
) -> TickReport
where
    P: ActionPicker,
    L: CommandLink,
    T: TouchInput,
    H: KeepAwakeOutput,
    I: IndicatorOutput,
{
    let line = link.poll_line();
    let sample = touch.map(|pads| pads.sample());

    let output = device.tick(TickInput {
        now_ms,
        line: line.as_deref(),
        touch: sample,
    });

    if let Some(response) = output.response {
        link.send(response).await;
    }

    let mut hid_error = None;
    if let Some(action) = output.action {
        if let Err(e) = hid.perform(action).await {
            hid_error = Some(e);
        }
    }

    if let Some(frame) = output.indicator {
        indicator.show(frame).await;
    }

    TickReport { output, hid_error }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeviceConfig;
    use crate::indicator::{Color, IndicatorFrame};
    use crate::touch::TouchSample;
    use crate::action::HidStep;
    use embassy_futures::block_on;
    use nodoze_protocol::{Activity, Line, Response};

    struct FirstPicker;

    impl ActionPicker for FirstPicker {
        fn pick(&mut self, _count: usize) -> usize {
            0
        }
    }

    #[derive(Default)]
    struct MockLink {
        inbox: Vec<&'static str>,
        sent: Vec<Response>,
    }

    impl CommandLink for MockLink {
        fn poll_line(&mut self) -> Option<Line> {
            if self.inbox.is_empty() {
                return None;
            }
            let mut line = Line::new();
            line.push_str(self.inbox.remove(0)).ok()?;
            Some(line)
        }

        async fn send(&mut self, response: Response) {
            self.sent.push(response);
        }
    }

    struct NoPads;

    impl TouchInput for NoPads {
        fn sample(&mut self) -> TouchSample {
            TouchSample::default()
        }
    }

    struct HeldPad;

    impl TouchInput for HeldPad {
        fn sample(&mut self) -> TouchSample {
            TouchSample {
                toggle: true,
                quiet: false,
            }
        }
    }

    #[derive(Default)]
    struct MockHid {
        steps: Vec<HidStep>,
        unplugged: bool,
    }

    impl KeepAwakeOutput for MockHid {
        async fn press_key(&mut self, key: u8) -> Result<(), HidError> {
            if self.unplugged {
                return Err(HidError::NotReady);
            }
            self.steps.push(HidStep::Press(key));
            Ok(())
        }

        async fn release_keys(&mut self) -> Result<(), HidError> {
            self.steps.push(HidStep::ReleaseAll);
            Ok(())
        }

        async fn move_pointer(&mut self, dx: i8, dy: i8) -> Result<(), HidError> {
            self.steps.push(HidStep::Move { dx, dy });
            Ok(())
        }

        async fn pause(&mut self, _ms: u32) {}
    }

    #[derive(Default)]
    struct MockLeds {
        frames: Vec<IndicatorFrame>,
    }

    impl IndicatorOutput for MockLeds {
        async fn show(&mut self, frame: IndicatorFrame) {
            self.frames.push(frame);
        }
    }

    #[test]
    fn test_command_reply_and_indicator() {
        let mut device = Device::new(DeviceConfig::default(), FirstPicker, 0);
        let mut link = MockLink {
            inbox: vec!["on"],
            ..MockLink::default()
        };
        let mut hid = MockHid::default();
        let mut leds = MockLeds::default();

        let report = block_on(run_tick(
            &mut device,
            0,
            &mut link,
            None::<&mut NoPads>,
            &mut hid,
            &mut leds,
        ));

        assert_eq!(report.hid_error, None);
        assert_eq!(link.sent, vec![Response::Status(Activity::Active)]);
        assert_eq!(leds.frames, vec![IndicatorFrame::new(Color::Active)]);
        assert!(hid.steps.is_empty());
    }

    #[test]
    fn test_action_reaches_hid() {
        let mut device = Device::new(DeviceConfig::default(), FirstPicker, 0);
        device.handle_line("on", 0);
        let mut link = MockLink::default();
        let mut hid = MockHid::default();
        let mut leds = MockLeds::default();

        let report = block_on(run_tick(
            &mut device,
            30_000,
            &mut link,
            Some(&mut NoPads),
            &mut hid,
            &mut leds,
        ));

        assert!(report.output.action.is_some());
        assert_eq!(hid.steps.len(), 2);
        assert_eq!(leds.frames.last().map(|f| f.visible_color()), Some(Color::ActionFlash));
        assert!(link.sent.is_empty());
    }

    #[test]
    fn test_hid_failure_still_updates_indicator() {
        let mut device = Device::new(DeviceConfig::default(), FirstPicker, 0);
        device.handle_line("on", 0);
        let mut link = MockLink::default();
        let mut hid = MockHid {
            unplugged: true,
            ..MockHid::default()
        };
        let mut leds = MockLeds::default();

        let report = block_on(run_tick(
            &mut device,
            30_000,
            &mut link,
            None::<&mut NoPads>,
            &mut hid,
            &mut leds,
        ));

        assert_eq!(report.hid_error, Some(HidError::NotReady));
        assert_eq!(leds.frames.len(), 1);
        assert_eq!(device.last_action_ms(), 30_000);
    }

    #[test]
    fn test_held_pad_across_ticks() {
        let mut device = Device::new(DeviceConfig::with_touch(), FirstPicker, 0);
        let mut link = MockLink::default();
        let mut hid = MockHid::default();
        let mut leds = MockLeds::default();
        let mut pads = HeldPad;

        for now in [0, 100, 200] {
            block_on(run_tick(
                &mut device,
                now,
                &mut link,
                Some(&mut pads),
                &mut hid,
                &mut leds,
            ));
        }

        assert!(device.mode().is_active());
        assert_eq!(leds.frames, vec![IndicatorFrame::new(Color::Active)]);
    }
}
