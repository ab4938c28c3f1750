//! Touch pad input trait

use crate::touch::TouchSample;

/// Trait for level-sensed touch pads
///
/// Sampling must not block; it is called once per tick.
pub trait TouchInput {
    fn sample(&mut self) -> TouchSample;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeviceConfig;
    use crate::device::Device;
    use crate::action::ActionPicker;

    struct Scripted {
        samples: Vec<TouchSample>,
    }

    impl TouchInput for Scripted {
        fn sample(&mut self) -> TouchSample {
            if self.samples.is_empty() {
                TouchSample::default()
            } else {
                self.samples.remove(0)
            }
        }
    }

    struct FirstPicker;

    impl ActionPicker for FirstPicker {
        fn pick(&mut self, _count: usize) -> usize {
            0
        }
    }

    #[test]
    fn test_scripted_pads_drive_device() {
        let press = TouchSample {
            toggle: true,
            quiet: false,
        };
        let mut pads = Scripted {
            samples: vec![press, press, TouchSample::default(), press],
        };
        let mut device = Device::new(DeviceConfig::with_touch(), FirstPicker, 0);

        let mut toggles = 0;
        for tick in 0..6u64 {
            if device.sample_touch(pads.sample(), tick * 100).toggled_active {
                toggles += 1;
            }
        }
        assert_eq!(toggles, 2);
        assert!(!device.mode().is_active());
    }
}
