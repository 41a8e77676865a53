//! Mock ADC implementation for testing

use crate::platform::{
    Result,
    traits::{AdcChannel, AdcInterface},
};
use heapless::Deque;

/// Capacity of a per-channel scripted sample queue
const SCRIPT_LEN: usize = 64;

/// Mock ADC implementation
///
/// Each channel returns a fixed level by default. Tests that need
/// conversion-to-conversion variation (oversampling averages, calibration
/// extremes) can queue a script of readings; scripted values are consumed
/// first, then the channel falls back to its fixed level.
#[derive(Debug)]
pub struct MockAdc {
    speed: u16,
    direction: u16,
    speed_script: Deque<u16, SCRIPT_LEN>,
    direction_script: Deque<u16, SCRIPT_LEN>,
}

impl MockAdc {
    /// Create a mock ADC with both channels at the given level
    pub fn new(speed: u16, direction: u16) -> Self {
        Self {
            speed,
            direction,
            speed_script: Deque::new(),
            direction_script: Deque::new(),
        }
    }

    /// Set the steady-state level of a channel
    pub fn set_reading(&mut self, channel: AdcChannel, value: u16) {
        match channel {
            AdcChannel::Speed => self.speed = value,
            AdcChannel::Direction => self.direction = value,
        }
    }

    /// Queue one scripted conversion result for a channel
    ///
    /// Panics if the script is full; scripts are a test aid, not a data path.
    pub fn push_script(&mut self, channel: AdcChannel, value: u16) {
        let script = match channel {
            AdcChannel::Speed => &mut self.speed_script,
            AdcChannel::Direction => &mut self.direction_script,
        };
        script.push_back(value).expect("ADC script full");
    }
}

impl AdcInterface for MockAdc {
    fn read(&mut self, channel: AdcChannel) -> Result<u16> {
        let value = match channel {
            AdcChannel::Speed => self.speed_script.pop_front().unwrap_or(self.speed),
            AdcChannel::Direction => self.direction_script.pop_front().unwrap_or(self.direction),
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_adc_steady_levels() {
        let mut adc = MockAdc::new(0x200, 0x210);
        assert_eq!(adc.read(AdcChannel::Speed).unwrap(), 0x200);
        assert_eq!(adc.read(AdcChannel::Direction).unwrap(), 0x210);

        adc.set_reading(AdcChannel::Speed, 0x300);
        assert_eq!(adc.read(AdcChannel::Speed).unwrap(), 0x300);
    }

    #[test]
    fn test_mock_adc_script_consumed_first() {
        let mut adc = MockAdc::new(0x200, 0x200);
        adc.push_script(AdcChannel::Speed, 0x250);
        adc.push_script(AdcChannel::Speed, 0x260);

        assert_eq!(adc.read(AdcChannel::Speed).unwrap(), 0x250);
        assert_eq!(adc.read(AdcChannel::Speed).unwrap(), 0x260);
        // Script exhausted, back to the steady level
        assert_eq!(adc.read(AdcChannel::Speed).unwrap(), 0x200);
        // Other channel unaffected
        assert_eq!(adc.read(AdcChannel::Direction).unwrap(), 0x200);
    }
}
