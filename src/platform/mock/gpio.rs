//! Mock GPIO implementation for testing

use crate::platform::{
    Result,
    error::{GpioError, PlatformError},
    traits::{GpioInterface, GpioMode},
};
use heapless::Vec;

/// Maximum number of recorded output transitions
const HISTORY_LEN: usize = 64;

/// Mock GPIO implementation
///
/// Tracks pin level and mode for test verification. Output writes are also
/// recorded in order, which lets tests decode serialized bit streams (the
/// demand DAC writes its 12 data bits through `set_level`).
///
/// The history holds the first [`HISTORY_LEN`] transitions after the last
/// [`clear_history`](MockGpio::clear_history); later writes still update the
/// level but are not recorded.
#[derive(Debug)]
pub struct MockGpio {
    state: bool,
    mode: GpioMode,
    history: Vec<bool, HISTORY_LEN>,
}

impl MockGpio {
    /// Create a new mock GPIO in output mode, driving low
    pub fn new_output() -> Self {
        Self {
            state: false,
            mode: GpioMode::Output,
            history: Vec::new(),
        }
    }

    /// Create a new mock GPIO in input mode reading the given level
    pub fn new_input(level: bool) -> Self {
        Self {
            state: level,
            mode: GpioMode::Input,
            history: Vec::new(),
        }
    }

    /// Set the input level (for simulating external drive on input pins)
    pub fn set_input_state(&mut self, high: bool) {
        self.state = high;
    }

    /// Recorded output transitions, oldest first
    pub fn history(&self) -> &[bool] {
        &self.history
    }

    /// Forget recorded transitions
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn record(&mut self, level: bool) {
        // Silently stop recording once full; level tracking continues.
        let _ = self.history.push(level);
    }
}

impl GpioInterface for MockGpio {
    fn set_high(&mut self) -> Result<()> {
        match self.mode {
            GpioMode::Output => {
                self.state = true;
                self.record(true);
                Ok(())
            }
            _ => Err(PlatformError::Gpio(GpioError::InvalidMode)),
        }
    }

    fn set_low(&mut self) -> Result<()> {
        match self.mode {
            GpioMode::Output => {
                self.state = false;
                self.record(false);
                Ok(())
            }
            _ => Err(PlatformError::Gpio(GpioError::InvalidMode)),
        }
    }

    fn read(&self) -> bool {
        self.state
    }

    fn set_mode(&mut self, mode: GpioMode) -> Result<()> {
        self.mode = mode;
        Ok(())
    }

    fn mode(&self) -> GpioMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_gpio_output() {
        let mut gpio = MockGpio::new_output();
        assert!(!gpio.read());

        gpio.set_high().unwrap();
        assert!(gpio.read());

        gpio.set_low().unwrap();
        assert!(!gpio.read());
    }

    #[test]
    fn test_mock_gpio_input() {
        let mut gpio = MockGpio::new_input(true);
        assert!(gpio.read());

        // Simulate external signal change
        gpio.set_input_state(false);
        assert!(!gpio.read());

        // Input mode should not allow set_high/set_low
        assert!(gpio.set_high().is_err());
        assert!(gpio.set_low().is_err());
    }

    #[test]
    fn test_mock_gpio_history_records_writes() {
        let mut gpio = MockGpio::new_output();
        gpio.set_high().unwrap();
        gpio.set_low().unwrap();
        gpio.set_level(true).unwrap();
        assert_eq!(gpio.history(), &[true, false, true]);

        gpio.clear_history();
        assert!(gpio.history().is_empty());
    }

    #[test]
    fn test_mock_gpio_mode() {
        let mut gpio = MockGpio::new_output();
        assert_eq!(gpio.mode(), GpioMode::Output);

        gpio.set_mode(GpioMode::Input).unwrap();
        assert_eq!(gpio.mode(), GpioMode::Input);
    }
}
