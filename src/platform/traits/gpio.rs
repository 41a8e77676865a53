//! GPIO interface trait
//!
//! This module defines the digital I/O interface that platform
//! implementations must provide. The controller uses it for switch inputs
//! (buttons, dip switches), the beeper, the mode-change output and the
//! bit-banged demand DAC and accessory lines.

use crate::platform::Result;

/// GPIO pin mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioMode {
    /// Input mode (high impedance)
    Input,
    /// Input mode with pull-up resistor
    InputPullUp,
    /// Output mode (push-pull)
    Output,
}

/// GPIO interface trait
///
/// Platform implementations must provide this interface for digital I/O.
///
/// Switch inputs in this design are active-low: a closed contact pulls the
/// line to logic low. Polarity handling is the caller's responsibility; this
/// trait deals in raw levels only.
///
/// # Safety Invariants
///
/// - Pin must be initialized before use
/// - Only one owner per GPIO pin instance
pub trait GpioInterface {
    /// Set GPIO pin high (logic level 1)
    ///
    /// Only valid in output mode.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Gpio(GpioError::InvalidMode)` if the pin
    /// is not configured as an output.
    fn set_high(&mut self) -> Result<()>;

    /// Set GPIO pin low (logic level 0)
    ///
    /// Only valid in output mode.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Gpio(GpioError::InvalidMode)` if the pin
    /// is not configured as an output.
    fn set_low(&mut self) -> Result<()>;

    /// Set GPIO pin to the given level
    ///
    /// Convenience for serialized bit output.
    fn set_level(&mut self, high: bool) -> Result<()> {
        if high {
            self.set_high()
        } else {
            self.set_low()
        }
    }

    /// Read GPIO pin level
    ///
    /// Returns `true` if the pin is high, `false` if low. Valid in both
    /// input and output modes (output mode reads back the latched level).
    fn read(&self) -> bool;

    /// Set GPIO pin mode
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Gpio` if the mode cannot be set.
    fn set_mode(&mut self, mode: GpioMode) -> Result<()>;

    /// Get current GPIO pin mode
    fn mode(&self) -> GpioMode;
}
