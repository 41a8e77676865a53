//! ADC interface trait
//!
//! This module defines the analog sampling interface for the two joystick
//! potentiometers. Oversampling and averaging are done above this trait, in
//! [`crate::joystick`]; an implementation performs exactly one conversion
//! per call, including any settle delay the converter needs before starting.

use crate::platform::Result;

/// Joystick ADC channel selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcChannel {
    /// Speed potentiometer (forward/backward deflection)
    Speed,
    /// Direction potentiometer (left/right deflection)
    Direction,
}

/// ADC interface trait
///
/// Platform implementations must provide this interface for raw analog
/// conversion.
///
/// # Safety Invariants
///
/// - Converter must be initialized before use
/// - Readings are 10-bit, right-justified (0..=1023)
pub trait AdcInterface {
    /// Perform one conversion on the given channel
    ///
    /// Blocks until the conversion completes, including the channel settle
    /// delay.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Adc` if the conversion fails or the channel
    /// is unavailable.
    fn read(&mut self, channel: AdcChannel) -> Result<u16>;
}
