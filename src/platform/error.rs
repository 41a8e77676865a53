//! Platform error types
//!
//! This module defines error types for platform operations.

use core::fmt;

/// Result type for platform operations
pub type Result<T> = core::result::Result<T, PlatformError>;

/// Platform-level errors
///
/// All platform implementations map their HAL-specific errors to these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlatformError {
    /// GPIO operation failed
    Gpio(GpioError),
    /// Analog conversion failed
    Adc(AdcError),
    /// Timer operation failed
    Timer(TimerError),
    /// EEPROM operation failed
    Eeprom(EepromError),
    /// Invalid configuration provided
    InvalidConfig,
}

/// GPIO-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioError {
    /// Invalid pin number
    InvalidPin,
    /// Invalid mode for operation
    InvalidMode,
}

/// ADC-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcError {
    /// Conversion did not complete
    ConversionFailed,
    /// Channel not available on this platform
    InvalidChannel,
}

/// Timer-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerError {
    /// Invalid duration
    InvalidDuration,
}

/// EEPROM-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EepromError {
    /// Address outside the device's range
    InvalidAddress,
    /// Write did not complete within the device timeout
    WriteFailed,
    /// Read operation failed
    ReadFailed,
}

impl From<GpioError> for PlatformError {
    fn from(e: GpioError) -> Self {
        PlatformError::Gpio(e)
    }
}

impl From<AdcError> for PlatformError {
    fn from(e: AdcError) -> Self {
        PlatformError::Adc(e)
    }
}

impl From<TimerError> for PlatformError {
    fn from(e: TimerError) -> Self {
        PlatformError::Timer(e)
    }
}

impl From<EepromError> for PlatformError {
    fn from(e: EepromError) -> Self {
        PlatformError::Eeprom(e)
    }
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::Gpio(e) => write!(f, "GPIO error: {:?}", e),
            PlatformError::Adc(e) => write!(f, "ADC error: {:?}", e),
            PlatformError::Timer(e) => write!(f, "timer error: {:?}", e),
            PlatformError::Eeprom(e) => write!(f, "EEPROM error: {:?}", e),
            PlatformError::InvalidConfig => write!(f, "invalid configuration"),
        }
    }
}
