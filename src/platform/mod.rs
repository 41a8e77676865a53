//! Platform abstraction layer
//!
//! This module provides hardware abstraction for the controller's
//! collaborators: digital I/O lines, the joystick ADC, delay timers and the
//! persistent calibration EEPROM. All platform-specific code lives behind
//! these traits.

pub mod error;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{PlatformError, Result};
pub use traits::{AdcChannel, AdcInterface, EepromInterface, GpioInterface, GpioMode, TimerInterface};
