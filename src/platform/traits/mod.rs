//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.

pub mod adc;
pub mod eeprom;
pub mod gpio;
pub mod timer;

// Re-export trait interfaces
pub use adc::{AdcChannel, AdcInterface};
pub use eeprom::EepromInterface;
pub use gpio::{GpioInterface, GpioMode};
pub use timer::TimerInterface;
