//! Mock platform implementation for testing
//!
//! This module provides mock implementations of platform traits that can be
//! used for unit testing without requiring actual hardware. The mocks use
//! fixed-capacity `heapless` collections so they stay usable in `no_std`
//! host simulations as well.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled

#![cfg(any(test, feature = "mock"))]

mod adc;
mod eeprom;
mod gpio;
mod timer;

pub use adc::MockAdc;
pub use eeprom::MockEeprom;
pub use gpio::MockGpio;
pub use timer::MockTimer;
