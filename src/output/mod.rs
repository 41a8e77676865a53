//! Output devices
//!
//! Everything the controller drives: the two serial demand DACs feeding the
//! power stage, the accessory link's shared direction and click lines, the
//! mode-change output and the beeper.

pub mod accessory;
pub mod beeper;
pub mod dac;

pub use accessory::{AccessoryChannel, AccessoryLink};
pub use beeper::Beeper;
pub use dac::DemandDac;
