//! Beeper
//!
//! A single GPIO gating a self-oscillating sounder. Cue durations are shaped
//! by the caller; this type only tracks the on/off level so repeated writes
//! are cheap and idempotent.

use crate::platform::traits::GpioInterface;
use crate::platform::Result;

/// Self-oscillating sounder behind one GPIO (high = sounding)
pub struct Beeper<GPIO: GpioInterface> {
    pin: GPIO,
    on: bool,
}

impl<GPIO: GpioInterface> Beeper<GPIO> {
    /// Take ownership of the gate pin, silenced
    pub fn new(pin: GPIO) -> Result<Self> {
        let mut beeper = Self { pin, on: false };
        beeper.pin.set_low()?;
        Ok(beeper)
    }

    /// Start sounding
    pub fn on(&mut self) -> Result<()> {
        if !self.on {
            self.pin.set_high()?;
            self.on = true;
        }
        Ok(())
    }

    /// Stop sounding
    pub fn off(&mut self) -> Result<()> {
        if self.on {
            self.pin.set_low()?;
            self.on = false;
        }
        Ok(())
    }

    /// Whether the sounder is currently on
    pub fn is_on(&self) -> bool {
        self.on
    }
}
