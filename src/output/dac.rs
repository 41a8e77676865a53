//! Bit-banged serial demand DAC
//!
//! The power stage takes its demand words from 12-bit serial-input DACs
//! (LTC1257 class). Data is clocked in MSB-first on the rising clock edge;
//! the load line is active-low and is asserted during the final bit's clock
//! pulse, so the output updates as the last bit lands. No inter-edge delays
//! are needed; the call overhead already exceeds the part's 350 ns minimum
//! clock phase.

use crate::platform::traits::GpioInterface;
use crate::platform::Result;

/// DAC word width in bits
const DAC_NUM_BITS: u16 = 12;

/// One 12-bit serial DAC on three dedicated GPIO lines
pub struct DemandDac<GPIO: GpioInterface> {
    clock_pin: GPIO,
    data_pin: GPIO,
    latch_pin: GPIO,
}

impl<GPIO: GpioInterface> DemandDac<GPIO> {
    /// Take ownership of the three control lines and park them idle:
    /// latch inactive (high), clock high, data low
    pub fn new(clock_pin: GPIO, data_pin: GPIO, latch_pin: GPIO) -> Result<Self> {
        let mut dac = Self {
            clock_pin,
            data_pin,
            latch_pin,
        };
        dac.latch_pin.set_high()?;
        dac.clock_pin.set_high()?;
        dac.data_pin.set_low()?;
        Ok(dac)
    }

    /// Shift one 12-bit demand word into the DAC and load it
    ///
    /// Bits above bit 11 are ignored. Lines are returned to the idle state
    /// before the call completes.
    pub fn write(&mut self, value: u16) -> Result<()> {
        self.clock_pin.set_low()?;

        for i in 0..DAC_NUM_BITS {
            let bit = value & (1 << (DAC_NUM_BITS - 1 - i)) != 0;
            self.data_pin.set_level(bit)?;
            self.clock_pin.set_high()?;
            if i == DAC_NUM_BITS - 1 {
                self.latch_pin.set_low()?;
            }
            self.clock_pin.set_low()?;
        }

        self.latch_pin.set_high()?;
        self.clock_pin.set_high()?;
        Ok(())
    }

    /// Data line (for host simulation)
    pub fn data_pin_mut(&mut self) -> &mut GPIO {
        &mut self.data_pin
    }

    /// Clock line (for host simulation)
    pub fn clock_pin_mut(&mut self) -> &mut GPIO {
        &mut self.clock_pin
    }

    /// Latch line (for host simulation)
    pub fn latch_pin_mut(&mut self) -> &mut GPIO {
        &mut self.latch_pin
    }
}
