//! Mock EEPROM implementation for testing

use crate::platform::{
    Result,
    error::EepromError,
    traits::EepromInterface,
};

/// Mock device size in bytes
const EEPROM_SIZE: usize = 64;

/// Mock EEPROM implementation
///
/// Simulates a small word-addressable EEPROM in memory. A fresh device reads
/// all 0xFF, like real erased EEPROM cells. The write counter lets tests
/// assert that the calibration record is written exactly once per completed
/// calibration run.
#[derive(Debug)]
pub struct MockEeprom {
    bytes: [u8; EEPROM_SIZE],
    writes: usize,
}

impl MockEeprom {
    /// Create a new, erased mock EEPROM
    pub fn new() -> Self {
        Self {
            bytes: [0xFF; EEPROM_SIZE],
            writes: 0,
        }
    }

    /// Number of word writes performed so far
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Corrupt one byte (for testing record validation)
    pub fn corrupt(&mut self, address: u16) {
        self.bytes[address as usize] ^= 0xA5;
    }
}

impl Default for MockEeprom {
    fn default() -> Self {
        Self::new()
    }
}

impl EepromInterface for MockEeprom {
    fn read_u16(&mut self, address: u16) -> Result<u16> {
        let addr = address as usize;
        if addr + 1 >= EEPROM_SIZE {
            return Err(EepromError::InvalidAddress.into());
        }
        Ok(u16::from_le_bytes([self.bytes[addr], self.bytes[addr + 1]]))
    }

    fn write_u16(&mut self, address: u16, value: u16) -> Result<()> {
        let addr = address as usize;
        if addr + 1 >= EEPROM_SIZE {
            return Err(EepromError::InvalidAddress.into());
        }
        let le = value.to_le_bytes();
        self.bytes[addr] = le[0];
        self.bytes[addr + 1] = le[1];
        self.writes += 1;
        Ok(())
    }
}
