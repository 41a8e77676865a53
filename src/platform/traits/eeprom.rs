//! EEPROM interface trait
//!
//! This module defines the persistent storage interface for the calibration
//! record. The record is tiny (six 16-bit words at fixed offsets), so the
//! interface works in whole words rather than byte buffers.

use crate::platform::Result;

/// EEPROM interface trait
///
/// Platform implementations must provide this interface for word-granular
/// persistent storage.
///
/// # Safety Invariants
///
/// - Device must be initialized before use
/// - `address` is a byte offset; words occupy two consecutive bytes,
///   little-endian
/// - Writes are blocking and complete before the call returns
pub trait EepromInterface {
    /// Read one 16-bit word at the given byte offset
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Eeprom(EepromError::InvalidAddress)` if the
    /// offset is outside the device, `EepromError::ReadFailed` on a bus
    /// failure.
    fn read_u16(&mut self, address: u16) -> Result<u16>;

    /// Write one 16-bit word at the given byte offset
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Eeprom(EepromError::InvalidAddress)` if the
    /// offset is outside the device, `EepromError::WriteFailed` if the
    /// device does not acknowledge the write in time.
    fn write_u16(&mut self, address: u16, value: u16) -> Result<()>;
}
