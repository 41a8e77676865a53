//! Timer interface trait
//!
//! This module defines the blocking delay interface the control loop uses
//! for sample settling, audible cue durations and the accessory link
//! handshake. All waits in this design are synchronous; there is no timer
//! interrupt visible to the core.

use crate::platform::Result;

/// Timer interface trait
///
/// Platform implementations must provide this interface for timing and delays.
///
/// # Safety Invariants
///
/// - Timer peripheral must be initialized before use
/// - Microsecond-level precision required
/// - Monotonic time source (never goes backwards)
pub trait TimerInterface {
    /// Delay for specified number of microseconds
    ///
    /// Blocks execution for at least `us` microseconds.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Timer` if the delay operation fails.
    fn delay_us(&mut self, us: u32) -> Result<()>;

    /// Delay for specified number of milliseconds
    ///
    /// Blocks execution for at least `ms` milliseconds.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Timer` if the delay operation fails.
    fn delay_ms(&mut self, ms: u32) -> Result<()>;

    /// Get current time in microseconds
    ///
    /// Returns a monotonic timestamp in microseconds since platform
    /// initialization.
    fn now_us(&self) -> u64;

    /// Get current time in milliseconds
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }
}
