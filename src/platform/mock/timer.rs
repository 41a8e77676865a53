//! Mock Timer implementation for testing

use crate::platform::{Result, traits::TimerInterface};

/// Mock Timer implementation
///
/// Uses simulated time: delays advance an internal counter instead of
/// sleeping, so tests can assert how long a code path would have blocked.
#[derive(Debug)]
pub struct MockTimer {
    elapsed_us: u64,
}

impl MockTimer {
    /// Create a new mock timer at t=0
    pub fn new() -> Self {
        Self { elapsed_us: 0 }
    }
}

impl Default for MockTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerInterface for MockTimer {
    fn delay_us(&mut self, us: u32) -> Result<()> {
        self.elapsed_us = self.elapsed_us.wrapping_add(us as u64);
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) -> Result<()> {
        self.delay_us(ms.saturating_mul(1000))
    }

    fn now_us(&self) -> u64 {
        self.elapsed_us
    }
}
