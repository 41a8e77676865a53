//! Counter-based contact debouncing
//!
//! A line's accepted level only changes after the raw level has disagreed
//! with it for more than [`DEBOUNCE_THRESHOLD`] consecutive samples. A
//! single agreeing sample resets the disagreement count, so intermittent
//! bounce never accumulates.

/// Consecutive disagreeing samples required before a level change is
/// accepted (the change lands on sample `DEBOUNCE_THRESHOLD + 1`).
pub const DEBOUNCE_THRESHOLD: u8 = 8;

/// One debounced digital line
///
/// Created with the line's current raw level as the initial stable state
/// and updated once per control-loop iteration.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebouncedInput {
    stable_state: bool,
    debounce_counter: u8,
}

impl DebouncedInput {
    /// Create a debouncer seeded with the line's current raw level
    pub fn new(initial_level: bool) -> Self {
        Self {
            stable_state: initial_level,
            debounce_counter: 0,
        }
    }

    /// Feed one raw sample through the filter
    pub fn update(&mut self, raw_level: bool) {
        if raw_level == self.stable_state {
            // Signal is stable, nothing to do.
            self.debounce_counter = 0;
        } else {
            self.debounce_counter += 1;
            if self.debounce_counter > DEBOUNCE_THRESHOLD {
                self.stable_state = raw_level;
                self.debounce_counter = 0;
            }
        }
    }

    /// Last accepted level
    pub fn stable_state(&self) -> bool {
        self.stable_state
    }

    /// Whether the line is electrically active (lines are active-low:
    /// a closed contact reads logic low)
    pub fn is_active(&self) -> bool {
        !self.stable_state
    }

    /// Force the accepted level to the inactive (high) state and restart
    /// filtering
    ///
    /// Used when a dip switch takes a line out of service.
    pub fn force_inactive(&mut self) {
        self.stable_state = true;
        self.debounce_counter = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_needs_threshold_plus_one_samples() {
        let mut line = DebouncedInput::new(true);

        // Exactly DEBOUNCE_THRESHOLD disagreeing samples: no flip yet
        for _ in 0..DEBOUNCE_THRESHOLD {
            line.update(false);
            assert!(line.stable_state());
        }

        // Sample threshold+1 accepts the new level
        line.update(false);
        assert!(!line.stable_state());
        assert!(line.is_active());
    }

    #[test]
    fn test_agreeing_sample_resets_counter() {
        let mut line = DebouncedInput::new(true);

        for _ in 0..DEBOUNCE_THRESHOLD {
            line.update(false);
        }
        // One agreeing sample wipes the accumulated disagreement
        line.update(true);
        assert!(line.stable_state());

        // The count restarts from zero: another partial run must not flip
        for _ in 0..DEBOUNCE_THRESHOLD {
            line.update(false);
            assert!(line.stable_state());
        }
    }

    #[test]
    fn test_initial_level_is_accepted_unfiltered() {
        let pressed = DebouncedInput::new(false);
        assert!(pressed.is_active());

        let released = DebouncedInput::new(true);
        assert!(!released.is_active());
    }

    #[test]
    fn test_force_inactive() {
        let mut line = DebouncedInput::new(false);
        assert!(line.is_active());

        line.force_inactive();
        assert!(!line.is_active());
    }
}
