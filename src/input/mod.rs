//! Debounced digital-input model
//!
//! Mechanical switch contacts bounce; the control loop filters every
//! monitored line through a counter-based debouncer before acting on it.
//! [`debounce`] holds the per-line filter, [`switches`] groups all of the
//! controller's lines into one panel updated once per loop pass.

pub mod debounce;
pub mod switches;

pub use debounce::{DebouncedInput, DEBOUNCE_THRESHOLD};
pub use switches::SwitchPanel;
