#![cfg_attr(not(test), no_std)]

//! prop_control - Control core for a proportional-joystick mobility controller
//!
//! This library implements the operating-mode state machine, joystick
//! signal-processing/calibration engine and debounced digital-input model for
//! a joystick-operated drive controller. Joystick deflection is converted
//! into analog demands for an external motor-control board, or, in the
//! alternate mode, into discrete directional signals for a wireless
//! accessory module.
//!
//! Hardware access goes through the traits in [`platform`]; a mock platform
//! is provided for host-side testing.

// Platform abstraction layer
pub mod platform;

// Logging macros (defmt on target, println in host tests)
pub mod logging;

// Debounced digital-input model
pub mod input;

// Joystick acquisition and calibration engine
pub mod joystick;

// Drive demand computation
pub mod drive;

// Actuator-side drivers (demand DACs, accessory link, beeper)
pub mod output;

// Operating-mode state machine and control loop
pub mod controller;

pub use controller::{Controller, OperatingMode};
pub use joystick::{Axis, Joystick, JoystickAxis};
