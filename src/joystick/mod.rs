//! Joystick acquisition and axis state
//!
//! Two potentiometer axes (speed, direction) are oversampled through the
//! platform ADC and averaged to suppress uncorrelated noise. Per-axis
//! calibration state (neutral window, deflection scales) lives in
//! [`JoystickAxis`]; the procedures that establish and persist it are in
//! [`calibration`].

pub mod calibration;

use crate::platform::traits::{AdcChannel, AdcInterface, TimerInterface};
use crate::platform::Result;

/// Nominal raw reading of a centered axis by design
pub const NEUTRAL_RAW_INPUT: u16 = 0x202;

/// Half-width of the neutral window around center
pub const NEUTRAL_ERROR_MARGIN: u16 = 0x40;

/// Maximum raw deviation from neutral the joystick can produce; also the
/// default deflection scale when no calibration is stored
pub const RAW_MAX_DEFLECTION: u16 = 220;

/// Conversions averaged per axis per acquisition
const OVERSAMPLE_COUNT: u16 = 10;

/// Settle delay between oversampled conversion pairs, in microseconds
const SAMPLE_SETTLE_US: u32 = 20;

/// One of the two tracked joystick axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// Forward/backward deflection
    Speed,
    /// Left/right deflection
    Direction,
}

/// Signal-processing state for one axis
///
/// Invariant: `raw_min_neutral <= raw_neutral <= raw_max_neutral`, and both
/// scales stay in `1..=RAW_MAX_DEFLECTION` whenever they come from a
/// validated calibration load (a just-completed capture may hold a smaller
/// value until the next boot rejects it).
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoystickAxis {
    /// Last averaged reading
    pub raw_input: u16,
    /// Center value established at power-up
    pub raw_neutral: u16,
    /// Lower bound of the neutral window
    pub raw_min_neutral: u16,
    /// Upper bound of the neutral window
    pub raw_max_neutral: u16,
    /// Smallest reading seen during extremes capture
    pub raw_minimum: u16,
    /// Largest reading seen during extremes capture
    pub raw_maximum: u16,
    /// Raw counts from neutral to full positive deflection
    pub positive_scale: u16,
    /// Raw counts from neutral to full negative deflection
    pub negative_scale: u16,
}

impl Default for JoystickAxis {
    fn default() -> Self {
        Self {
            raw_input: NEUTRAL_RAW_INPUT,
            raw_neutral: NEUTRAL_RAW_INPUT,
            raw_min_neutral: NEUTRAL_RAW_INPUT - NEUTRAL_ERROR_MARGIN,
            raw_max_neutral: NEUTRAL_RAW_INPUT + NEUTRAL_ERROR_MARGIN,
            raw_minimum: NEUTRAL_RAW_INPUT - RAW_MAX_DEFLECTION,
            raw_maximum: NEUTRAL_RAW_INPUT + RAW_MAX_DEFLECTION,
            positive_scale: RAW_MAX_DEFLECTION,
            negative_scale: RAW_MAX_DEFLECTION,
        }
    }
}

/// Both joystick axes
#[derive(Debug, Default)]
pub struct Joystick {
    axes: [JoystickAxis; 2],
}

impl Joystick {
    /// Create a joystick with default-initialized axes
    pub fn new() -> Self {
        Self::default()
    }

    /// Axis state
    pub fn axis(&self, axis: Axis) -> &JoystickAxis {
        &self.axes[axis as usize]
    }

    /// Mutable axis state
    pub fn axis_mut(&mut self, axis: Axis) -> &mut JoystickAxis {
        &mut self.axes[axis as usize]
    }

    /// Acquire both axes: oversampled, truncating-averaged raw readings
    ///
    /// Takes [`OVERSAMPLE_COUNT`] conversion pairs with a short settle
    /// delay before each pair. Updates each axis's `raw_input` and returns
    /// `(speed, direction)`.
    pub fn sample_axes(
        &mut self,
        adc: &mut dyn AdcInterface,
        timer: &mut dyn TimerInterface,
    ) -> Result<(u16, u16)> {
        let mut speed_total: u32 = 0;
        let mut direction_total: u32 = 0;

        for _ in 0..OVERSAMPLE_COUNT {
            timer.delay_us(SAMPLE_SETTLE_US)?;
            speed_total += adc.read(AdcChannel::Speed)? as u32;
            direction_total += adc.read(AdcChannel::Direction)? as u32;
        }

        let speed = (speed_total / OVERSAMPLE_COUNT as u32) as u16;
        let direction = (direction_total / OVERSAMPLE_COUNT as u32) as u16;

        self.axes[Axis::Speed as usize].raw_input = speed;
        self.axes[Axis::Direction as usize].raw_input = direction;

        Ok((speed, direction))
    }

    /// Whether both axes currently rest inside the fixed nominal neutral
    /// window
    ///
    /// This deliberately tests against the design-center window
    /// (`NEUTRAL_RAW_INPUT` ± `NEUTRAL_ERROR_MARGIN`), not the per-axis
    /// calibrated window: it gates power-up neutral establishment and
    /// calibration entry, which must not depend on state they are about to
    /// replace.
    pub fn is_in_neutral(
        &mut self,
        adc: &mut dyn AdcInterface,
        timer: &mut dyn TimerInterface,
    ) -> Result<bool> {
        let (speed, direction) = self.sample_axes(adc, timer)?;

        let lo = NEUTRAL_RAW_INPUT - NEUTRAL_ERROR_MARGIN;
        let hi = NEUTRAL_RAW_INPUT + NEUTRAL_ERROR_MARGIN;

        Ok(speed > lo && speed < hi && direction > lo && direction < hi)
    }
}
