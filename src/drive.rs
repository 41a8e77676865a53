//! Drive demand computation
//!
//! Turns calibrated raw joystick readings into the 12-bit demand words the
//! power stage expects, and into coarse direction flags for the accessory
//! link. All arithmetic is integer-only; intermediate products are widened
//! to `u32` so a full-scale deflection cannot overflow.

use bitflags::bitflags;

use crate::joystick::{JoystickAxis, NEUTRAL_ERROR_MARGIN};

/// Demand word for a centered axis
pub const NEUTRAL_DEMAND: u16 = 1115;

/// Demand excursion from neutral at full deflection
pub const FULL_SCALE_RANGE: u16 = 630;

/// Upper demand clamp
pub const MAX_DEMAND: u16 = 1700;

/// Lower demand clamp
pub const MIN_DEMAND: u16 = 520;

bitflags! {
    /// Coarse joystick direction, for the accessory link's four shared
    /// lines
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DirectionFlags: u8 {
        const FORWARD = 1 << 0;
        const REVERSE = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
    }
}

/// Deflection from neutral scaled into demand counts
///
/// Deflection is clamped to the axis scale before scaling, so readings past
/// the captured extreme saturate at [`FULL_SCALE_RANGE`]. A zero scale (a
/// degenerate capture in the current session) also saturates rather than
/// dividing by it.
fn scaled_excursion(deflection: u16, scale: u16) -> u16 {
    if scale == 0 {
        return FULL_SCALE_RANGE;
    }
    let clamped = deflection.min(scale);
    (clamped as u32 * FULL_SCALE_RANGE as u32 / scale as u32) as u16
}

/// Compute one axis's demand word from its last acquisition
///
/// Readings inside the axis's neutral window map to exactly
/// [`NEUTRAL_DEMAND`]. With `suppress_negative` set, readings below the
/// window also map to neutral; that branch of travel is serving as a mode
/// trigger and must not drive the power stage.
pub fn axis_demand(axis: &JoystickAxis, suppress_negative: bool) -> u16 {
    let demand = if axis.raw_input > axis.raw_max_neutral {
        let excursion = scaled_excursion(axis.raw_input - axis.raw_neutral, axis.positive_scale);
        NEUTRAL_DEMAND + excursion
    } else if axis.raw_input < axis.raw_min_neutral {
        if suppress_negative {
            NEUTRAL_DEMAND
        } else {
            let excursion =
                scaled_excursion(axis.raw_neutral - axis.raw_input, axis.negative_scale);
            NEUTRAL_DEMAND - excursion
        }
    } else {
        NEUTRAL_DEMAND
    };

    demand.clamp(MIN_DEMAND, MAX_DEMAND)
}

/// Clamp a demand word to the power stage's accepted range
pub fn clamp_demand(demand: u16) -> u16 {
    demand.clamp(MIN_DEMAND, MAX_DEMAND)
}

/// Whether a deflection clears half of its axis scale
///
/// The half-scale test drives the accessory direction lines and the
/// reverse-deflection mode trigger.
fn past_half_scale(deflection: u16, scale: u16) -> bool {
    deflection.min(scale) > scale / 2
}

/// Coarse direction of both axes, using the half-scale threshold
pub fn direction_flags(speed: &JoystickAxis, direction: &JoystickAxis) -> DirectionFlags {
    let mut flags = DirectionFlags::empty();

    if speed.raw_input > speed.raw_neutral
        && past_half_scale(speed.raw_input - speed.raw_neutral, speed.positive_scale)
    {
        flags |= DirectionFlags::FORWARD;
    } else if speed.raw_input < speed.raw_neutral
        && past_half_scale(speed.raw_neutral - speed.raw_input, speed.negative_scale)
    {
        flags |= DirectionFlags::REVERSE;
    }

    if direction.raw_input > direction.raw_neutral
        && past_half_scale(
            direction.raw_input - direction.raw_neutral,
            direction.positive_scale,
        )
    {
        flags |= DirectionFlags::RIGHT;
    } else if direction.raw_input < direction.raw_neutral
        && past_half_scale(
            direction.raw_neutral - direction.raw_input,
            direction.negative_scale,
        )
    {
        flags |= DirectionFlags::LEFT;
    }

    flags
}

/// Whether the current readings form the repurposed mode trigger: a firm
/// reverse deflection with the direction axis near center
///
/// The direction axis gets twice the neutral margin so a slightly skewed
/// pull-back still registers; the speed deflection must clear half of the
/// negative scale after clamping.
pub fn reverse_mode_trigger(speed: &JoystickAxis, direction: &JoystickAxis) -> bool {
    let direction_centered = direction.raw_input
        > direction.raw_neutral.saturating_sub(2 * NEUTRAL_ERROR_MARGIN)
        && direction.raw_input < direction.raw_neutral + 2 * NEUTRAL_ERROR_MARGIN;

    if !direction_centered || speed.raw_input >= speed.raw_min_neutral {
        return false;
    }

    let deflection = (speed.raw_neutral - speed.raw_input).min(speed.negative_scale);
    deflection > speed.negative_scale / 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::joystick::{NEUTRAL_RAW_INPUT, RAW_MAX_DEFLECTION};

    fn default_axis() -> JoystickAxis {
        JoystickAxis::default()
    }

    fn axis_at(raw_input: u16) -> JoystickAxis {
        JoystickAxis {
            raw_input,
            ..JoystickAxis::default()
        }
    }

    #[test]
    fn test_neutral_window_maps_to_neutral_demand() {
        assert_eq!(axis_demand(&default_axis(), false), NEUTRAL_DEMAND);
        // Anywhere inside the window, including its edges
        let edge = axis_at(NEUTRAL_RAW_INPUT + NEUTRAL_ERROR_MARGIN);
        assert_eq!(axis_demand(&edge, false), NEUTRAL_DEMAND);
        let edge = axis_at(NEUTRAL_RAW_INPUT - NEUTRAL_ERROR_MARGIN);
        assert_eq!(axis_demand(&edge, false), NEUTRAL_DEMAND);
    }

    #[test]
    fn test_half_deflection_demand() {
        // 110 counts over a 220-count scale: half of the 630 full range
        let axis = axis_at(NEUTRAL_RAW_INPUT + 110);
        assert_eq!(axis_demand(&axis, false), NEUTRAL_DEMAND + 315);

        let axis = axis_at(NEUTRAL_RAW_INPUT - 110);
        assert_eq!(axis_demand(&axis, false), NEUTRAL_DEMAND - 315);
    }

    #[test]
    fn test_full_deflection_clamps_to_limits() {
        // Full positive: 1115 + 630 = 1745, clamped to 1700
        let axis = axis_at(NEUTRAL_RAW_INPUT + RAW_MAX_DEFLECTION);
        assert_eq!(axis_demand(&axis, false), MAX_DEMAND);

        // Full negative: 1115 - 630 = 485, clamped to 520
        let axis = axis_at(NEUTRAL_RAW_INPUT - RAW_MAX_DEFLECTION);
        assert_eq!(axis_demand(&axis, false), MIN_DEMAND);
    }

    #[test]
    fn test_excursion_boundary_is_exact() {
        // Exactly at the captured extreme: the full output span, before
        // the absolute clamp
        assert_eq!(scaled_excursion(220, 220), FULL_SCALE_RANGE);
        assert_eq!(scaled_excursion(110, 220), FULL_SCALE_RANGE / 2);
    }

    #[test]
    fn test_beyond_scale_matches_boundary_demand() {
        let boundary = axis_at(NEUTRAL_RAW_INPUT + RAW_MAX_DEFLECTION);
        let beyond = axis_at(NEUTRAL_RAW_INPUT + RAW_MAX_DEFLECTION + 60);
        assert_eq!(
            axis_demand(&boundary, false),
            axis_demand(&beyond, false)
        );
    }

    #[test]
    fn test_deflection_past_scale_saturates() {
        let mut axis = axis_at(NEUTRAL_RAW_INPUT + 200);
        axis.positive_scale = 150;
        // 200 counts against a 150-count scale reads as full deflection
        assert_eq!(axis_demand(&axis, false), MAX_DEMAND);
    }

    #[test]
    fn test_asymmetric_scales() {
        let mut axis = axis_at(NEUTRAL_RAW_INPUT - 80);
        axis.negative_scale = 160;
        // Half of the negative scale: 1115 - 315 = 800
        assert_eq!(axis_demand(&axis, false), NEUTRAL_DEMAND - 315);
    }

    #[test]
    fn test_zero_scale_saturates_instead_of_dividing() {
        let mut axis = axis_at(NEUTRAL_RAW_INPUT + 1 + NEUTRAL_ERROR_MARGIN);
        axis.positive_scale = 0;
        assert_eq!(axis_demand(&axis, false), MAX_DEMAND);
    }

    #[test]
    fn test_suppressed_negative_branch_stays_neutral() {
        let axis = axis_at(NEUTRAL_RAW_INPUT - RAW_MAX_DEFLECTION);
        assert_eq!(axis_demand(&axis, true), NEUTRAL_DEMAND);

        // Positive travel is unaffected by the suppression
        let axis = axis_at(NEUTRAL_RAW_INPUT + 110);
        assert_eq!(axis_demand(&axis, true), NEUTRAL_DEMAND + 315);
    }

    #[test]
    fn test_direction_flags_half_scale_threshold() {
        // 110 counts is exactly half of the 220 scale: not past it
        let speed = axis_at(NEUTRAL_RAW_INPUT + 110);
        let direction = default_axis();
        assert_eq!(direction_flags(&speed, &direction), DirectionFlags::empty());

        let speed = axis_at(NEUTRAL_RAW_INPUT + 111);
        assert_eq!(direction_flags(&speed, &direction), DirectionFlags::FORWARD);
    }

    #[test]
    fn test_direction_flags_combined_quadrant() {
        let speed = axis_at(NEUTRAL_RAW_INPUT - 150);
        let direction = axis_at(NEUTRAL_RAW_INPUT + 150);
        assert_eq!(
            direction_flags(&speed, &direction),
            DirectionFlags::REVERSE | DirectionFlags::RIGHT
        );
    }

    #[test]
    fn test_direction_flags_left() {
        let speed = default_axis();
        let direction = axis_at(NEUTRAL_RAW_INPUT - 180);
        assert_eq!(direction_flags(&speed, &direction), DirectionFlags::LEFT);
    }

    #[test]
    fn test_reverse_mode_trigger_requires_firm_pull_back() {
        let direction = default_axis();

        // Just past half the negative scale
        let speed = axis_at(NEUTRAL_RAW_INPUT - 111);
        assert!(reverse_mode_trigger(&speed, &direction));

        // Exactly half: not firm enough
        let speed = axis_at(NEUTRAL_RAW_INPUT - 110);
        assert!(!reverse_mode_trigger(&speed, &direction));
    }

    #[test]
    fn test_reverse_mode_trigger_rejects_skewed_direction() {
        let speed = axis_at(NEUTRAL_RAW_INPUT - 180);

        // Direction within twice the neutral margin still qualifies
        let direction = axis_at(NEUTRAL_RAW_INPUT + 2 * NEUTRAL_ERROR_MARGIN - 1);
        assert!(reverse_mode_trigger(&speed, &direction));

        // At twice the margin the pull-back reads as a steering input
        let direction = axis_at(NEUTRAL_RAW_INPUT + 2 * NEUTRAL_ERROR_MARGIN);
        assert!(!reverse_mode_trigger(&speed, &direction));
    }

    #[test]
    fn test_reverse_mode_trigger_ignores_forward_travel() {
        let direction = default_axis();
        let speed = axis_at(NEUTRAL_RAW_INPUT + 180);
        assert!(!reverse_mode_trigger(&speed, &direction));
    }
}
