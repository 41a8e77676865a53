//! Calibration engine
//!
//! Power-up neutral establishment, extremes capture during a calibration
//! run, and the persisted calibration record. The record stores only the
//! four deflection scales; the neutral point is re-established at every
//! power-up so slow drift in the potentiometers never accumulates into the
//! stored data.

use crate::joystick::{Axis, Joystick, NEUTRAL_ERROR_MARGIN, RAW_MAX_DEFLECTION};
use crate::log_warn;
use crate::platform::traits::{AdcInterface, EepromInterface, TimerInterface};
use crate::platform::Result;

/// Byte offset of the speed-axis negative scale
pub const SPEED_NEGATIVE_SCALE_ADDR: u16 = 0;
/// Byte offset of the speed-axis positive scale
pub const SPEED_POSITIVE_SCALE_ADDR: u16 = 2;
/// Byte offset of the direction-axis negative scale
pub const DIRECTION_NEGATIVE_SCALE_ADDR: u16 = 4;
/// Byte offset of the direction-axis positive scale
pub const DIRECTION_POSITIVE_SCALE_ADDR: u16 = 6;
/// Byte offset of the first validity marker
pub const MARKER1_ADDR: u16 = 8;
/// Byte offset of the second validity marker
pub const MARKER2_ADDR: u16 = 10;

/// First validity marker value
pub const MARKER1: u16 = 0xDEAD;
/// Second validity marker value
pub const MARKER2: u16 = 0xAA55;

/// Smallest deflection scale accepted from storage
///
/// A scale below one eighth of the full mechanical range means the capture
/// barely left neutral and would make the demand math absurdly sensitive.
pub const MIN_VALID_SCALE: u16 = RAW_MAX_DEFLECTION / 8;

/// The four deflection scales as stored in EEPROM
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationRecord {
    pub speed_negative: u16,
    pub speed_positive: u16,
    pub direction_negative: u16,
    pub direction_positive: u16,
}

impl CalibrationRecord {
    /// Read the record from EEPROM
    ///
    /// Returns `Ok(None)` if either validity marker does not match, which
    /// is the normal state of a never-calibrated device (erased cells read
    /// 0xFFFF).
    pub fn read(eeprom: &mut dyn EepromInterface) -> Result<Option<Self>> {
        if eeprom.read_u16(MARKER1_ADDR)? != MARKER1 || eeprom.read_u16(MARKER2_ADDR)? != MARKER2 {
            return Ok(None);
        }

        Ok(Some(Self {
            speed_negative: eeprom.read_u16(SPEED_NEGATIVE_SCALE_ADDR)?,
            speed_positive: eeprom.read_u16(SPEED_POSITIVE_SCALE_ADDR)?,
            direction_negative: eeprom.read_u16(DIRECTION_NEGATIVE_SCALE_ADDR)?,
            direction_positive: eeprom.read_u16(DIRECTION_POSITIVE_SCALE_ADDR)?,
        }))
    }

    /// Write the record and both validity markers
    pub fn write(&self, eeprom: &mut dyn EepromInterface) -> Result<()> {
        eeprom.write_u16(SPEED_NEGATIVE_SCALE_ADDR, self.speed_negative)?;
        eeprom.write_u16(SPEED_POSITIVE_SCALE_ADDR, self.speed_positive)?;
        eeprom.write_u16(DIRECTION_NEGATIVE_SCALE_ADDR, self.direction_negative)?;
        eeprom.write_u16(DIRECTION_POSITIVE_SCALE_ADDR, self.direction_positive)?;
        eeprom.write_u16(MARKER1_ADDR, MARKER1)?;
        eeprom.write_u16(MARKER2_ADDR, MARKER2)?;
        Ok(())
    }
}

fn scale_is_valid(scale: u16) -> bool {
    (MIN_VALID_SCALE..=RAW_MAX_DEFLECTION).contains(&scale)
}

impl Joystick {
    /// Sample both axes and, if they rest in the nominal neutral window,
    /// adopt the readings as this session's neutral point
    ///
    /// The per-axis neutral window is re-centered on the adopted reading.
    /// Returns `Ok(false)` without touching any state if either axis is
    /// deflected.
    pub fn establish_neutral(
        &mut self,
        adc: &mut dyn AdcInterface,
        timer: &mut dyn TimerInterface,
    ) -> Result<bool> {
        if !self.is_in_neutral(adc, timer)? {
            return Ok(false);
        }

        let (speed, direction) = self.sample_axes(adc, timer)?;
        for (axis, reading) in [(Axis::Speed, speed), (Axis::Direction, direction)] {
            let axis = self.axis_mut(axis);
            axis.raw_neutral = reading;
            axis.raw_min_neutral = reading.saturating_sub(NEUTRAL_ERROR_MARGIN);
            axis.raw_max_neutral = reading + NEUTRAL_ERROR_MARGIN;
        }

        Ok(true)
    }

    /// Load stored deflection scales, falling back to defaults
    ///
    /// All axis state is reset to defaults first. Returns `Ok(true)` only
    /// if the record's markers matched and every scale passed validation;
    /// an individually bad scale keeps its default while the others adopt
    /// their stored values.
    pub fn load_scales(&mut self, eeprom: &mut dyn EepromInterface) -> Result<bool> {
        for axis in [Axis::Speed, Axis::Direction] {
            *self.axis_mut(axis) = Default::default();
        }

        let record = match CalibrationRecord::read(eeprom)? {
            Some(record) => record,
            None => {
                log_warn!("no calibration record, using default scales");
                return Ok(false);
            }
        };

        let mut all_valid = true;
        let slots = [
            (Axis::Speed, false, record.speed_negative),
            (Axis::Speed, true, record.speed_positive),
            (Axis::Direction, false, record.direction_negative),
            (Axis::Direction, true, record.direction_positive),
        ];
        for (axis, positive, scale) in slots {
            if scale_is_valid(scale) {
                let axis = self.axis_mut(axis);
                if positive {
                    axis.positive_scale = scale;
                } else {
                    axis.negative_scale = scale;
                }
            } else {
                log_warn!("stored scale {} out of range, using default", scale);
                all_valid = false;
            }
        }

        Ok(all_valid)
    }

    /// Persist the current deflection scales
    pub fn store_scales(&self, eeprom: &mut dyn EepromInterface) -> Result<()> {
        CalibrationRecord {
            speed_negative: self.axis(Axis::Speed).negative_scale,
            speed_positive: self.axis(Axis::Speed).positive_scale,
            direction_negative: self.axis(Axis::Direction).negative_scale,
            direction_positive: self.axis(Axis::Direction).positive_scale,
        }
        .write(eeprom)
    }

    /// Start an extremes capture by collapsing both axes' extremes onto
    /// their neutral points
    pub fn begin_capture(&mut self) {
        for axis in [Axis::Speed, Axis::Direction] {
            let axis = self.axis_mut(axis);
            axis.raw_minimum = axis.raw_neutral;
            axis.raw_maximum = axis.raw_neutral;
        }
    }

    /// Fold one acquisition into the running extremes
    pub fn track_extremes(&mut self, raw_speed: u16, raw_direction: u16) {
        for (axis, reading) in [(Axis::Speed, raw_speed), (Axis::Direction, raw_direction)] {
            let axis = self.axis_mut(axis);
            axis.raw_minimum = axis.raw_minimum.min(reading);
            axis.raw_maximum = axis.raw_maximum.max(reading);
        }
    }

    /// Derive deflection scales from the captured extremes
    ///
    /// Each scale is the distance from neutral to the matching extreme,
    /// capped at the mechanical maximum. A capture that never left neutral
    /// yields zero scales; they are persisted as-is and rejected by the
    /// validity check on the next load.
    pub fn finish_capture(&mut self) {
        for axis in [Axis::Speed, Axis::Direction] {
            let axis = self.axis_mut(axis);
            axis.positive_scale = (axis.raw_maximum - axis.raw_neutral).min(RAW_MAX_DEFLECTION);
            axis.negative_scale = (axis.raw_neutral - axis.raw_minimum).min(RAW_MAX_DEFLECTION);
        }
    }
}
