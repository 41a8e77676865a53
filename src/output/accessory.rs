//! Accessory link
//!
//! Drives the accessory (Bluetooth) module: four shared direction lines
//! plus the left and right click outputs, all active-low. The module is
//! woken and put back to sleep with a slow square-wave handshake on the
//! four direction lines; the wave is timed with the platform's delay
//! primitive, so the handshake blocks the control loop for the duration
//! (about half a second).

use crate::drive::DirectionFlags;
use crate::log_info;
use crate::platform::traits::{GpioInterface, TimerInterface};
use crate::platform::Result;

/// One of the six accessory output lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccessoryChannel {
    Forward,
    Reverse,
    Left,
    Right,
    ClickLeft,
    ClickRight,
}

/// The accessory module's output lines
pub struct AccessoryLink<GPIO: GpioInterface> {
    forward_pin: GPIO,
    reverse_pin: GPIO,
    left_pin: GPIO,
    right_pin: GPIO,
    click_left_pin: GPIO,
    click_right_pin: GPIO,
}

impl<GPIO: GpioInterface> AccessoryLink<GPIO> {
    /// Take ownership of the six output lines and release them all
    /// (inactive high)
    pub fn new(
        forward_pin: GPIO,
        reverse_pin: GPIO,
        left_pin: GPIO,
        right_pin: GPIO,
        click_left_pin: GPIO,
        click_right_pin: GPIO,
    ) -> Result<Self> {
        let mut link = Self {
            forward_pin,
            reverse_pin,
            left_pin,
            right_pin,
            click_left_pin,
            click_right_pin,
        };
        link.forward_pin.set_high()?;
        link.reverse_pin.set_high()?;
        link.left_pin.set_high()?;
        link.right_pin.set_high()?;
        link.click_left_pin.set_high()?;
        link.click_right_pin.set_high()?;
        Ok(link)
    }

    fn pin_mut(&mut self, channel: AccessoryChannel) -> &mut GPIO {
        match channel {
            AccessoryChannel::Forward => &mut self.forward_pin,
            AccessoryChannel::Reverse => &mut self.reverse_pin,
            AccessoryChannel::Left => &mut self.left_pin,
            AccessoryChannel::Right => &mut self.right_pin,
            AccessoryChannel::ClickLeft => &mut self.click_left_pin,
            AccessoryChannel::ClickRight => &mut self.click_right_pin,
        }
    }

    /// Drive one line: active asserts it low
    pub fn set_signal(&mut self, channel: AccessoryChannel, active: bool) -> Result<()> {
        self.pin_mut(channel).set_level(!active)
    }

    /// Whether a line is currently asserted
    pub fn is_active(&mut self, channel: AccessoryChannel) -> bool {
        !self.pin_mut(channel).read()
    }

    /// Drive all four direction lines from the joystick's coarse direction
    ///
    /// Every line is written every call, asserted or not, so a stale
    /// assertion can never survive a flag change.
    pub fn apply_direction(&mut self, flags: DirectionFlags) -> Result<()> {
        self.set_signal(AccessoryChannel::Forward, flags.contains(DirectionFlags::FORWARD))?;
        self.set_signal(AccessoryChannel::Reverse, flags.contains(DirectionFlags::REVERSE))?;
        self.set_signal(AccessoryChannel::Left, flags.contains(DirectionFlags::LEFT))?;
        self.set_signal(AccessoryChannel::Right, flags.contains(DirectionFlags::RIGHT))?;
        Ok(())
    }

    fn set_direction_lines(&mut self, high: bool) -> Result<()> {
        self.forward_pin.set_level(high)?;
        self.reverse_pin.set_level(high)?;
        self.left_pin.set_level(high)?;
        self.right_pin.set_level(high)?;
        Ok(())
    }

    /// Roughly 10 ms built from the 500 us delay primitive
    fn wait_short(&mut self, timer: &mut dyn TimerInterface) -> Result<()> {
        for _ in 0..20 {
            timer.delay_us(500)?;
        }
        Ok(())
    }

    /// Roughly 50 ms built from the 500 us delay primitive
    fn wait_long(&mut self, timer: &mut dyn TimerInterface) -> Result<()> {
        for _ in 0..100 {
            timer.delay_us(500)?;
        }
        Ok(())
    }

    /// Wake the accessory module
    ///
    /// Square wave on the four direction lines: two low/high cycles at the
    /// short pacing, two at the long pacing, then two long settle waits.
    /// Ends with all direction lines released.
    pub fn enable(&mut self, timer: &mut dyn TimerInterface) -> Result<()> {
        log_info!("accessory link enable handshake");
        for _ in 0..2 {
            self.set_direction_lines(false)?;
            self.wait_short(timer)?;
            self.set_direction_lines(true)?;
            self.wait_short(timer)?;
        }
        for _ in 0..2 {
            self.set_direction_lines(false)?;
            self.wait_long(timer)?;
            self.set_direction_lines(true)?;
            self.wait_long(timer)?;
        }
        self.wait_long(timer)?;
        self.wait_long(timer)?;
        Ok(())
    }

    /// Put the accessory module back to sleep
    ///
    /// The wake pattern inverted: high-first, five short steps, then a
    /// long low/high cycle and two long settle waits. Ends with all
    /// direction lines released.
    pub fn disable(&mut self, timer: &mut dyn TimerInterface) -> Result<()> {
        log_info!("accessory link disable handshake");
        for _ in 0..2 {
            self.set_direction_lines(true)?;
            self.wait_short(timer)?;
            self.set_direction_lines(false)?;
            self.wait_short(timer)?;
        }
        self.set_direction_lines(true)?;
        self.wait_short(timer)?;
        self.set_direction_lines(false)?;
        self.wait_long(timer)?;
        self.set_direction_lines(true)?;
        self.wait_long(timer)?;
        self.wait_long(timer)?;
        self.wait_long(timer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{MockGpio, MockTimer};

    fn make_link() -> AccessoryLink<MockGpio> {
        AccessoryLink::new(
            MockGpio::new_output(),
            MockGpio::new_output(),
            MockGpio::new_output(),
            MockGpio::new_output(),
            MockGpio::new_output(),
            MockGpio::new_output(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_releases_all_lines() {
        let mut link = make_link();
        for channel in [
            AccessoryChannel::Forward,
            AccessoryChannel::Reverse,
            AccessoryChannel::Left,
            AccessoryChannel::Right,
            AccessoryChannel::ClickLeft,
            AccessoryChannel::ClickRight,
        ] {
            assert!(!link.is_active(channel));
        }
    }

    #[test]
    fn test_set_signal_active_low() {
        let mut link = make_link();
        link.set_signal(AccessoryChannel::Forward, true).unwrap();
        assert!(link.is_active(AccessoryChannel::Forward));

        link.set_signal(AccessoryChannel::Forward, false).unwrap();
        assert!(!link.is_active(AccessoryChannel::Forward));
    }

    #[test]
    fn test_apply_direction_writes_all_four_lines() {
        let mut link = make_link();
        link.apply_direction(DirectionFlags::REVERSE | DirectionFlags::LEFT)
            .unwrap();
        assert!(!link.is_active(AccessoryChannel::Forward));
        assert!(link.is_active(AccessoryChannel::Reverse));
        assert!(link.is_active(AccessoryChannel::Left));
        assert!(!link.is_active(AccessoryChannel::Right));

        // A later empty frame releases the stale assertions
        link.apply_direction(DirectionFlags::empty()).unwrap();
        assert!(!link.is_active(AccessoryChannel::Reverse));
        assert!(!link.is_active(AccessoryChannel::Left));
    }

    #[test]
    fn test_apply_direction_leaves_click_lines_alone() {
        let mut link = make_link();
        link.set_signal(AccessoryChannel::ClickLeft, true).unwrap();
        link.apply_direction(DirectionFlags::FORWARD).unwrap();
        assert!(link.is_active(AccessoryChannel::ClickLeft));
    }

    #[test]
    fn test_enable_handshake_timing_and_final_state() {
        let mut link = make_link();
        let mut timer = MockTimer::new();
        link.enable(&mut timer).unwrap();

        // 4 x 10ms + 4 x 50ms + 2 x 50ms settle
        assert_eq!(timer.now_us(), 4 * 10_000 + 6 * 50_000);
        assert!(!link.is_active(AccessoryChannel::Forward));
        assert!(!link.is_active(AccessoryChannel::Right));
    }

    #[test]
    fn test_disable_handshake_timing_and_final_state() {
        let mut link = make_link();
        let mut timer = MockTimer::new();
        link.disable(&mut timer).unwrap();

        // 5 x 10ms + 1 x 50ms + 3 x 50ms
        assert_eq!(timer.now_us(), 5 * 10_000 + 4 * 50_000);
        assert!(!link.is_active(AccessoryChannel::Forward));
        assert!(!link.is_active(AccessoryChannel::Reverse));
    }

    #[test]
    fn test_enable_toggles_direction_lines() {
        let mut link = make_link();
        let mut timer = MockTimer::new();
        link.enable(&mut timer).unwrap();
        // Initial release plus four low/high cycles
        assert_eq!(
            link.pin_mut(AccessoryChannel::Forward).history(),
            &[true, false, true, false, true, false, true, false, true]
        );
    }
}
