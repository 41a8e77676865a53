//! Switch panel
//!
//! Groups every monitored digital line: the calibration button, the user
//! port (accessory enable), the joystick mode button, the accessory click
//! input and the two configuration dip switches. Momentary contacts are
//! debounced; dip switches are physically stable and read raw.
//!
//! All lines are active-low: a closed contact pulls its line to logic low.

use crate::input::debounce::DebouncedInput;
use crate::platform::traits::GpioInterface;

/// All monitored digital lines, debounced where needed
///
/// `update` must run exactly once per control-loop pass. Blocking waits
/// inside state-entry code must not call `update`; they poll raw levels via
/// the `*_level` methods instead, so the debounce cadence stays tied to the
/// loop.
pub struct SwitchPanel<GPIO: GpioInterface> {
    calibration_pin: GPIO,
    calibration: DebouncedInput,
    user_port_pin: GPIO,
    user_port: DebouncedInput,
    mode_button_pin: GPIO,
    mode_button: DebouncedInput,
    click_pin: GPIO,
    click: DebouncedInput,
    dip_reverse_mode: GPIO,
    dip_mode_disable: GPIO,
    click_enabled: bool,
}

impl<GPIO: GpioInterface> SwitchPanel<GPIO> {
    /// Create the panel, seeding each debouncer with its line's current
    /// raw level
    ///
    /// The click input doubles as a presence detect: a line held low at
    /// power-up means a mono plug is shorting the click jack, and click
    /// forwarding stays disabled for the session.
    pub fn new(
        calibration_pin: GPIO,
        user_port_pin: GPIO,
        mode_button_pin: GPIO,
        click_pin: GPIO,
        dip_reverse_mode: GPIO,
        dip_mode_disable: GPIO,
    ) -> Self {
        let calibration = DebouncedInput::new(calibration_pin.read());
        let user_port = DebouncedInput::new(user_port_pin.read());
        let mode_button = DebouncedInput::new(mode_button_pin.read());
        let click = DebouncedInput::new(click_pin.read());
        let click_enabled = click_pin.read();

        Self {
            calibration_pin,
            calibration,
            user_port_pin,
            user_port,
            mode_button_pin,
            mode_button,
            click_pin,
            click,
            dip_reverse_mode,
            dip_mode_disable,
            click_enabled,
        }
    }

    /// One debounce pass over all momentary lines
    pub fn update(&mut self) {
        self.calibration.update(self.calibration_pin.read());

        if self.is_mode_switch_disabled() {
            // Dip switch takes the joystick's mode button out of service.
            self.mode_button.force_inactive();
        } else {
            self.mode_button.update(self.mode_button_pin.read());
        }

        self.user_port.update(self.user_port_pin.read());
        self.click.update(self.click_pin.read());
    }

    /// Debounced calibration button state
    pub fn is_calibration_active(&self) -> bool {
        self.calibration.is_active()
    }

    /// Debounced user-port (accessory enable) state
    pub fn is_user_port_active(&self) -> bool {
        self.user_port.is_active()
    }

    /// Debounced joystick mode-button state
    ///
    /// Always inactive while the mode-disable dip switch is closed. The
    /// repurposed reverse-deflection trigger is layered on top of this in
    /// the controller; this method reports the physical button only.
    pub fn is_mode_button_active(&self) -> bool {
        self.mode_button.is_active()
    }

    /// Debounced accessory click input, gated by the power-up presence
    /// detect
    pub fn is_click_active(&self) -> bool {
        self.click_enabled && self.click.is_active()
    }

    /// Whether dip switch 1 repurposes reverse deflection as a mode trigger
    pub fn is_reverse_mode_switch_closed(&self) -> bool {
        !self.dip_reverse_mode.read()
    }

    /// Whether dip switch 2 disables the joystick's mode button
    pub fn is_mode_switch_disabled(&self) -> bool {
        !self.dip_mode_disable.read()
    }

    /// Raw calibration-button level, bypassing the debouncer
    ///
    /// For polling inside blocking waits that do not run the debounce pass.
    pub fn calibration_level(&self) -> bool {
        self.calibration_pin.read()
    }

    /// Calibration-button pin (for host simulation)
    pub fn calibration_pin_mut(&mut self) -> &mut GPIO {
        &mut self.calibration_pin
    }

    /// User-port pin (for host simulation)
    pub fn user_port_pin_mut(&mut self) -> &mut GPIO {
        &mut self.user_port_pin
    }

    /// Mode-button pin (for host simulation)
    pub fn mode_button_pin_mut(&mut self) -> &mut GPIO {
        &mut self.mode_button_pin
    }

    /// Click-input pin (for host simulation)
    pub fn click_pin_mut(&mut self) -> &mut GPIO {
        &mut self.click_pin
    }

    /// Reverse-mode dip switch pin (for host simulation)
    pub fn dip_reverse_mode_pin_mut(&mut self) -> &mut GPIO {
        &mut self.dip_reverse_mode
    }

    /// Mode-disable dip switch pin (for host simulation)
    pub fn dip_mode_disable_pin_mut(&mut self) -> &mut GPIO {
        &mut self.dip_mode_disable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::debounce::DEBOUNCE_THRESHOLD;
    use crate::platform::mock::MockGpio;

    fn open_panel() -> SwitchPanel<MockGpio> {
        // All contacts open: every line pulled high
        SwitchPanel::new(
            MockGpio::new_input(true),
            MockGpio::new_input(true),
            MockGpio::new_input(true),
            MockGpio::new_input(true),
            MockGpio::new_input(true),
            MockGpio::new_input(true),
        )
    }

    fn press(panel: &mut SwitchPanel<MockGpio>, f: fn(&mut SwitchPanel<MockGpio>) -> &mut MockGpio) {
        f(panel).set_input_state(false);
        for _ in 0..=DEBOUNCE_THRESHOLD {
            panel.update();
        }
    }

    #[test]
    fn test_calibration_button_debounced() {
        let mut panel = open_panel();
        assert!(!panel.is_calibration_active());

        panel.calibration_pin_mut().set_input_state(false);
        // Below threshold: still inactive
        for _ in 0..DEBOUNCE_THRESHOLD {
            panel.update();
            assert!(!panel.is_calibration_active());
        }
        panel.update();
        assert!(panel.is_calibration_active());
    }

    #[test]
    fn test_mode_button_disabled_by_dip_switch() {
        let mut panel = open_panel();
        press(&mut panel, SwitchPanel::mode_button_pin_mut);
        assert!(panel.is_mode_button_active());

        // Closing the mode-disable dip forces the button inactive even
        // though the contact is still closed.
        panel.dip_mode_disable_pin_mut().set_input_state(false);
        panel.update();
        assert!(panel.is_mode_switch_disabled());
        assert!(!panel.is_mode_button_active());
    }

    #[test]
    fn test_click_disabled_when_held_low_at_boot() {
        let mut panel = SwitchPanel::new(
            MockGpio::new_input(true),
            MockGpio::new_input(true),
            MockGpio::new_input(true),
            MockGpio::new_input(false), // mono plug shorting the click jack
            MockGpio::new_input(true),
            MockGpio::new_input(true),
        );
        // Line is low, but forwarding is latched off for the session
        for _ in 0..=DEBOUNCE_THRESHOLD {
            panel.update();
        }
        assert!(!panel.is_click_active());
    }

    #[test]
    fn test_click_active_when_enabled() {
        let mut panel = open_panel();
        press(&mut panel, SwitchPanel::click_pin_mut);
        assert!(panel.is_click_active());
    }

    #[test]
    fn test_raw_level_bypasses_debounce() {
        let mut panel = open_panel();
        panel.calibration_pin_mut().set_input_state(false);
        // No update pass has run: debounced state lags, raw level does not
        assert!(!panel.is_calibration_active());
        assert!(!panel.calibration_level());
    }

    #[test]
    fn test_dip_switches_read_raw() {
        let mut panel = open_panel();
        assert!(!panel.is_reverse_mode_switch_closed());
        panel.dip_reverse_mode_pin_mut().set_input_state(false);
        // Effective immediately, no debounce pass needed
        assert!(panel.is_reverse_mode_switch_closed());
    }
}
