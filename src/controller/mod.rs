//! Operating-mode state machine
//!
//! One blocking control loop owns every device and steps a thirteen-state
//! machine. Each [`step`](Controller::step) runs one debounce pass, one
//! mode handler and the loop pacing delay; mode-entry cues (beeps, the
//! accessory handshake) block inside their handler, which is acceptable
//! because the power stage holds its last latched demand while the loop is
//! busy.

use crate::drive::{self, NEUTRAL_DEMAND};
use crate::input::SwitchPanel;
use crate::joystick::{Axis, Joystick};
use crate::output::{AccessoryChannel, AccessoryLink, Beeper, DemandDac};
use crate::platform::traits::{
    AdcInterface, EepromInterface, GpioInterface, TimerInterface,
};
use crate::platform::Result;
use crate::{log_info, log_warn};

/// Loop pacing delay appended to every step, in microseconds
const LOOP_PACING_US: u32 = 200;

/// Power-up breather before the first EEPROM access, in 500 us ticks
const BOOT_BREATHER_TICKS: u32 = 2000;

/// Boot cue length (beep and silence), in 500 us ticks
const BOOT_CUE_TICKS: u32 = 150;

/// Controller operating mode
///
/// The `Announce`/`Enter` pairs exist so a cue is sounded exactly once and
/// the triggering control is released before the steady state begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperatingMode {
    /// Waiting for the stick to rest so neutral can be established
    PowerUp,
    /// One-shot cue announcing return to driving
    AnnounceDriving,
    /// Waiting for neutral stick and released buttons
    EnterDriving,
    /// Steady state: joystick drives the power stage
    Driving,
    /// One-shot accessory wake handshake and cue
    AnnounceAccessory,
    /// Waiting for the accessory-enable button to be released
    EnterAccessory,
    /// Steady state: joystick drives the accessory link
    AccessoryControl,
    /// Asserting the mode-change output
    EnterModeChange,
    /// Holding the mode-change output while the trigger is held
    ModeChange,
    /// Releasing back towards driving
    ExitModeChange,
    /// Waiting for button release and neutral stick to start a capture
    EnterCalibration,
    /// Steady state: tracking deflection extremes
    Calibrating,
    /// Holding the completion cue until the button is released
    ExitCalibration,
}

/// The whole controller: devices, joystick state and the mode machine
pub struct Controller<GPIO, ADC, TIMER, EE>
where
    GPIO: GpioInterface,
    ADC: AdcInterface,
    TIMER: TimerInterface,
    EE: EepromInterface,
{
    mode: OperatingMode,
    joystick: Joystick,
    switches: SwitchPanel<GPIO>,
    speed_dac: DemandDac<GPIO>,
    direction_dac: DemandDac<GPIO>,
    accessory: AccessoryLink<GPIO>,
    beeper: Beeper<GPIO>,
    mode_change_pin: GPIO,
    adc: ADC,
    timer: TIMER,
    eeprom: EE,
    calibration_valid: bool,
    last_demand: (u16, u16),
}

impl<GPIO, ADC, TIMER, EE> Controller<GPIO, ADC, TIMER, EE>
where
    GPIO: GpioInterface,
    ADC: AdcInterface,
    TIMER: TimerInterface,
    EE: EepromInterface,
{
    /// Assemble the controller around already-initialized devices
    ///
    /// The mode-change output is released; nothing else is driven until
    /// [`boot`](Controller::boot).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        switches: SwitchPanel<GPIO>,
        speed_dac: DemandDac<GPIO>,
        direction_dac: DemandDac<GPIO>,
        accessory: AccessoryLink<GPIO>,
        beeper: Beeper<GPIO>,
        mut mode_change_pin: GPIO,
        adc: ADC,
        timer: TIMER,
        eeprom: EE,
    ) -> Result<Self> {
        mode_change_pin.set_low()?;
        Ok(Self {
            mode: OperatingMode::PowerUp,
            joystick: Joystick::new(),
            switches,
            speed_dac,
            direction_dac,
            accessory,
            beeper,
            mode_change_pin,
            adc,
            timer,
            eeprom,
            calibration_valid: false,
            last_demand: (NEUTRAL_DEMAND, NEUTRAL_DEMAND),
        })
    }

    /// Power-up sequence: neutral demands, EEPROM load, audible cues
    ///
    /// A missing or rejected calibration record gets a separate fault beep
    /// before the ordinary startup beep, so the user can hear the
    /// difference. The debouncers keep running during the cues.
    pub fn boot(&mut self) -> Result<()> {
        self.set_demands(NEUTRAL_DEMAND, NEUTRAL_DEMAND)?;

        // Let the board's supplies settle before touching the EEPROM.
        for _ in 0..BOOT_BREATHER_TICKS {
            self.timer.delay_us(500)?;
        }

        self.calibration_valid = self.joystick.load_scales(&mut self.eeprom)?;
        if !self.calibration_valid {
            log_warn!("calibration record invalid, fault cue");
            self.beeper.on()?;
            for _ in 0..BOOT_CUE_TICKS {
                self.switches.update();
                self.timer.delay_us(500)?;
            }
            self.beeper.off()?;
            for _ in 0..BOOT_CUE_TICKS {
                self.timer.delay_us(500)?;
            }
        }

        // Startup announcement
        self.beeper.on()?;
        for _ in 0..BOOT_CUE_TICKS {
            self.switches.update();
            self.timer.delay_us(500)?;
        }
        self.beeper.off()?;

        self.set_demands(NEUTRAL_DEMAND, NEUTRAL_DEMAND)?;
        self.set_mode(OperatingMode::PowerUp);
        log_info!("boot complete, calibration_valid={}", self.calibration_valid);
        Ok(())
    }

    /// Run one control-loop iteration
    pub fn step(&mut self) -> Result<()> {
        self.switches.update();

        match self.mode {
            OperatingMode::PowerUp => self.power_up()?,
            OperatingMode::AnnounceDriving => self.announce_driving()?,
            OperatingMode::EnterDriving => self.enter_driving()?,
            OperatingMode::Driving => self.driving()?,
            OperatingMode::AnnounceAccessory => self.announce_accessory()?,
            OperatingMode::EnterAccessory => self.enter_accessory()?,
            OperatingMode::AccessoryControl => self.accessory_control()?,
            OperatingMode::EnterModeChange => self.enter_mode_change()?,
            OperatingMode::ModeChange => self.mode_change()?,
            OperatingMode::ExitModeChange => self.exit_mode_change()?,
            OperatingMode::EnterCalibration => self.enter_calibration()?,
            OperatingMode::Calibrating => self.calibrating()?,
            OperatingMode::ExitCalibration => self.exit_calibration()?,
        }

        self.timer.delay_us(LOOP_PACING_US)?;
        Ok(())
    }

    fn set_mode(&mut self, mode: OperatingMode) {
        if mode != self.mode {
            log_info!("mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }

    /// Clamp and latch both demand words into the power stage
    fn set_demands(&mut self, speed: u16, direction: u16) -> Result<()> {
        let speed = drive::clamp_demand(speed);
        let direction = drive::clamp_demand(direction);
        self.speed_dac.write(speed)?;
        self.direction_dac.write(direction)?;
        self.last_demand = (speed, direction);
        Ok(())
    }

    fn power_up(&mut self) -> Result<()> {
        if self
            .joystick
            .establish_neutral(&mut self.adc, &mut self.timer)?
        {
            self.set_mode(OperatingMode::EnterDriving);
        }
        Ok(())
    }

    fn announce_driving(&mut self) -> Result<()> {
        self.beeper.on()?;
        self.timer.delay_ms(500)?;
        self.beeper.off()?;
        self.set_mode(OperatingMode::EnterDriving);
        Ok(())
    }

    /// Refuse to start driving until the stick rests and both mode-leaving
    /// buttons are released
    fn enter_driving(&mut self) -> Result<()> {
        if self.joystick.is_in_neutral(&mut self.adc, &mut self.timer)?
            && !self.switches.is_user_port_active()
            && !self.switches.is_calibration_active()
        {
            self.set_mode(OperatingMode::Driving);
        }
        Ok(())
    }

    fn driving(&mut self) -> Result<()> {
        self.joystick.sample_axes(&mut self.adc, &mut self.timer)?;

        let reverse_as_mode = self.switches.is_reverse_mode_switch_closed();
        let speed_axis = *self.joystick.axis(Axis::Speed);
        let direction_axis = *self.joystick.axis(Axis::Direction);

        let mut speed_demand = drive::axis_demand(&speed_axis, reverse_as_mode);
        let mut direction_demand = drive::axis_demand(&direction_axis, false);

        let mode_trigger = self.switches.is_mode_button_active()
            || (reverse_as_mode && drive::reverse_mode_trigger(&speed_axis, &direction_axis));

        // Calibration outranks the accessory enable, which outranks the
        // mode trigger. Whichever wins, the demands this pass are neutral
        // so the chair stops before the mode actually changes.
        if self.switches.is_calibration_active() {
            self.set_mode(OperatingMode::EnterCalibration);
            speed_demand = NEUTRAL_DEMAND;
            direction_demand = NEUTRAL_DEMAND;
        } else if self.switches.is_user_port_active() {
            self.set_mode(OperatingMode::AnnounceAccessory);
            speed_demand = NEUTRAL_DEMAND;
            direction_demand = NEUTRAL_DEMAND;
        } else if mode_trigger {
            self.set_mode(OperatingMode::EnterModeChange);
            speed_demand = NEUTRAL_DEMAND;
            direction_demand = NEUTRAL_DEMAND;
        }

        self.set_demands(speed_demand, direction_demand)
    }

    fn announce_accessory(&mut self) -> Result<()> {
        self.accessory.enable(&mut self.timer)?;
        self.beeper.on()?;
        self.timer.delay_ms(2000)?;
        self.beeper.off()?;
        self.set_mode(OperatingMode::EnterAccessory);
        Ok(())
    }

    fn enter_accessory(&mut self) -> Result<()> {
        if !self.switches.is_user_port_active() {
            self.set_mode(OperatingMode::AccessoryControl);
        }
        Ok(())
    }

    fn accessory_control(&mut self) -> Result<()> {
        if self.switches.is_user_port_active() {
            self.accessory.disable(&mut self.timer)?;
            self.set_mode(OperatingMode::AnnounceDriving);
            // The module is asleep; skip the click and direction update.
            return Ok(());
        }

        self.accessory
            .set_signal(AccessoryChannel::ClickLeft, self.switches.is_click_active())?;

        self.joystick.sample_axes(&mut self.adc, &mut self.timer)?;
        let flags = drive::direction_flags(
            self.joystick.axis(Axis::Speed),
            self.joystick.axis(Axis::Direction),
        );
        self.accessory.apply_direction(flags)
    }

    fn enter_mode_change(&mut self) -> Result<()> {
        self.mode_change_pin.set_high()?;
        self.set_mode(OperatingMode::ModeChange);
        Ok(())
    }

    /// Hold the mode-change output until every trigger is released
    fn mode_change(&mut self) -> Result<()> {
        let mut trigger_held = self.switches.is_mode_button_active();
        if self.switches.is_reverse_mode_switch_closed() {
            self.joystick.sample_axes(&mut self.adc, &mut self.timer)?;
            trigger_held = trigger_held
                || drive::reverse_mode_trigger(
                    self.joystick.axis(Axis::Speed),
                    self.joystick.axis(Axis::Direction),
                );
        }

        if !trigger_held {
            self.mode_change_pin.set_low()?;
            self.set_mode(OperatingMode::ExitModeChange);
        }
        Ok(())
    }

    fn exit_mode_change(&mut self) -> Result<()> {
        self.set_mode(OperatingMode::EnterDriving);
        Ok(())
    }

    /// Beep while the calibration button is held; once it is released and
    /// the stick rests, start the extremes capture
    fn enter_calibration(&mut self) -> Result<()> {
        self.beeper.on()?;
        if !self.switches.is_calibration_active() {
            self.beeper.off()?;
            if self.joystick.is_in_neutral(&mut self.adc, &mut self.timer)? {
                self.joystick.begin_capture();
                self.set_mode(OperatingMode::Calibrating);
            }
        }
        Ok(())
    }

    fn calibrating(&mut self) -> Result<()> {
        let (speed, direction) = self.joystick.sample_axes(&mut self.adc, &mut self.timer)?;
        self.joystick.track_extremes(speed, direction);

        if self.switches.is_calibration_active() {
            self.joystick.finish_capture();
            self.joystick.store_scales(&mut self.eeprom)?;
            log_info!("calibration stored");
            self.beeper.on()?;
            self.set_mode(OperatingMode::ExitCalibration);
        }
        Ok(())
    }

    /// Hold the completion cue, then re-establish neutral from scratch
    fn exit_calibration(&mut self) -> Result<()> {
        if !self.switches.is_calibration_active() {
            self.beeper.off()?;
            self.set_mode(OperatingMode::PowerUp);
        }
        Ok(())
    }

    /// Current operating mode
    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    /// Last demand pair latched into the power stage
    pub fn last_demand(&self) -> (u16, u16) {
        self.last_demand
    }

    /// Whether the stored calibration record was accepted at boot
    pub fn calibration_valid(&self) -> bool {
        self.calibration_valid
    }

    /// Whether the mode-change output is asserted
    pub fn is_mode_change_asserted(&self) -> bool {
        self.mode_change_pin.read()
    }

    /// Joystick state
    pub fn joystick(&self) -> &Joystick {
        &self.joystick
    }

    /// Switch panel (for host simulation)
    pub fn switches_mut(&mut self) -> &mut SwitchPanel<GPIO> {
        &mut self.switches
    }

    /// ADC (for host simulation)
    pub fn adc_mut(&mut self) -> &mut ADC {
        &mut self.adc
    }

    /// EEPROM (for host simulation)
    pub fn eeprom_mut(&mut self) -> &mut EE {
        &mut self.eeprom
    }

    /// Accessory link (for host simulation)
    pub fn accessory_mut(&mut self) -> &mut AccessoryLink<GPIO> {
        &mut self.accessory
    }

    /// Beeper state
    pub fn beeper(&self) -> &Beeper<GPIO> {
        &self.beeper
    }
}
