//! Dimmer-Zustandsautomat (OFF/ON) für drei LEDs
//!
//! Wird einmal pro Poll-Tick aufgerufen. Der Toggle-Taster ist flankengesteuert,
//! Heller/Dunkler sind pegelgesteuert (Halten ändert kontinuierlich).

use crate::logic::{BRIGHTNESS_STEP, MID_BRIGHTNESS, clamp_brightness};
use crate::traits::{GpioInput, PwmError, PwmOutput};
use crate::types::{ButtonSample, DimmerButton, DimmerState, LedChannel};

pub struct DimmerStateMachine {
    state: DimmerState,
    /// Toggle-Abtastwert des vorherigen Ticks (für die Flankenerkennung)
    previous_toggle: ButtonSample,
}

impl DimmerStateMachine {
    /// Startet ausgeschaltet, gemerkte Helligkeit = 50 %
    pub const fn new() -> Self {
        Self {
            state: DimmerState {
                is_on: false,
                brightness: MID_BRIGHTNESS,
            },
            previous_toggle: ButtonSample::Released,
        }
    }

    pub fn state(&self) -> DimmerState {
        self.state
    }

    /// Ein Poll-Tick: Toggle abtasten, Flanke behandeln, im ON-Zustand
    /// Heller/Dunkler anwenden, Toggle-Abtastwert merken.
    ///
    /// Der Toggle-Abtastwert wird auch bei einem PWM-Fehler gespeichert,
    /// damit ein gehaltener Taster keinen zweiten Übergang auslöst.
    pub fn tick<G: GpioInput, P: PwmOutput>(
        &mut self,
        gpio: &mut G,
        pwm: &mut P,
    ) -> Result<(), PwmError> {
        let toggle = ButtonSample::from_level(gpio.read_level(DimmerButton::Toggle));
        let pressed_edge =
            toggle.is_pressed() && self.previous_toggle == ButtonSample::Released;

        let mut result = Ok(());
        if pressed_edge {
            result = self.on_toggle(pwm);
        }

        if result.is_ok() && self.state.is_on {
            result = self.apply_level_buttons(gpio, pwm);
        }

        self.previous_toggle = toggle;
        result
    }

    fn on_toggle<P: PwmOutput>(&mut self, pwm: &mut P) -> Result<(), PwmError> {
        if !self.state.is_on {
            self.state.is_on = true;
            write_all_channels(pwm, self.state.brightness)
        } else if self.state.brightness == 0 {
            // Rescue from zero: bleibt ON
            self.state.brightness = MID_BRIGHTNESS;
            write_all_channels(pwm, self.state.brightness)
        } else {
            self.state.is_on = false;
            write_all_channels(pwm, 0)
        }
    }

    fn apply_level_buttons<G: GpioInput, P: PwmOutput>(
        &mut self,
        gpio: &mut G,
        pwm: &mut P,
    ) -> Result<(), PwmError> {
        let step = i32::from(BRIGHTNESS_STEP);
        let mut delta = 0;
        if ButtonSample::from_level(gpio.read_level(DimmerButton::Increase)).is_pressed() {
            delta += step;
        }
        if ButtonSample::from_level(gpio.read_level(DimmerButton::Decrease)).is_pressed() {
            delta -= step;
        }

        let brightness = clamp_brightness(self.state.brightness, delta);
        if brightness == self.state.brightness {
            return Ok(());
        }
        self.state.brightness = brightness;
        write_all_channels(pwm, brightness)
    }
}

impl Default for DimmerStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Alle drei LEDs bekommen denselben Duty-Wert
fn write_all_channels<P: PwmOutput>(pwm: &mut P, value: u16) -> Result<(), PwmError> {
    for channel in LedChannel::ALL {
        pwm.set_duty(channel, value)?;
    }
    Ok(())
}
