// LEDC PWM Ausgabe für die drei Dimmer-LEDs

use esp_core::{LedChannel, MAX_BRIGHTNESS, PwmError, PwmOutput, scale_duty};
use esp_hal::ledc::LowSpeed;
use esp_hal::ledc::channel::{Channel, ChannelHW};

use crate::config::PWM_DUTY_BITS;

/// Real Hardware PWM Output
///
/// Schreibt den Duty direkt ins LEDC-Register (volle Timer-Auflösung).
/// Die Kanäle leben in `StaticCell`s (siehe main.rs), weil sie ihren
/// LEDC-Timer per Referenz halten.
pub struct LedcPwmOutput {
    channels: [&'static Channel<'static, LowSpeed>; 3],
}

impl LedcPwmOutput {
    /// Reihenfolge der Kanäle entspricht `LedChannel::ALL`
    pub fn new(channels: [&'static Channel<'static, LowSpeed>; 3]) -> Self {
        Self { channels }
    }
}

impl PwmOutput for LedcPwmOutput {
    fn set_duty(&mut self, channel: LedChannel, value: u16) -> Result<(), PwmError> {
        if value > MAX_BRIGHTNESS {
            return Err(PwmError::WriteFailed);
        }
        self.channels[channel.index()].set_duty_hw(scale_duty(value, 1 << PWM_DUTY_BITS));
        Ok(())
    }
}
