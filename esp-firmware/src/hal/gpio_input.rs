// GPIO Eingänge der drei Dimmer-Taster

use esp_core::{DimmerButton, GpioInput};
use esp_hal::gpio::Input;

/// Die drei Dimmer-Taster (active-low mit Pull-Up)
pub struct DimmerButtons {
    toggle: Input<'static>,
    increase: Input<'static>,
    decrease: Input<'static>,
}

impl DimmerButtons {
    pub fn new(toggle: Input<'static>, increase: Input<'static>, decrease: Input<'static>) -> Self {
        Self {
            toggle,
            increase,
            decrease,
        }
    }
}

impl GpioInput for DimmerButtons {
    fn read_level(&mut self, button: DimmerButton) -> bool {
        match button {
            DimmerButton::Toggle => self.toggle.is_high(),
            DimmerButton::Increase => self.increase.is_high(),
            DimmerButton::Decrease => self.decrease.is_high(),
        }
    }
}
