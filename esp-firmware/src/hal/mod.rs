// Hardware Abstraction Layer (HAL) Module
//
// Implementiert die Traits aus esp-core für die ESP32-C6 Peripherie.
// Die Logik in esp-core bleibt damit auf dem Host testbar.

pub mod console;
pub mod gpio_input;
pub mod pwm_output;
pub mod uart_transport;

pub use console::ConsoleReporter;
pub use gpio_input::DimmerButtons;
pub use pwm_output::LedcPwmOutput;
pub use uart_transport::UartTransport;
