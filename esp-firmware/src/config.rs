// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
//
// Die GPIO-Nummern dokumentieren die Verdrahtung. Die eigentliche Zuordnung
// passiert in main.rs über die typisierten Peripherals (GPIOx).

// ============================================================================
// Dimmer Konfiguration
// ============================================================================

/// GPIO-Pins der drei dimmbaren LEDs (LEDC Low-Speed Kanäle 0..2)
pub const LED_GPIO_PINS: [u8; 3] = [21, 22, 23];

/// GPIO-Pin des Ein/Aus-Tasters (active-low, interner Pull-Up)
pub const TOGGLE_BUTTON_GPIO_PIN: u8 = 6;

/// GPIO-Pin des "Heller"-Tasters
pub const INCREASE_BUTTON_GPIO_PIN: u8 = 7;

/// GPIO-Pin des "Dunkler"-Tasters
pub const DECREASE_BUTTON_GPIO_PIN: u8 = 10;

/// PWM-Frequenz der LEDC-Timer in Hz
pub const PWM_FREQUENCY_HZ: u32 = 1000;

/// Duty-Auflösung der LEDC-Timer (muss zu `Duty::Duty10Bit` in main.rs passen)
pub const PWM_DUTY_BITS: u32 = 10;

/// Abtast-Intervall des Dimmer-Zustandsautomaten in Millisekunden
/// Bestimmt auch die Rampen-Geschwindigkeit beim Halten von Heller/Dunkler
pub const DIMMER_POLL_INTERVAL_MS: u64 = 100;

// ============================================================================
// LoRa Konfiguration
// ============================================================================

/// GPIO-Pin des Handshake-Tasters (BOOT-Taster auf dem DevKit)
pub const HANDSHAKE_BUTTON_GPIO_PIN: u8 = 9;

/// UART1 TX → RX des LoRa-Moduls
pub const LORA_UART_TX_GPIO_PIN: u8 = 4;

/// UART1 RX ← TX des LoRa-Moduls
pub const LORA_UART_RX_GPIO_PIN: u8 = 5;

/// Baudrate des LoRa-Moduls (8N1)
pub const LORA_BAUD_RATE: u32 = 9600;

/// Wie oft der Handshake-Task die Event-Queue leert (Millisekunden)
pub const HANDSHAKE_POLL_INTERVAL_MS: u64 = 10;
