//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung.

use crate::types::{DimmerButton, LedChannel};

/// Fehler-Typ für PWM-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PwmError {
    WriteFailed,
}

/// Fehler-Typ für die serielle Verbindung zum LoRa-Modul
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerialError {
    /// Innerhalb des Zeitfensters kam kein Byte an
    Timeout,
    /// UART meldet einen Fehler (Framing, Overrun, ...)
    Io,
}

/// Trait für den Duty-Cycle einer LED
///
/// Die PWM (1 kHz) ist beim Aufruf bereits konfiguriert.
///
/// # Implementierungen
/// - **Production:** LedcPwmOutput (ESP32 LEDC Peripheral)
/// - **Testing:** MockPwm (in-memory Mock)
pub trait PwmOutput {
    /// Setzt den Duty-Cycle eines Kanals, `value` in `[0, MAX_BRIGHTNESS]`
    ///
    /// # Fehlerbehandlung
    /// Gibt `PwmError::WriteFailed` zurück wenn Hardware-Zugriff fehlschlägt
    fn set_duty(&mut self, channel: LedChannel, value: u16) -> Result<(), PwmError>;
}

/// Trait für das Lesen der Dimmer-Taster
pub trait GpioInput {
    /// Liefert den Pin-Pegel (active-low: `true` = losgelassen)
    fn read_level(&mut self, button: DimmerButton) -> bool;
}

/// Trait für die serielle Verbindung zum LoRa-Modul
///
/// Die UART ist bereits konfiguriert (8N1, keine Flusskontrolle).
///
/// # Implementierungen
/// - **Production:** UartTransport (esp-hal Uart im Async-Modus)
/// - **Testing:** ScriptedTransport (antwortet aus einem Skript)
#[allow(async_fn_in_trait)]
pub trait SerialTransport {
    /// Sendet alle Bytes
    async fn write_all(&mut self, bytes: &[u8]) -> Result<(), SerialError>;

    /// Wartet höchstens `timeout_ms` auf das nächste Byte
    ///
    /// # Fehlerbehandlung
    /// Gibt `SerialError::Timeout` zurück wenn nichts ankommt
    async fn read_byte(&mut self, timeout_ms: u64) -> Result<u8, SerialError>;
}

/// Senke für Status-Meldungen an die Konsole
pub trait StatusReporter {
    fn report(&mut self, message: &str);
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for PwmError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            PwmError::WriteFailed => defmt::write!(fmt, "PWM write failed"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SerialError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            SerialError::Timeout => defmt::write!(fmt, "Serial timeout"),
            SerialError::Io => defmt::write!(fmt, "Serial I/O error"),
        }
    }
}
