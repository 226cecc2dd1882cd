//! Handshake mit dem LoRa-Modul auf Tastendruck
//!
//! Ablauf pro Press-Event: Verbindung → Firmware-Version → DevEui.
//! Die Schritte laufen strikt nacheinander, ein Fehler bricht ab.

use crate::at::AtClient;
use crate::input::EventConsumer;
use crate::traits::{SerialTransport, StatusReporter};

pub const MSG_CONNECTED: &str = "Connected to LoRa module";
pub const MSG_NOT_RESPONDING: &str = "Module not responding";

/// Ergebnis eines Handshakes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HandshakeOutcome {
    /// Alle drei Schritte erfolgreich
    Completed,
    /// Kein `OK` auf `AT`
    NoConnection,
    /// `AT+VER` ohne gültige Antwort
    VersionFailed,
    /// `AT+ID=DevEui` ohne gültige Antwort
    DevEuiFailed,
}

/// Führt den kompletten Handshake aus und meldet jeden Schritt
pub async fn run_handshake<T: SerialTransport, R: StatusReporter>(
    client: &mut AtClient<T>,
    reporter: &mut R,
) -> HandshakeOutcome {
    if client.check_connection().await.is_err() {
        reporter.report(MSG_NOT_RESPONDING);
        return HandshakeOutcome::NoConnection;
    }
    reporter.report(MSG_CONNECTED);

    match client.check_version().await {
        Ok(line) => reporter.report(line.as_str()),
        Err(_) => {
            reporter.report(MSG_NOT_RESPONDING);
            return HandshakeOutcome::VersionFailed;
        }
    }

    match client.check_device_eui().await {
        Ok((line, eui)) => {
            reporter.report(line.as_str());
            match eui {
                Some(eui) => reporter.report(eui.as_str()),
                None => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Handshake: malformed DevEui in {}", line);
                }
            }
            HandshakeOutcome::Completed
        }
        Err(_) => {
            reporter.report(MSG_NOT_RESPONDING);
            HandshakeOutcome::DevEuiFailed
        }
    }
}

/// Leert die Event-Queue; nur Press-Events lösen einen Handshake aus
///
/// Release-Events werden verbraucht und ignoriert.
/// Gibt die Anzahl ausgeführter Handshakes zurück.
pub async fn process_events<T: SerialTransport, R: StatusReporter>(
    events: &mut EventConsumer<'_>,
    client: &mut AtClient<T>,
    reporter: &mut R,
) -> usize {
    let mut handshakes = 0;
    while let Some(event) = events.poll() {
        if event.is_press() {
            run_handshake(client, reporter).await;
            handshakes += 1;
        }
    }
    handshakes
}
