// Konsolen-Ausgabe für Handshake-Meldungen
//
// Die Meldungen sind für den Benutzer am seriellen Monitor gedacht und
// laufen daher über esp-println statt über defmt.

use esp_core::StatusReporter;

/// Schreibt jede Meldung als eigene Zeile auf die Konsole
pub struct ConsoleReporter;

impl StatusReporter for ConsoleReporter {
    fn report(&mut self, message: &str) {
        esp_println::println!("{}", message);
    }
}
