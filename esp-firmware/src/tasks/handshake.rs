// Handshake Task - verarbeitet Taster-Events und spricht mit dem LoRa-Modul
use defmt::info;
use embassy_time::{Duration, Timer};

use crate::config::HANDSHAKE_POLL_INTERVAL_MS;
use crate::hal::{ConsoleReporter, UartTransport};
use esp_core::{AtClient, EventConsumer, SerialTransport, StatusReporter, process_events};

/// Handshake Logic - leert die Queue zyklisch
///
/// Jedes Press-Event löst einen kompletten Handshake aus,
/// Release-Events werden verworfen.
pub async fn handshake_logic<T: SerialTransport, R: StatusReporter>(
    mut events: EventConsumer<'static>,
    mut client: AtClient<T>,
    mut reporter: R,
) {
    loop {
        let handshakes = process_events(&mut events, &mut client, &mut reporter).await;
        if handshakes > 0 {
            info!("Handshake: {} handshake(s) finished", handshakes);
        }

        Timer::after(Duration::from_millis(HANDSHAKE_POLL_INTERVAL_MS)).await;
    }
}

/// Handshake Task - Embassy Task für parallele Ausführung
#[embassy_executor::task]
pub async fn handshake_task(transport: UartTransport, events: EventConsumer<'static>) {
    info!("Handshake: waiting for button presses");
    handshake_logic(events, AtClient::new(transport), ConsoleReporter).await;
}
