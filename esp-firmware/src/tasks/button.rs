// Handshake-Taster - flankengetriggert, entprellt, schreibt in die Event-Queue
use defmt::{debug, warn};
use embassy_time::Instant;
use esp_hal::gpio::Input;

use esp_core::{Debouncer, Edge, EventProducer, QueueFull};

/// Wartet auf Flanken am Taster und legt entprellte Events in die Queue
///
/// Der GPIO-Interrupt weckt nur diesen Task,
/// die eigentliche Verarbeitung ist kurz und blockiert nie.
/// Bei voller Queue wird das neue Event verworfen.
#[embassy_executor::task]
pub async fn button_edge_task(mut button: Input<'static>, mut events: EventProducer<'static>) {
    let mut debouncer = Debouncer::new();

    loop {
        button.wait_for_any_edge().await;

        let now_ms = Instant::now().as_millis();
        let edge = Edge::from_level_after(button.is_high());

        if let Some(event) = debouncer.on_edge(edge, now_ms) {
            debug!("Button: {}", event);
            if let Err(QueueFull(dropped)) = events.try_push(event) {
                warn!("Button: event queue full, dropped {}", dropped);
            }
        }
    }
}
