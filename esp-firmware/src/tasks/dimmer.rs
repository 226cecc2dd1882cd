// Dimmer Task - Taster abfragen, drei LEDs per LEDC dimmen
use defmt::{error, info};
use embassy_time::{Duration, Timer};

use crate::config::DIMMER_POLL_INTERVAL_MS;
use crate::hal::{DimmerButtons, LedcPwmOutput};
use esp_core::{DimmerStateMachine, GpioInput, PwmOutput};

/// Dimmer Logic - Testbare Business Logic ohne Hardware-Abhängigkeit
///
/// Führt alle `DIMMER_POLL_INTERVAL_MS` einen Schritt des
/// Zustandsautomaten aus und loggt Zustandswechsel.
///
/// # Trait-basierte Abstraktion
/// - `G: GpioInput`: Taster (Hardware oder Mock)
/// - `P: PwmOutput`: LED-Kanäle (Hardware oder Mock)
pub async fn dimmer_poll_logic<G: GpioInput, P: PwmOutput>(mut buttons: G, mut pwm: P) {
    let mut machine = DimmerStateMachine::new();
    let mut last_state = machine.state();

    loop {
        if let Err(e) = machine.tick(&mut buttons, &mut pwm) {
            error!("Dimmer: PWM write failed: {}", e);
        }

        let state = machine.state();
        if state != last_state {
            info!("Dimmer: {}", state);
            last_state = state;
        }

        // Async Delay: gibt CPU an andere Tasks zurück
        Timer::after(Duration::from_millis(DIMMER_POLL_INTERVAL_MS)).await;
    }
}

/// Dimmer Task - Embassy Task für parallele Ausführung
///
/// LEDC und die Taster-Eingänge werden in main.rs konfiguriert,
/// weil die Kanäle ihren Timer als `'static` Referenz brauchen.
#[embassy_executor::task]
pub async fn dimmer_task(buttons: DimmerButtons, pwm: LedcPwmOutput) {
    info!(
        "Dimmer: started (poll every {} ms)",
        DIMMER_POLL_INTERVAL_MS
    );
    dimmer_poll_logic(buttons, pwm).await;
}
