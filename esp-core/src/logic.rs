//! Pure Business Logic Functions
//!
//! Funktionen ohne Hardware-Dependencies (testbar!)

/// Maximaler Duty-Wert (1 kHz PWM mit 1000 Stufen)
pub const MAX_BRIGHTNESS: u16 = 1000;

/// Helligkeit beim ersten Einschalten und nach "Rescue from zero"
pub const MID_BRIGHTNESS: u16 = MAX_BRIGHTNESS / 2;

/// Schrittweite pro Poll-Tick für Heller/Dunkler
pub const BRIGHTNESS_STEP: u16 = 20;

/// Addiert `delta` zur Helligkeit und begrenzt auf `[0, MAX_BRIGHTNESS]`
///
/// # Beispiele
///
/// ```
/// # use esp_core::{clamp_brightness, MAX_BRIGHTNESS};
/// assert_eq!(clamp_brightness(990, 20), MAX_BRIGHTNESS);
/// assert_eq!(clamp_brightness(10, -20), 0);
/// assert_eq!(clamp_brightness(500, -20), 480);
/// ```
pub fn clamp_brightness(current: u16, delta: i32) -> u16 {
    let target = i32::from(current).saturating_add(delta);
    target.clamp(0, i32::from(MAX_BRIGHTNESS)) as u16
}

/// Rechnet eine Helligkeit auf einen Hardware-Duty mit `duty_range` Stufen um
///
/// `duty_range` entspricht 100 % (bei 10 Bit: 1024). Werte über
/// `MAX_BRIGHTNESS` werden begrenzt.
///
/// ```
/// # use esp_core::{scale_duty, MAX_BRIGHTNESS};
/// assert_eq!(scale_duty(MAX_BRIGHTNESS, 1 << 10), 1024);
/// assert_eq!(scale_duty(500, 1 << 10), 512);
/// ```
pub fn scale_duty(value: u16, duty_range: u32) -> u32 {
    let value = u64::from(value.min(MAX_BRIGHTNESS));
    // Ergebnis ist höchstens duty_range
    (value * u64::from(duty_range) / u64::from(MAX_BRIGHTNESS)) as u32
}
