//! Core Types für Dimmer und LoRa-Handshake
//!
//! Datenstrukturen ohne Hardware-Dependencies

/// Die drei LEDs des Dimmers
///
/// Alle drei bekommen immer denselben Duty-Wert (eine gemeinsame Helligkeit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedChannel {
    Led1,
    Led2,
    Led3,
}

impl LedChannel {
    /// Alle Kanäle in fester Reihenfolge
    pub const ALL: [LedChannel; 3] = [LedChannel::Led1, LedChannel::Led2, LedChannel::Led3];

    /// Index 0..3 (für Arrays in Treibern und Mocks)
    pub const fn index(self) -> usize {
        match self {
            LedChannel::Led1 => 0,
            LedChannel::Led2 => 1,
            LedChannel::Led3 => 2,
        }
    }
}

/// Taster des Dimmers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DimmerButton {
    /// Ein/Aus (flankengesteuert)
    Toggle,
    /// Heller (pegelgesteuert)
    Increase,
    /// Dunkler (pegelgesteuert)
    Decrease,
}

/// Ein einzelner Abtastwert eines Tasters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonSample {
    Pressed,
    Released,
}

impl ButtonSample {
    /// Taster sind active-low mit Pull-up: High-Pegel = losgelassen
    pub const fn from_level(level_high: bool) -> Self {
        if level_high {
            ButtonSample::Released
        } else {
            ButtonSample::Pressed
        }
    }

    pub const fn is_pressed(self) -> bool {
        matches!(self, ButtonSample::Pressed)
    }
}

/// Zustand des Dimmers
///
/// `brightness` liegt immer in `[0, MAX_BRIGHTNESS]`. Im ausgeschalteten Zustand
/// bleibt der Wert erhalten und wird beim nächsten Einschalten wiederhergestellt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DimmerState {
    pub is_on: bool,
    pub brightness: u16,
}

/// Elektrische Flanke am Handshake-Taster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Rising,
    Falling,
}

impl Edge {
    /// Flanke aus dem Pegel direkt nach dem Interrupt ableiten
    pub const fn from_level_after(level_high: bool) -> Self {
        if level_high { Edge::Rising } else { Edge::Falling }
    }
}

/// Art eines entprellten Taster-Events
///
/// Kodierung wie im Event-Format: release = 0, press = 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ButtonEventKind {
    Release = 0,
    Press = 1,
}

/// Entprelltes Taster-Event (Debouncer → EventQueue → Handshake)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ButtonEvent {
    pub kind: ButtonEventKind,
    /// Monotone Zeit seit Boot in Millisekunden
    pub timestamp_ms: u64,
}

impl ButtonEvent {
    pub const fn is_press(&self) -> bool {
        matches!(self.kind, ButtonEventKind::Press)
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for DimmerState {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "DimmerState {{ on: {}, brightness: {} }}",
            self.is_on,
            self.brightness
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ButtonEventKind {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ButtonEventKind::Release => defmt::write!(fmt, "Release"),
            ButtonEventKind::Press => defmt::write!(fmt, "Press"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ButtonEvent {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{} @ {} ms", self.kind, self.timestamp_ms)
    }
}
