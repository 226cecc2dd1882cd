//! Entprellung und Event-Queue für den Handshake-Taster
//!
//! Pipeline: Flanke (GPIO-Interrupt) → `Debouncer` → `EventProducer`
//! → `EventConsumer` (Hauptschleife).

use heapless::spsc::{Consumer, Producer, Queue};

use crate::types::{ButtonEvent, ButtonEventKind, Edge};

/// Mindestabstand zwischen zwei akzeptierten Flanken
pub const DEBOUNCE_MS: u64 = 20;

/// Maximale Anzahl gepufferter Events
pub const EVENT_QUEUE_CAPACITY: usize = 32;

// heapless::spsc::Queue<T, N> fasst N - 1 Elemente
const EVENT_QUEUE_SLOTS: usize = EVENT_QUEUE_CAPACITY + 1;

/// Filtert Prellen aus den rohen Flanken
///
/// Läuft direkt nach dem GPIO-Interrupt: blockiert nie, allokiert nichts.
pub struct Debouncer {
    last_accepted_ms: Option<u64>,
}

impl Debouncer {
    pub const fn new() -> Self {
        Self {
            last_accepted_ms: None,
        }
    }

    /// Wertet eine Flanke aus
    ///
    /// Akzeptiert die Flanke wenn seit der letzten akzeptierten Flanke
    /// mindestens `DEBOUNCE_MS` vergangen sind (unabhängig von der Polarität).
    /// Steigende Flanke = losgelassen, fallende Flanke = gedrückt (active-low).
    pub fn on_edge(&mut self, edge: Edge, now_ms: u64) -> Option<ButtonEvent> {
        if let Some(last) = self.last_accepted_ms {
            if now_ms.saturating_sub(last) < DEBOUNCE_MS {
                return None;
            }
        }
        self.last_accepted_ms = Some(now_ms);

        let kind = match edge {
            Edge::Rising => ButtonEventKind::Release,
            Edge::Falling => ButtonEventKind::Press,
        };
        Some(ButtonEvent {
            kind,
            timestamp_ms: now_ms,
        })
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}

/// Queue voll, das neue Event wurde verworfen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QueueFull(pub ButtonEvent);

/// Lock-freie SPSC-Queue zwischen Flanken-Task und Handshake-Loop
///
/// Ein Producer (Flanken-Task), ein Consumer (Handshake-Loop), kein Mutex.
pub struct EventQueue {
    inner: Queue<ButtonEvent, EVENT_QUEUE_SLOTS>,
}

impl EventQueue {
    pub const fn new() -> Self {
        Self {
            inner: Queue::new(),
        }
    }

    /// Teilt die Queue in Producer- und Consumer-Hälfte
    pub fn split(&mut self) -> (EventProducer<'_>, EventConsumer<'_>) {
        let (producer, consumer) = self.inner.split();
        (EventProducer { inner: producer }, EventConsumer { inner: consumer })
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

pub struct EventProducer<'a> {
    inner: Producer<'a, ButtonEvent, EVENT_QUEUE_SLOTS>,
}

impl EventProducer<'_> {
    /// Reiht ein Event ein ohne zu blockieren
    ///
    /// Ist die Queue voll, bleiben die älteren Events erhalten und das neue
    /// wird verworfen.
    pub fn try_push(&mut self, event: ButtonEvent) -> Result<(), QueueFull> {
        self.inner.enqueue(event).map_err(QueueFull)
    }
}

pub struct EventConsumer<'a> {
    inner: Consumer<'a, ButtonEvent, EVENT_QUEUE_SLOTS>,
}

impl EventConsumer<'_> {
    /// Holt das älteste Event, `None` wenn die Queue leer ist
    pub fn poll(&mut self) -> Option<ButtonEvent> {
        self.inner.dequeue()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
