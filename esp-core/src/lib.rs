//! ESP Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert Traits, Zustandsautomaten und das AT-Protokoll.

#![no_std]

pub mod at;
pub mod dimmer;
pub mod handshake;
pub mod input;
pub mod logic;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use at::{AtClient, AtError, DeviceEui, ResponseLine};
pub use dimmer::DimmerStateMachine;
pub use handshake::{HandshakeOutcome, process_events, run_handshake};
pub use input::{Debouncer, EventConsumer, EventProducer, EventQueue, QueueFull};
pub use logic::{BRIGHTNESS_STEP, MAX_BRIGHTNESS, MID_BRIGHTNESS, clamp_brightness, scale_duty};
pub use traits::{GpioInput, PwmError, PwmOutput, SerialError, SerialTransport, StatusReporter};
pub use types::{
    ButtonEvent, ButtonEventKind, ButtonSample, DimmerButton, DimmerState, Edge, LedChannel,
};
