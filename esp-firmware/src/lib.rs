// Library-Root: Hardware-Anbindung und Embassy Tasks
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports von esp-core
pub use esp_core::{
    AtClient, DimmerStateMachine, EventConsumer, EventProducer, EventQueue, GpioInput, PwmOutput,
    SerialTransport, StatusReporter,
};
