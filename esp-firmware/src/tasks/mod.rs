// Task-Modul: Enthält alle Embassy Tasks
//
// Jeder Task läuft asynchron und unabhängig.
// Taster-Task und Handshake-Task teilen sich die lock-freie Event-Queue.

pub mod button;
pub mod dimmer;
pub mod handshake;

// Re-export Tasks für einfachen Import
pub use button::button_edge_task;
pub use dimmer::dimmer_task;
pub use handshake::handshake_task;
