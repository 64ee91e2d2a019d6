//! Screen-level authentication flows (login, registration, password
//! recovery).
//!
//! Each flow is an explicit state container with a typed event enum and a
//! reducer that mutates state and returns [`effects::FlowEffect`] commands,
//! never performing I/O itself. The [`runtime`] module is the side-effect
//! boundary: it owns a container, serializes events into it, executes the
//! effects (network calls, debounce timers, opening the mail client) and
//! publishes snapshots plus discrete outputs for the coordinator.

pub mod effects;
pub mod features;
pub mod flow;
pub mod runtime;
pub mod strings;

pub use features::{login, recovery, registration};
pub use flow::Flow;
pub use runtime::{FlowHandle, FlowOptions, FlowOutput, spawn_flow};
