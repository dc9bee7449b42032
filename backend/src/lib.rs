//! Emergency Department Simulator - Rust Engine
//!
//! Discrete-event simulation of patient flow through a hospital emergency
//! department over a single operating day, with deterministic execution.
//!
//! # Architecture
//!
//! - **core**: simulated clock (minutes since midnight)
//! - **models**: domain types (Patient, WaitingRoom, DepartmentState, audit EventLog)
//! - **events**: scheduled events and the time-ordered event queue
//! - **orchestrator**: the simulation engine and its event-dispatch loop
//!
//! # Critical Invariants
//!
//! 1. Events fire in non-decreasing simulated-time order; ties break by
//!    insertion sequence
//! 2. There is no randomness anywhere: identical config, identical run
//! 3. Free treatment rooms stay within [0, total rooms] at all times

// Module declarations
pub mod core;
pub mod events;
pub mod models;
pub mod orchestrator;

// Re-exports for convenience
pub use crate::core::time::SimTime;
pub use events::{
    queue::EventQueue,
    types::{EventKind, ScheduledEvent},
};
pub use models::{
    event::{Event, EventLog},
    patient::{Patient, PatientId, PatientState, Severity},
    state::{DepartmentState, OutcomeCounts},
    waiting_room::WaitingRoom,
};
pub use orchestrator::{
    SeverityMinutes, SimulationConfig, SimulationError, Simulator, StepResult,
};
