//! Orchestrator - the simulation engine
//!
//! Owns the event queue, the department state, and the event-dispatch state
//! machine that advances patients over simulated time.
//!
//! See `engine.rs` for the full implementation.

pub mod engine;

// Re-export main types for convenience
pub use engine::{
    SeverityMinutes, SimulationConfig, SimulationError, Simulator, StepResult,
};
