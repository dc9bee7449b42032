//! Domain models for the emergency department simulator

pub mod event;
pub mod patient;
pub mod state;
pub mod waiting_room;

// Re-exports
pub use event::{Event, EventLog};
pub use patient::{Patient, PatientId, PatientState, Severity};
pub use state::{DepartmentState, OutcomeCounts};
pub use waiting_room::WaitingRoom;
