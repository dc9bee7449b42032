//! Patient model
//!
//! Represents one patient moving through the department.
//! Each patient has:
//! - A unique sequential id (1-based, assigned at creation)
//! - An arrival time (set once, immutable)
//! - A current state, mutated only by the engine's event handlers
//!
//! Patients are created during initialization and never destroyed during a
//! run: terminal states keep the record around for final counting.

use crate::core::time::SimTime;
use serde::{Deserialize, Serialize};

/// Unique, sequential, 1-based patient identifier
pub type PatientId = u32;

/// Triage severity code, ordered by clinical priority (`Red` highest)
///
/// Severity only ever escalates (Yellow → Red on timeout), never
/// de-escalates.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Severity {
    White,
    Yellow,
    Red,
}

impl Severity {
    /// Next code in the fixed triage rotation: White → Yellow → Red → White
    ///
    /// Triage outcomes cycle deterministically across successive triage
    /// events instead of being drawn from patient data or randomness.
    pub fn next_in_rotation(self) -> Severity {
        match self {
            Severity::White => Severity::Yellow,
            Severity::Yellow => Severity::Red,
            Severity::Red => Severity::White,
        }
    }
}

/// Where a patient currently is in the department
///
/// `Out` covers both discharge after treatment and abandonment while
/// waiting; the two are differentiated only by the outcome counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatientState {
    /// Created at initialization, not yet arrived
    New,

    /// Arrived, severity code not yet assigned
    InTriage,

    /// In the waiting room under the given code
    Waiting(Severity),

    /// Occupying a treatment room; the code they were called under
    Treating(Severity),

    /// Left the department alive (discharged or walked out)
    Out,

    /// Died in the waiting room after a red-code timeout
    Deceased,
}

impl PatientState {
    /// True for the three waiting-room states
    pub fn is_waiting(self) -> bool {
        matches!(self, PatientState::Waiting(_))
    }

    /// True once the patient can generate no further events
    pub fn is_terminal(self) -> bool {
        matches!(self, PatientState::Out | PatientState::Deceased)
    }

    /// The severity a waiting patient holds, if any
    pub fn waiting_severity(self) -> Option<Severity> {
        match self {
            PatientState::Waiting(severity) => Some(severity),
            _ => None,
        }
    }
}

/// Represents one patient in the simulation
///
/// # Example
/// ```
/// use emergency_simulator_core_rs::{Patient, PatientState, SimTime};
///
/// let patient = Patient::new(1, SimTime::from_hm(8, 0));
/// assert_eq!(patient.id(), 1);
/// assert_eq!(patient.state(), PatientState::New);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    /// Unique sequential identifier (1-based)
    id: PatientId,

    /// When the patient enters the system; immutable after creation
    arrival_time: SimTime,

    /// Current position in the state machine
    state: PatientState,
}

impl Patient {
    /// Create a new patient in the `New` state
    ///
    /// # Panics
    /// Panics if `id` is zero (ids are 1-based).
    pub fn new(id: PatientId, arrival_time: SimTime) -> Self {
        assert!(id > 0, "patient ids are 1-based");
        Self {
            id,
            arrival_time,
            state: PatientState::New,
        }
    }

    /// The patient's id
    pub fn id(&self) -> PatientId {
        self.id
    }

    /// When the patient arrives
    pub fn arrival_time(&self) -> SimTime {
        self.arrival_time
    }

    /// Current state
    pub fn state(&self) -> PatientState {
        self.state
    }

    /// Move the patient to a new state
    ///
    /// Only the engine's event handlers call this; the handlers, not the
    /// patient, own the transition rules.
    pub fn set_state(&mut self, state: PatientState) {
        self.state = state;
    }
}
