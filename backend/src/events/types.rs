//! Scheduled event types
//!
//! A scheduled event is an immutable record of (simulated time, kind,
//! optional subject patient) plus the sequence number the queue stamps on it
//! at push.
//!
//! # Design Principles
//!
//! 1. **Determinism**: events are totally ordered by (time, sequence), so
//!    same-time events fire in scheduling order on any priority-queue
//!    implementation
//! 2. **Immutability**: an event is never mutated or cancelled once pushed;
//!    handlers tolerate superseded events at dispatch instead
//! 3. **Late binding**: room-call events carry no subject; the waiting room
//!    is consulted when the event fires, not when it is scheduled

use crate::core::time::SimTime;
use crate::models::patient::PatientId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// What a scheduled event does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// A patient walks in and triage begins
    Arrival,

    /// Triage ends and a severity code is assigned
    TriageAssigned,

    /// A free room calls the most urgent waiting patient
    ///
    /// Carries no subject: the patient is chosen from the waiting room at
    /// dispatch time, because the room's contents can change between
    /// scheduling and firing.
    CallToTreatment,

    /// A treatment ends and the room frees up
    TreatmentDone,

    /// A patient's maximum wait expires
    WaitTimeout,

    /// Periodic check matching waiting patients to free rooms
    Poll,
}

/// An event on the simulation queue
///
/// Ordered by firing time ascending; ties broken by the monotonically
/// increasing sequence number assigned at push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledEvent {
    time: SimTime,
    seq: u64,
    kind: EventKind,
    subject: Option<PatientId>,
}

impl ScheduledEvent {
    /// Build an event; only the queue assigns sequence numbers
    pub(crate) fn new(
        time: SimTime,
        seq: u64,
        kind: EventKind,
        subject: Option<PatientId>,
    ) -> Self {
        Self {
            time,
            seq,
            kind,
            subject,
        }
    }

    /// When the event fires
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// What the event does
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// The patient the event concerns, if any
    pub fn subject(&self) -> Option<PatientId> {
        self.subject
    }
}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .cmp(&other.time)
            .then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
