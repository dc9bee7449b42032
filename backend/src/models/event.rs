//! Event logging for simulation replay and auditing
//!
//! This module defines the Event enum which captures all significant state
//! changes during a run. Events enable:
//! - Deterministic replay checks (two identical configs, identical logs)
//! - Debugging (what happened to a patient and when)
//! - Analysis (waiting times, treatment serialization, outcome tallies)
//!
//! # Event Types
//!
//! Events follow the patient lifecycle:
//! - **PatientArrived**: patient walks in, triage begins
//! - **SeverityAssigned**: triage complete, code assigned
//! - **TreatmentStarted**: patient called into a free room
//! - **PatientDischarged**: treatment finished
//! - **PatientAbandoned**: white-code wait expired, patient left
//! - **SeverityEscalated**: yellow-code wait expired, patient re-coded red
//! - **PatientDeceased**: red-code wait expired
//! - **StaleTimeout**: a timeout fired for a patient no longer waiting

use crate::core::time::SimTime;
use crate::models::patient::{PatientId, PatientState, Severity};

/// Simulation event capturing a state change
///
/// All events carry the simulated time at which they occurred. Events are
/// logged in dispatch order, so log order is non-decreasing in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Patient entered the department and started triage
    PatientArrived { time: SimTime, patient: PatientId },

    /// Triage assigned a severity code and the patient began waiting
    SeverityAssigned {
        time: SimTime,
        patient: PatientId,
        severity: Severity,
    },

    /// Patient was called out of the waiting room into a free room
    TreatmentStarted {
        time: SimTime,
        patient: PatientId,
        severity: Severity,
    },

    /// Treatment finished; the patient left and the room freed up
    PatientDischarged { time: SimTime, patient: PatientId },

    /// White-code wait expired; the patient gave up and left
    PatientAbandoned { time: SimTime, patient: PatientId },

    /// Yellow-code wait expired; the patient was re-coded red
    SeverityEscalated {
        time: SimTime,
        patient: PatientId,
        from: Severity,
        to: Severity,
    },

    /// Red-code wait expired; the patient died in the waiting room
    PatientDeceased { time: SimTime, patient: PatientId },

    /// A wait timeout fired for a patient who had already moved on
    StaleTimeout {
        time: SimTime,
        patient: PatientId,
        state: PatientState,
    },
}

impl Event {
    /// Simulated time at which this event occurred
    pub fn time(&self) -> SimTime {
        match self {
            Event::PatientArrived { time, .. } => *time,
            Event::SeverityAssigned { time, .. } => *time,
            Event::TreatmentStarted { time, .. } => *time,
            Event::PatientDischarged { time, .. } => *time,
            Event::PatientAbandoned { time, .. } => *time,
            Event::SeverityEscalated { time, .. } => *time,
            Event::PatientDeceased { time, .. } => *time,
            Event::StaleTimeout { time, .. } => *time,
        }
    }

    /// Short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::PatientArrived { .. } => "PatientArrived",
            Event::SeverityAssigned { .. } => "SeverityAssigned",
            Event::TreatmentStarted { .. } => "TreatmentStarted",
            Event::PatientDischarged { .. } => "PatientDischarged",
            Event::PatientAbandoned { .. } => "PatientAbandoned",
            Event::SeverityEscalated { .. } => "SeverityEscalated",
            Event::PatientDeceased { .. } => "PatientDeceased",
            Event::StaleTimeout { .. } => "StaleTimeout",
        }
    }

    /// The patient this event concerns
    pub fn patient(&self) -> PatientId {
        match self {
            Event::PatientArrived { patient, .. } => *patient,
            Event::SeverityAssigned { patient, .. } => *patient,
            Event::TreatmentStarted { patient, .. } => *patient,
            Event::PatientDischarged { patient, .. } => *patient,
            Event::PatientAbandoned { patient, .. } => *patient,
            Event::SeverityEscalated { patient, .. } => *patient,
            Event::PatientDeceased { patient, .. } => *patient,
            Event::StaleTimeout { patient, .. } => *patient,
        }
    }
}

/// Event log for storing and querying simulation events
///
/// A simple wrapper around `Vec<Event>` with convenience queries.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Number of events logged
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if nothing has been logged
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events, in dispatch order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events that occurred at a specific simulated time
    pub fn events_at(&self, time: SimTime) -> Vec<&Event> {
        self.events.iter().filter(|e| e.time() == time).collect()
    }

    /// Events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Events for a specific patient
    pub fn events_for_patient(&self, patient: PatientId) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.patient() == patient)
            .collect()
    }

    /// Clear all events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
