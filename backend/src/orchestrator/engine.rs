//! Simulation Engine
//!
//! Main event-dispatch loop integrating all components:
//! - Deterministic patient arrivals (fixed inter-arrival spacing)
//! - Triage with the rotating severity cursor
//! - Waiting-room management and wait timeouts
//! - Treatment-room occupancy and discharge
//! - Event logging (complete simulation history)
//!
//! # Architecture
//!
//! The engine is seeded with one `Arrival` event per patient plus one
//! recurring `Poll` event, then `run()` repeatedly pops the earliest event
//! and dispatches it to a handler that may mutate patient state, room
//! availability, and/or push new events, until the queue is empty:
//!
//! ```text
//! Arrival        -> schedule TriageAssigned after the triage duration
//! TriageAssigned -> assign the cursor severity, admit to the waiting
//!                   room, schedule WaitTimeout for that severity
//! WaitTimeout    -> white: abandon; yellow: escalate to red and rewait;
//!                   red: deceased; anything else: stale, log and continue
//! CallToTreatment-> pop the most urgent waiting patient into a free room,
//!                   schedule TreatmentDone
//! TreatmentDone  -> discharge, free the room, try to refill it now
//! Poll           -> if patients wait and rooms are free, schedule a call;
//!                   reschedule itself until the configured end time
//! ```
//!
//! # Determinism
//!
//! There is no randomness anywhere: arrivals are evenly spaced, triage
//! outcomes rotate white -> yellow -> red, and same-time events fire in
//! scheduling order. Same config = identical results.
//!
//! # Example
//!
//! ```rust
//! use emergency_simulator_core_rs::{SimulationConfig, Simulator};
//!
//! let mut simulator = Simulator::new(SimulationConfig::default()).unwrap();
//! let outcomes = simulator.run().unwrap();
//! assert_eq!(outcomes.total(), 50); // every default patient is accounted for
//! ```

use crate::core::time::SimTime;
use crate::events::queue::EventQueue;
use crate::events::types::{EventKind, ScheduledEvent};
use crate::models::event::{Event, EventLog};
use crate::models::patient::{Patient, PatientId, PatientState, Severity};
use crate::models::state::{DepartmentState, OutcomeCounts};
use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Configuration Types
// ============================================================================

/// One duration per severity code, in minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityMinutes {
    pub white: u32,
    pub yellow: u32,
    pub red: u32,
}

impl SeverityMinutes {
    /// The duration configured for `severity`
    pub fn get(&self, severity: Severity) -> u32 {
        match severity {
            Severity::White => self.white,
            Severity::Yellow => self.yellow,
            Severity::Red => self.red,
        }
    }

    fn all_positive(&self) -> bool {
        self.white > 0 && self.yellow > 0 && self.red > 0
    }
}

/// Complete simulation configuration
///
/// All parameters are plain data handed in by an external collaborator
/// (a CLI, a UI, a test); the engine validates them at initialization and
/// can be re-initialized with new values without restarting the process.
///
/// # Fields
///
/// * `num_rooms` - staffed treatment rooms; zero models a closed department
/// * `num_patients` - scheduled arrivals for the day
/// * `arrival_interval_minutes` - fixed spacing between arrivals
/// * `start_time` / `end_time` - operating window; the end time only stops
///   the poll from rescheduling, in-flight events still drain
/// * `triage_minutes` - time from arrival to severity assignment
/// * `treatment_minutes` - per-severity treatment duration
/// * `timeout_minutes` - per-severity maximum wait before abandonment,
///   escalation, or death
/// * `poll_interval_minutes` - spacing of the room-matching poll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of staffed treatment rooms (zero is legal: nobody is treated)
    pub num_rooms: u32,

    /// Number of patients arriving over the day
    pub num_patients: u32,

    /// Minutes between consecutive arrivals
    pub arrival_interval_minutes: u32,

    /// First arrival and first event of the day
    pub start_time: SimTime,

    /// After this time the poll stops rescheduling itself
    pub end_time: SimTime,

    /// Minutes from arrival to severity assignment
    pub triage_minutes: u32,

    /// Treatment duration per severity
    pub treatment_minutes: SeverityMinutes,

    /// Maximum wait per severity before the timeout fires
    pub timeout_minutes: SeverityMinutes,

    /// Minutes between room-matching polls
    pub poll_interval_minutes: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_rooms: 3,
            num_patients: 50,
            arrival_interval_minutes: 15,
            start_time: SimTime::from_hm(8, 0),
            end_time: SimTime::from_hm(20, 0),
            triage_minutes: 5,
            treatment_minutes: SeverityMinutes {
                white: 10,
                yellow: 15,
                red: 30,
            },
            timeout_minutes: SeverityMinutes {
                white: 120,
                yellow: 60,
                red: 90,
            },
            poll_interval_minutes: 5,
        }
    }
}

// ============================================================================
// Errors and Results
// ============================================================================

/// Simulation error types
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SimulationError {
    /// Configuration validation error
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// An event referenced a patient the engine does not know
    #[error("patient not found: {0}")]
    PatientNotFound(PatientId),

    /// A patient-specific event was dispatched without a subject
    #[error("{0:?} event dispatched without a subject patient")]
    MissingSubject(EventKind),
}

/// What a single dispatch step processed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Simulated time of the dispatched event
    pub time: SimTime,

    /// Kind of the dispatched event
    pub kind: EventKind,

    /// Subject patient, if the event was patient-specific
    pub subject: Option<PatientId>,
}

// ============================================================================
// Simulator
// ============================================================================

/// Main engine owning the event queue and department state
///
/// The simulator owns everything mutable: the time-ordered event queue, the
/// waiting room, the room-availability counter, the triage rotation cursor,
/// and the outcome counters. Nothing outside the dispatch loop touches any
/// of it, so the whole run is one synchronous, reproducible pass.
pub struct Simulator {
    /// Validated configuration for the current run
    config: SimulationConfig,

    /// Patients, waiting room, rooms, outcome counters
    state: DepartmentState,

    /// Time-ordered queue of pending events
    queue: EventQueue,

    /// Severity the next triage will assign; rotates white -> yellow -> red
    next_severity: Severity,

    /// Audit log of everything that happened
    event_log: EventLog,
}

impl Simulator {
    /// Create a new simulator from a configuration
    ///
    /// Validates the configuration and seeds the initial events.
    ///
    /// # Arguments
    ///
    /// * `config` - complete simulation configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Simulator)` - ready to `run()`
    /// * `Err(SimulationError)` - configuration validation failed
    ///
    /// # Example
    ///
    /// ```rust
    /// use emergency_simulator_core_rs::{SimulationConfig, Simulator};
    ///
    /// let simulator = Simulator::new(SimulationConfig::default()).unwrap();
    /// assert_eq!(simulator.state().num_patients(), 50);
    /// ```
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        Self::validate_config(&config)?;

        let mut simulator = Self {
            state: DepartmentState::new(config.num_rooms),
            queue: EventQueue::new(),
            next_severity: Severity::White,
            event_log: EventLog::new(),
            config,
        };
        simulator.seed();
        Ok(simulator)
    }

    /// Re-initialize with a new configuration
    ///
    /// Discards all state of the previous run (patients, pending events,
    /// counters, the audit log, the triage cursor) and seeds a fresh run.
    /// The process does not need to restart between experiments.
    pub fn initialize(&mut self, config: SimulationConfig) -> Result<(), SimulationError> {
        Self::validate_config(&config)?;
        self.config = config;
        self.seed();
        Ok(())
    }

    /// Reset all state and push the initial events
    fn seed(&mut self) {
        self.state = DepartmentState::new(self.config.num_rooms);
        self.queue.clear();
        self.event_log.clear();
        self.next_severity = Severity::White;

        // One arrival per patient, evenly spaced from the start time
        let mut arrival_time = self.config.start_time;
        for id in 1..=self.config.num_patients {
            self.state.add_patient(Patient::new(id, arrival_time));
            self.queue.push(arrival_time, EventKind::Arrival, Some(id));
            arrival_time = arrival_time.plus_minutes(self.config.arrival_interval_minutes);
        }

        // The recurring room-matching poll
        self.queue.push(
            self.config
                .start_time
                .plus_minutes(self.config.poll_interval_minutes),
            EventKind::Poll,
            None,
        );
    }

    /// Validate configuration
    ///
    /// Fails fast on unusable values instead of clamping them. A room count
    /// of zero is accepted: it models a department where nobody is ever
    /// treated, which the timeout machinery handles on its own.
    fn validate_config(config: &SimulationConfig) -> Result<(), SimulationError> {
        if config.num_patients == 0 {
            return Err(SimulationError::InvalidConfig(
                "num_patients must be > 0".to_string(),
            ));
        }

        if config.arrival_interval_minutes == 0 {
            return Err(SimulationError::InvalidConfig(
                "arrival_interval_minutes must be > 0".to_string(),
            ));
        }

        if config.triage_minutes == 0 {
            return Err(SimulationError::InvalidConfig(
                "triage_minutes must be > 0".to_string(),
            ));
        }

        if !config.treatment_minutes.all_positive() {
            return Err(SimulationError::InvalidConfig(
                "treatment_minutes must be > 0 for every severity".to_string(),
            ));
        }

        if !config.timeout_minutes.all_positive() {
            return Err(SimulationError::InvalidConfig(
                "timeout_minutes must be > 0 for every severity".to_string(),
            ));
        }

        if config.poll_interval_minutes == 0 {
            return Err(SimulationError::InvalidConfig(
                "poll_interval_minutes must be > 0".to_string(),
            ));
        }

        if config.end_time <= config.start_time {
            return Err(SimulationError::InvalidConfig(
                "end_time must be after start_time".to_string(),
            ));
        }

        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The active configuration
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Reference to the department state
    pub fn state(&self) -> &DepartmentState {
        &self.state
    }

    /// Outcome counters (final after `run()` completes)
    pub fn outcomes(&self) -> OutcomeCounts {
        self.state.outcomes()
    }

    /// Number of events still waiting to fire
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Reference to the audit event log
    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    // ========================================================================
    // Dispatch Loop
    // ========================================================================

    /// Run the simulation to completion (queue exhaustion)
    ///
    /// # Returns
    ///
    /// The final outcome counters; their sum equals the patient count.
    ///
    /// # Example
    ///
    /// ```rust
    /// use emergency_simulator_core_rs::{SimulationConfig, Simulator};
    ///
    /// let mut simulator = Simulator::new(SimulationConfig::default()).unwrap();
    /// let outcomes = simulator.run().unwrap();
    /// assert_eq!(
    ///     outcomes.discharged + outcomes.abandoned + outcomes.deceased,
    ///     50,
    /// );
    /// ```
    pub fn run(&mut self) -> Result<OutcomeCounts, SimulationError> {
        while self.step()?.is_some() {}
        Ok(self.state.outcomes())
    }

    /// Pop and dispatch the earliest event
    ///
    /// Returns what was dispatched, or `Ok(None)` once the queue is empty.
    /// Front ends wanting event-by-event execution drive this directly;
    /// `run()` is just this in a loop.
    pub fn step(&mut self) -> Result<Option<StepResult>, SimulationError> {
        let event = match self.queue.pop_earliest() {
            Some(event) => event,
            None => return Ok(None),
        };

        match event.kind() {
            EventKind::Arrival => self.handle_arrival(&event)?,
            EventKind::TriageAssigned => self.handle_triage_assigned(&event)?,
            EventKind::CallToTreatment => self.handle_call_to_treatment(&event)?,
            EventKind::TreatmentDone => self.handle_treatment_done(&event)?,
            EventKind::WaitTimeout => self.handle_wait_timeout(&event)?,
            EventKind::Poll => self.handle_poll(&event),
        }

        Ok(Some(StepResult {
            time: event.time(),
            kind: event.kind(),
            subject: event.subject(),
        }))
    }

    // ========================================================================
    // Event Handlers
    // ========================================================================

    /// Arrival: the patient walks in; triage finishes after the triage
    /// duration
    fn handle_arrival(&mut self, event: &ScheduledEvent) -> Result<(), SimulationError> {
        let id = Self::subject_of(event)?;
        self.set_patient_state(id, PatientState::InTriage)?;

        self.event_log.log(Event::PatientArrived {
            time: event.time(),
            patient: id,
        });
        self.queue.push(
            event.time().plus_minutes(self.config.triage_minutes),
            EventKind::TriageAssigned,
            Some(id),
        );
        Ok(())
    }

    /// TriageAssigned: hand out the cursor severity, advance the rotation,
    /// admit the patient to the waiting room, and start their wait clock
    fn handle_triage_assigned(&mut self, event: &ScheduledEvent) -> Result<(), SimulationError> {
        let id = Self::subject_of(event)?;

        let severity = self.next_severity;
        self.next_severity = severity.next_in_rotation();

        self.set_patient_state(id, PatientState::Waiting(severity))?;
        self.state.waiting_room_mut().admit(id, severity);

        let timeout = self.config.timeout_minutes.get(severity);
        self.queue.push(
            event.time().plus_minutes(timeout),
            EventKind::WaitTimeout,
            Some(id),
        );
        self.event_log.log(Event::SeverityAssigned {
            time: event.time(),
            patient: id,
            severity,
        });
        Ok(())
    }

    /// CallToTreatment: late-bound subject; pick the most urgent waiting
    /// patient now, if there is one and a room is actually free
    fn handle_call_to_treatment(&mut self, event: &ScheduledEvent) -> Result<(), SimulationError> {
        // A call can be superseded between scheduling and firing (another
        // call took the last room); checking before popping keeps the room
        // counter within bounds.
        if self.state.free_rooms() == 0 {
            return Ok(());
        }

        let (id, severity) = match self.state.waiting_room_mut().call_next() {
            Some(called) => called,
            None => return Ok(()),
        };

        self.set_patient_state(id, PatientState::Treating(severity))?;
        self.state.occupy_room();

        let duration = self.config.treatment_minutes.get(severity);
        self.queue.push(
            event.time().plus_minutes(duration),
            EventKind::TreatmentDone,
            Some(id),
        );
        self.event_log.log(Event::TreatmentStarted {
            time: event.time(),
            patient: id,
            severity,
        });
        Ok(())
    }

    /// TreatmentDone: discharge the patient, free the room, and try to fill
    /// it again at this very instant
    fn handle_treatment_done(&mut self, event: &ScheduledEvent) -> Result<(), SimulationError> {
        let id = Self::subject_of(event)?;

        self.set_patient_state(id, PatientState::Out)?;
        self.state.record_discharge();
        self.state.release_room();

        self.event_log.log(Event::PatientDischarged {
            time: event.time(),
            patient: id,
        });
        self.queue
            .push(event.time(), EventKind::CallToTreatment, None);
        Ok(())
    }

    /// WaitTimeout: the patient waited too long. White gives up, yellow
    /// escalates to red, red dies; anything else means the timeout is stale
    fn handle_wait_timeout(&mut self, event: &ScheduledEvent) -> Result<(), SimulationError> {
        let id = Self::subject_of(event)?;
        let current = self.patient_state(id)?;

        match current {
            PatientState::Waiting(Severity::White) => {
                self.state.waiting_room_mut().remove(id);
                self.set_patient_state(id, PatientState::Out)?;
                self.state.record_abandonment();
                self.event_log.log(Event::PatientAbandoned {
                    time: event.time(),
                    patient: id,
                });
            }
            PatientState::Waiting(Severity::Yellow) => {
                // Escalation: out of the queue as yellow, straight back in
                // as red, with a fresh red-code wait clock
                self.state.waiting_room_mut().remove(id);
                self.set_patient_state(id, PatientState::Waiting(Severity::Red))?;
                self.state.waiting_room_mut().admit(id, Severity::Red);

                let timeout = self.config.timeout_minutes.get(Severity::Red);
                self.queue.push(
                    event.time().plus_minutes(timeout),
                    EventKind::WaitTimeout,
                    Some(id),
                );
                self.event_log.log(Event::SeverityEscalated {
                    time: event.time(),
                    patient: id,
                    from: Severity::Yellow,
                    to: Severity::Red,
                });
            }
            PatientState::Waiting(Severity::Red) => {
                self.state.waiting_room_mut().remove(id);
                self.set_patient_state(id, PatientState::Deceased)?;
                self.state.record_death();
                self.event_log.log(Event::PatientDeceased {
                    time: event.time(),
                    patient: id,
                });
            }
            state => {
                // Reachable: a patient called to treatment keeps their
                // pending timeout (the queue never cancels), so it fires
                // here and must not derail the run
                warn!(
                    "wait timeout at {} for patient {} in state {:?}; ignored",
                    event.time(),
                    id,
                    state
                );
                self.event_log.log(Event::StaleTimeout {
                    time: event.time(),
                    patient: id,
                    state,
                });
            }
        }
        Ok(())
    }

    /// Poll: if anyone is waiting and a room is free, schedule a call right
    /// now; keep polling until the end of the operating day
    fn handle_poll(&mut self, event: &ScheduledEvent) {
        if !self.state.waiting_room().is_empty() && self.state.free_rooms() > 0 {
            self.queue
                .push(event.time(), EventKind::CallToTreatment, None);
        }

        if event.time().is_before(self.config.end_time) {
            self.queue.push(
                event.time().plus_minutes(self.config.poll_interval_minutes),
                EventKind::Poll,
                None,
            );
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// The patient a patient-specific event concerns
    fn subject_of(event: &ScheduledEvent) -> Result<PatientId, SimulationError> {
        event
            .subject()
            .ok_or(SimulationError::MissingSubject(event.kind()))
    }

    /// Current state of a patient
    fn patient_state(&self, id: PatientId) -> Result<PatientState, SimulationError> {
        self.state
            .patient(id)
            .map(Patient::state)
            .ok_or(SimulationError::PatientNotFound(id))
    }

    /// Move a patient to a new state
    fn set_patient_state(
        &mut self,
        id: PatientId,
        state: PatientState,
    ) -> Result<(), SimulationError> {
        self.state
            .patient_mut(id)
            .ok_or(SimulationError::PatientNotFound(id))?
            .set_state(state);
        Ok(())
    }
}
