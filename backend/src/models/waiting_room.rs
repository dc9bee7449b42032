//! Waiting room ordered by triage severity
//!
//! Red-code patients are called before yellow, yellow before white; within a
//! severity, admission order decides.
//!
//! # Problem
//!
//! Timeout handling removes a *specific* patient from the middle of the
//! structure, so extract-min alone is not enough: a plain binary heap would
//! need an O(n) scan (or lazy deletion) for removal-by-identity.
//!
//! # Solution
//!
//! Keep an ordered set of admission tickets keyed by
//! (severity descending, admission sequence ascending) next to a
//! patient-id index. Admit, call-next, and remove-by-identity are all
//! O(log n), and iteration order is fully deterministic.

use crate::models::patient::{PatientId, Severity};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

/// Ordering key for one waiting patient.
///
/// Smallest key = called first: highest severity, then earliest admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WaitingTicket {
    severity: Severity,
    admitted_seq: u64,
    patient: PatientId,
}

impl Ord for WaitingTicket {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .severity
            .cmp(&self.severity)
            .then(self.admitted_seq.cmp(&other.admitted_seq))
            .then(self.patient.cmp(&other.patient))
    }
}

impl PartialOrd for WaitingTicket {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Severity-ordered waiting room with O(log n) removal-by-identity
///
/// Contains exactly the patients currently in a waiting state, each once.
///
/// # Example
/// ```
/// use emergency_simulator_core_rs::{Severity, WaitingRoom};
///
/// let mut room = WaitingRoom::new();
/// room.admit(1, Severity::White);
/// room.admit(2, Severity::Red);
/// assert_eq!(room.call_next(), Some((2, Severity::Red)));
/// assert_eq!(room.call_next(), Some((1, Severity::White)));
/// assert_eq!(room.call_next(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WaitingRoom {
    /// Tickets in call order
    order: BTreeSet<WaitingTicket>,

    /// Patient id → that patient's ticket, for removal-by-identity
    by_patient: HashMap<PatientId, WaitingTicket>,

    /// Admissions so far; seeds each ticket's sequence number
    admissions: u64,
}

impl WaitingRoom {
    /// Create an empty waiting room
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit a patient under the given severity code
    ///
    /// # Panics
    /// Panics if the patient is already in the room (each waiting patient
    /// appears exactly once).
    pub fn admit(&mut self, patient: PatientId, severity: Severity) {
        assert!(
            !self.by_patient.contains_key(&patient),
            "patient {} is already in the waiting room",
            patient
        );
        let ticket = WaitingTicket {
            severity,
            admitted_seq: self.admissions,
            patient,
        };
        self.admissions += 1;
        self.order.insert(ticket);
        self.by_patient.insert(patient, ticket);
    }

    /// Remove and return the next patient to call: highest severity present,
    /// earliest admitted among those
    ///
    /// Returns the severity the patient waited under, or `None` if the room
    /// is empty.
    pub fn call_next(&mut self) -> Option<(PatientId, Severity)> {
        let ticket = *self.order.iter().next()?;
        self.order.remove(&ticket);
        self.by_patient.remove(&ticket.patient);
        Some((ticket.patient, ticket.severity))
    }

    /// Remove a specific patient (timeout handling)
    ///
    /// Returns the severity they waited under, or `None` if the patient was
    /// not in the room.
    pub fn remove(&mut self, patient: PatientId) -> Option<Severity> {
        let ticket = self.by_patient.remove(&patient)?;
        self.order.remove(&ticket);
        Some(ticket.severity)
    }

    /// True if the patient is currently waiting
    pub fn contains(&self, patient: PatientId) -> bool {
        self.by_patient.contains_key(&patient)
    }

    /// Number of waiting patients
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True if nobody is waiting
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Empty the room and restart the admission sequence
    pub fn clear(&mut self) {
        self.order.clear();
        self.by_patient.clear();
        self.admissions = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_room_is_empty() {
        let room = WaitingRoom::new();
        assert!(room.is_empty());
        assert_eq!(room.len(), 0);
        assert!(!room.contains(1));
    }

    #[test]
    fn test_higher_severity_called_first() {
        let mut room = WaitingRoom::new();
        room.admit(1, Severity::White);
        room.admit(2, Severity::Yellow);
        room.admit(3, Severity::Red);

        assert_eq!(room.call_next(), Some((3, Severity::Red)));
        assert_eq!(room.call_next(), Some((2, Severity::Yellow)));
        assert_eq!(room.call_next(), Some((1, Severity::White)));
        assert_eq!(room.call_next(), None);
    }

    #[test]
    fn test_admission_order_within_severity() {
        let mut room = WaitingRoom::new();
        room.admit(5, Severity::Yellow);
        room.admit(2, Severity::Yellow);
        room.admit(9, Severity::Yellow);

        assert_eq!(room.call_next(), Some((5, Severity::Yellow)));
        assert_eq!(room.call_next(), Some((2, Severity::Yellow)));
        assert_eq!(room.call_next(), Some((9, Severity::Yellow)));
    }

    #[test]
    fn test_remove_by_identity() {
        let mut room = WaitingRoom::new();
        room.admit(1, Severity::White);
        room.admit(2, Severity::Yellow);
        room.admit(3, Severity::White);

        assert_eq!(room.remove(1), Some(Severity::White));
        assert!(!room.contains(1));
        assert_eq!(room.len(), 2);

        // Removing an absent patient is a no-op
        assert_eq!(room.remove(1), None);

        assert_eq!(room.call_next(), Some((2, Severity::Yellow)));
        assert_eq!(room.call_next(), Some((3, Severity::White)));
    }

    #[test]
    fn test_escalated_patient_reenters_behind_existing_reds() {
        let mut room = WaitingRoom::new();
        room.admit(1, Severity::Red);
        room.admit(2, Severity::Yellow);

        // Yellow timeout: patient 2 leaves and comes back as red
        assert_eq!(room.remove(2), Some(Severity::Yellow));
        room.admit(2, Severity::Red);

        assert_eq!(room.call_next(), Some((1, Severity::Red)));
        assert_eq!(room.call_next(), Some((2, Severity::Red)));
    }

    #[test]
    #[should_panic(expected = "already in the waiting room")]
    fn test_double_admission_panics() {
        let mut room = WaitingRoom::new();
        room.admit(1, Severity::White);
        room.admit(1, Severity::Red);
    }

    #[test]
    fn test_clear_resets_admission_sequence() {
        let mut room = WaitingRoom::new();
        room.admit(1, Severity::White);
        room.clear();
        assert!(room.is_empty());

        // Call order after clear matches a fresh room exactly
        room.admit(2, Severity::White);
        room.admit(3, Severity::White);
        assert_eq!(room.call_next(), Some((2, Severity::White)));
    }
}
