//! Department State
//!
//! Represents the complete state of the emergency department during a run:
//! the patient table, the waiting room, the treatment-room counter, and the
//! outcome counters.
//!
//! # Critical Invariants
//!
//! 1. **Room Bounds**: `free_rooms` stays within [0, total_rooms]
//! 2. **Patient Uniqueness**: patient ids are sequential and appear exactly once
//! 3. **Waiting-Room Membership**: a patient is in the waiting room iff their
//!    state is `Waiting(_)`
//! 4. **Outcome Conservation**: each terminal transition bumps exactly one
//!    counter exactly once, so counters sum to the number of resolved patients

use crate::models::patient::{Patient, PatientId, PatientState};
use crate::models::waiting_room::WaitingRoom;
use serde::{Deserialize, Serialize};

/// Aggregate run outcomes
///
/// After a full run the three counters sum to the configured patient count.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
pub struct OutcomeCounts {
    /// Patients who completed treatment
    pub discharged: u32,

    /// White-code patients who gave up waiting
    pub abandoned: u32,

    /// Red-code patients who died waiting
    pub deceased: u32,
}

impl OutcomeCounts {
    /// Total resolved patients across all three outcomes
    pub fn total(&self) -> u32 {
        self.discharged + self.abandoned + self.deceased
    }
}

/// Complete department state
///
/// # Example
///
/// ```rust
/// use emergency_simulator_core_rs::{DepartmentState, Patient, SimTime};
///
/// let mut state = DepartmentState::new(3);
/// state.add_patient(Patient::new(1, SimTime::from_hm(8, 0)));
/// assert_eq!(state.num_patients(), 1);
/// assert_eq!(state.free_rooms(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DepartmentState {
    /// All patients, indexed by id - 1 (ids are sequential and 1-based)
    patients: Vec<Patient>,

    /// Patients currently in a waiting state, ordered by severity
    waiting_room: WaitingRoom,

    /// Configured number of treatment rooms
    total_rooms: u32,

    /// Treatment rooms currently unoccupied
    free_rooms: u32,

    /// Run outcome counters
    outcomes: OutcomeCounts,
}

impl DepartmentState {
    /// Create a fresh state with all rooms free and no patients
    pub fn new(total_rooms: u32) -> Self {
        Self {
            patients: Vec::new(),
            waiting_room: WaitingRoom::new(),
            total_rooms,
            free_rooms: total_rooms,
            outcomes: OutcomeCounts::default(),
        }
    }

    /// Add a patient to the table
    ///
    /// # Panics
    /// Panics if the patient's id is not the next sequential id.
    pub fn add_patient(&mut self, patient: Patient) {
        assert_eq!(
            patient.id() as usize,
            self.patients.len() + 1,
            "patient ids must be assigned sequentially"
        );
        self.patients.push(patient);
    }

    /// Get a patient by id
    pub fn patient(&self, id: PatientId) -> Option<&Patient> {
        let index = (id as usize).checked_sub(1)?;
        self.patients.get(index)
    }

    /// Get a patient by id, mutably
    pub fn patient_mut(&mut self, id: PatientId) -> Option<&mut Patient> {
        let index = (id as usize).checked_sub(1)?;
        self.patients.get_mut(index)
    }

    /// All patients, in id order
    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    /// Number of patients in the system
    pub fn num_patients(&self) -> usize {
        self.patients.len()
    }

    /// Number of patients currently in the `Treating` state
    pub fn num_treating(&self) -> usize {
        self.patients
            .iter()
            .filter(|p| matches!(p.state(), PatientState::Treating(_)))
            .count()
    }

    /// The waiting room
    pub fn waiting_room(&self) -> &WaitingRoom {
        &self.waiting_room
    }

    /// The waiting room, mutably
    pub fn waiting_room_mut(&mut self) -> &mut WaitingRoom {
        &mut self.waiting_room
    }

    /// Configured number of treatment rooms
    pub fn total_rooms(&self) -> u32 {
        self.total_rooms
    }

    /// Treatment rooms currently unoccupied
    pub fn free_rooms(&self) -> u32 {
        self.free_rooms
    }

    /// Mark one room occupied (a treatment begins)
    ///
    /// # Panics
    /// Panics if no room is free; callers check availability first.
    pub fn occupy_room(&mut self) {
        assert!(self.free_rooms > 0, "no free treatment room to occupy");
        self.free_rooms -= 1;
    }

    /// Mark one room free again (a treatment ends)
    ///
    /// # Panics
    /// Panics if all rooms are already free.
    pub fn release_room(&mut self) {
        assert!(
            self.free_rooms < self.total_rooms,
            "all treatment rooms are already free"
        );
        self.free_rooms += 1;
    }

    /// Run outcome counters
    pub fn outcomes(&self) -> OutcomeCounts {
        self.outcomes
    }

    /// Count one discharge
    pub fn record_discharge(&mut self) {
        self.outcomes.discharged += 1;
    }

    /// Count one abandonment
    pub fn record_abandonment(&mut self) {
        self.outcomes.abandoned += 1;
    }

    /// Count one death
    pub fn record_death(&mut self) {
        self.outcomes.deceased += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::SimTime;
    use crate::models::patient::Severity;

    #[test]
    fn test_new_state() {
        let state = DepartmentState::new(3);
        assert_eq!(state.num_patients(), 0);
        assert_eq!(state.total_rooms(), 3);
        assert_eq!(state.free_rooms(), 3);
        assert_eq!(state.outcomes(), OutcomeCounts::default());
        assert!(state.waiting_room().is_empty());
    }

    #[test]
    fn test_patient_lookup_by_id() {
        let mut state = DepartmentState::new(1);
        state.add_patient(Patient::new(1, SimTime::from_hm(8, 0)));
        state.add_patient(Patient::new(2, SimTime::from_hm(8, 15)));

        assert_eq!(state.patient(1).map(Patient::id), Some(1));
        assert_eq!(state.patient(2).map(Patient::id), Some(2));
        assert!(state.patient(0).is_none());
        assert!(state.patient(3).is_none());
    }

    #[test]
    #[should_panic(expected = "sequentially")]
    fn test_out_of_order_patient_id_panics() {
        let mut state = DepartmentState::new(1);
        state.add_patient(Patient::new(2, SimTime::from_hm(8, 0)));
    }

    #[test]
    fn test_room_counter_round_trip() {
        let mut state = DepartmentState::new(2);
        state.occupy_room();
        state.occupy_room();
        assert_eq!(state.free_rooms(), 0);
        state.release_room();
        assert_eq!(state.free_rooms(), 1);
    }

    #[test]
    #[should_panic(expected = "no free treatment room")]
    fn test_occupy_without_free_room_panics() {
        let mut state = DepartmentState::new(0);
        state.occupy_room();
    }

    #[test]
    #[should_panic(expected = "already free")]
    fn test_release_beyond_total_panics() {
        let mut state = DepartmentState::new(1);
        state.release_room();
    }

    #[test]
    fn test_num_treating() {
        let mut state = DepartmentState::new(2);
        state.add_patient(Patient::new(1, SimTime::from_hm(8, 0)));
        state.add_patient(Patient::new(2, SimTime::from_hm(8, 15)));
        assert_eq!(state.num_treating(), 0);

        state
            .patient_mut(1)
            .unwrap()
            .set_state(PatientState::Treating(Severity::Red));
        assert_eq!(state.num_treating(), 1);
    }

    #[test]
    fn test_outcome_counters() {
        let mut state = DepartmentState::new(1);
        state.record_discharge();
        state.record_discharge();
        state.record_abandonment();
        state.record_death();

        let outcomes = state.outcomes();
        assert_eq!(outcomes.discharged, 2);
        assert_eq!(outcomes.abandoned, 1);
        assert_eq!(outcomes.deceased, 1);
        assert_eq!(outcomes.total(), 4);
    }
}
