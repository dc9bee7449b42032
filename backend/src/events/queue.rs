//! Time-ordered event queue
//!
//! A min-priority structure over scheduled events: `push` is O(log n),
//! `pop_earliest` returns and removes the minimum-time event, and an empty
//! pop is the run's termination condition.
//!
//! The queue stamps each pushed event with a monotonically increasing
//! sequence number, so same-time events always pop in the order they were
//! scheduled. Cancellation is deliberately unsupported: a superseded event
//! (say, a timeout for a patient already called to treatment) still fires,
//! and the receiving handler checks current state before acting.

use crate::core::time::SimTime;
use crate::events::types::{EventKind, ScheduledEvent};
use crate::models::patient::PatientId;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Min-heap of scheduled events, earliest first
///
/// # Example
/// ```
/// use emergency_simulator_core_rs::{EventKind, EventQueue, SimTime};
///
/// let mut queue = EventQueue::new();
/// queue.push(SimTime::from_hm(8, 15), EventKind::Arrival, Some(2));
/// queue.push(SimTime::from_hm(8, 0), EventKind::Arrival, Some(1));
///
/// let first = queue.pop_earliest().unwrap();
/// assert_eq!(first.time(), SimTime::from_hm(8, 0));
/// assert_eq!(first.subject(), Some(1));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Reverse<ScheduledEvent>>,
    next_seq: u64,
}

impl EventQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an event
    pub fn push(&mut self, time: SimTime, kind: EventKind, subject: Option<PatientId>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap
            .push(Reverse(ScheduledEvent::new(time, seq, kind, subject)));
    }

    /// Remove and return the earliest event, or `None` once drained
    pub fn pop_earliest(&mut self) -> Option<ScheduledEvent> {
        self.heap.pop().map(|Reverse(event)| event)
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// True if no events remain
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop all pending events and restart the sequence numbering
    pub fn clear(&mut self) {
        self.heap.clear();
        self.next_seq = 0;
    }
}
