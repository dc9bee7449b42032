//! Tests for the time-ordered event queue
//!
//! The queue is the backbone of the dispatch loop: events must pop in
//! non-decreasing time order, and same-time events must pop in the order
//! they were scheduled, on every run.

use emergency_simulator_core_rs::{EventKind, EventQueue, SimTime};

#[test]
fn test_pop_earliest_on_empty_queue_is_none() {
    let mut queue = EventQueue::new();
    assert!(queue.is_empty());
    assert!(queue.pop_earliest().is_none());
}

#[test]
fn test_pops_in_nondecreasing_time_order() {
    let mut queue = EventQueue::new();

    // Push times deliberately scrambled
    for minutes in [95u32, 10, 300, 10, 45, 480, 45, 45, 0] {
        queue.push(SimTime::from_minutes(minutes), EventKind::Poll, None);
    }

    let mut last = SimTime::MIDNIGHT;
    let mut popped = 0;
    while let Some(event) = queue.pop_earliest() {
        assert!(
            event.time() >= last,
            "queue popped {} after {}",
            event.time(),
            last
        );
        last = event.time();
        popped += 1;
    }
    assert_eq!(popped, 9);
}

#[test]
fn test_ties_break_by_insertion_sequence() {
    let mut queue = EventQueue::new();
    let t = SimTime::from_hm(12, 0);

    queue.push(t, EventKind::TreatmentDone, Some(3));
    queue.push(t, EventKind::CallToTreatment, None);
    queue.push(t, EventKind::WaitTimeout, Some(1));

    let kinds: Vec<EventKind> = std::iter::from_fn(|| queue.pop_earliest())
        .map(|e| e.kind())
        .collect();

    assert_eq!(
        kinds,
        vec![
            EventKind::TreatmentDone,
            EventKind::CallToTreatment,
            EventKind::WaitTimeout,
        ]
    );
}

#[test]
fn test_subjects_survive_the_queue() {
    let mut queue = EventQueue::new();
    queue.push(SimTime::from_hm(8, 0), EventKind::Arrival, Some(42));
    queue.push(SimTime::from_hm(8, 5), EventKind::Poll, None);

    let first = queue.pop_earliest().unwrap();
    assert_eq!(first.kind(), EventKind::Arrival);
    assert_eq!(first.subject(), Some(42));

    let second = queue.pop_earliest().unwrap();
    assert_eq!(second.kind(), EventKind::Poll);
    assert_eq!(second.subject(), None);
}

#[test]
fn test_push_while_draining() {
    // Handlers push new events mid-run; ordering must hold across the mix
    let mut queue = EventQueue::new();
    queue.push(SimTime::from_hm(8, 0), EventKind::Arrival, Some(1));
    queue.push(SimTime::from_hm(8, 10), EventKind::Poll, None);

    let arrival = queue.pop_earliest().unwrap();
    assert_eq!(arrival.kind(), EventKind::Arrival);

    // Simulates the arrival handler scheduling triage before the poll
    queue.push(SimTime::from_hm(8, 5), EventKind::TriageAssigned, Some(1));

    assert_eq!(
        queue.pop_earliest().map(|e| e.kind()),
        Some(EventKind::TriageAssigned)
    );
    assert_eq!(queue.pop_earliest().map(|e| e.kind()), Some(EventKind::Poll));
    assert!(queue.is_empty());
}

#[test]
fn test_two_identical_fills_drain_identically() {
    let script = [
        (SimTime::from_hm(9, 0), EventKind::Poll),
        (SimTime::from_hm(8, 0), EventKind::Arrival),
        (SimTime::from_hm(9, 0), EventKind::CallToTreatment),
        (SimTime::from_hm(8, 0), EventKind::WaitTimeout),
    ];

    let drain = |queue: &mut EventQueue| {
        let mut order = Vec::new();
        while let Some(event) = queue.pop_earliest() {
            order.push((event.time(), event.kind()));
        }
        order
    };

    let mut first = EventQueue::new();
    let mut second = EventQueue::new();
    for (time, kind) in script {
        first.push(time, kind, None);
        second.push(time, kind, None);
    }

    assert_eq!(drain(&mut first), drain(&mut second));
}
