//! Tests for slot slicing and the half-open overlap predicate.

use chrono::{DateTime, Duration, TimeZone, Utc};
use slotbook_engine::slots::{overlaps, slice};

/// Helper to build a UTC instant on 2026-03-02.
fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, hour, min, 0).unwrap()
}

#[test]
fn forty_minute_window_yields_two_slots() {
    // Window: [09:00, 09:40) with 15-minute slots.
    // Expected: [09:00,09:15), [09:15,09:30); the trailing 10 minutes drop.
    let slots: Vec<_> = slice(at(9, 0), at(9, 40), Duration::minutes(15)).collect();

    assert_eq!(slots.len(), 2, "trailing remainder must be dropped");
    assert_eq!(slots[0].start, at(9, 0));
    assert_eq!(slots[0].end, at(9, 15));
    assert_eq!(slots[1].start, at(9, 15));
    assert_eq!(slots[1].end, at(9, 30));
}

#[test]
fn slot_ending_exactly_on_boundary_is_included() {
    // Window: [09:00, 10:00) -- exactly 4 slots, the last ending at 10:00.
    let slots: Vec<_> = slice(at(9, 0), at(10, 0), Duration::minutes(15)).collect();

    assert_eq!(slots.len(), 4);
    assert_eq!(slots[3].start, at(9, 45));
    assert_eq!(slots[3].end, at(10, 0));
}

#[test]
fn window_shorter_than_duration_yields_nothing() {
    let slots: Vec<_> = slice(at(9, 0), at(9, 10), Duration::minutes(15)).collect();
    assert!(slots.is_empty());
}

#[test]
fn empty_window_yields_nothing() {
    let slots: Vec<_> = slice(at(9, 0), at(9, 0), Duration::minutes(15)).collect();
    assert!(slots.is_empty());
}

#[test]
fn inverted_window_yields_nothing() {
    let slots: Vec<_> = slice(at(10, 0), at(9, 0), Duration::minutes(15)).collect();
    assert!(slots.is_empty());
}

#[test]
fn non_positive_duration_yields_nothing() {
    let zero: Vec<_> = slice(at(9, 0), at(17, 0), Duration::zero()).collect();
    assert!(zero.is_empty(), "zero duration must not loop");

    let negative: Vec<_> = slice(at(9, 0), at(17, 0), Duration::minutes(-15)).collect();
    assert!(negative.is_empty(), "negative duration must not loop");
}

#[test]
fn slots_are_contiguous_and_fixed_size() {
    let duration = Duration::minutes(15);
    let slots: Vec<_> = slice(at(8, 0), at(12, 7), duration).collect();

    assert_eq!(slots.len(), 16); // floor(247 / 15)
    assert_eq!(slots[0].start, at(8, 0));
    for pair in slots.windows(2) {
        assert_eq!(pair[0].end, pair[1].start, "slots must be contiguous");
    }
    for slot in &slots {
        assert_eq!(slot.end - slot.start, duration);
    }
}

#[test]
fn slicing_is_restartable() {
    // Pure function of its inputs: a second invocation yields the same
    // sequence, and so does collecting the same iterator value twice.
    let first: Vec<_> = slice(at(9, 0), at(11, 0), Duration::minutes(15)).collect();
    let second: Vec<_> = slice(at(9, 0), at(11, 0), Duration::minutes(15)).collect();
    assert_eq!(first, second);

    let iter = slice(at(9, 0), at(11, 0), Duration::minutes(15));
    let from_clone: Vec<_> = iter.clone().collect();
    let from_original: Vec<_> = iter.collect();
    assert_eq!(from_clone, from_original);
}

#[test]
fn overlapping_intervals_detected() {
    assert!(overlaps((at(9, 0), at(10, 0)), (at(9, 30), at(10, 30))));
    assert!(overlaps((at(9, 30), at(10, 30)), (at(9, 0), at(10, 0))));
    // Containment is overlap.
    assert!(overlaps((at(9, 0), at(12, 0)), (at(10, 0), at(11, 0))));
}

#[test]
fn adjacent_intervals_do_not_overlap() {
    // [09:00,10:00) and [10:00,11:00) share only the boundary instant.
    assert!(!overlaps((at(9, 0), at(10, 0)), (at(10, 0), at(11, 0))));
    assert!(!overlaps((at(10, 0), at(11, 0)), (at(9, 0), at(10, 0))));
}

#[test]
fn disjoint_intervals_do_not_overlap() {
    assert!(!overlaps((at(9, 0), at(10, 0)), (at(11, 0), at(12, 0))));
}
