//! Slot slicing and interval comparison -- pure time-window math.
//!
//! Slices availability windows into fixed-duration bookable slots and
//! provides the half-open overlap predicate used by conflict reasoning.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A fixed-duration bookable slot derived from an availability window.
///
/// Slots are never persisted -- they are recomputed from the declared
/// windows on every query, so they always reflect current availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Lazy iterator over the slots of a window, produced by [`slice`].
#[derive(Debug, Clone)]
pub struct Slots {
    cursor: DateTime<Utc>,
    end: DateTime<Utc>,
    duration: Duration,
}

impl Iterator for Slots {
    type Item = Slot;

    fn next(&mut self) -> Option<Slot> {
        if self.duration <= Duration::zero() {
            return None;
        }
        let slot_end = self.cursor + self.duration;
        // Strict <=: a slot ending exactly on the window boundary is
        // included; a trailing remainder shorter than `duration` is dropped.
        if slot_end > self.end {
            return None;
        }
        let slot = Slot {
            start: self.cursor,
            end: slot_end,
        };
        self.cursor = slot_end;
        Some(slot)
    }
}

/// Slice the half-open window `[start, end)` into consecutive
/// `duration`-sized slots.
///
/// The cursor begins at `start` and advances by `duration` while
/// `cursor + duration <= end`. The sequence is finite and restartable:
/// calling `slice` again with the same arguments yields an identical
/// sequence. A non-positive `duration` yields no slots.
pub fn slice(start: DateTime<Utc>, end: DateTime<Utc>, duration: Duration) -> Slots {
    Slots {
        cursor: start,
        end,
        duration,
    }
}

/// Half-open interval intersection test.
///
/// `[a.0, a.1)` and `[b.0, b.1)` overlap iff `a.0 < b.1 && b.0 < a.1`.
/// Adjacent intervals, where one ends exactly when the other starts, do
/// NOT overlap.
pub fn overlaps(a: (DateTime<Utc>, DateTime<Utc>), b: (DateTime<Utc>, DateTime<Utc>)) -> bool {
    a.0 < b.1 && b.0 < a.1
}
