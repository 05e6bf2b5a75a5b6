//! Serialized engine state for the durable-store boundary.
//!
//! The snapshot is what a durable store must persist between runs:
//! availability windows and reservations keyed by their auto-incrementing
//! identifiers, plus the id counters so restored state keeps allocating
//! unique ids. Timestamps serialize as RFC 3339 strings.

use serde::{Deserialize, Serialize};

use crate::availability::{AvailabilityBook, AvailabilityWindow, WindowId};
use crate::engine::{Policy, Scheduler};
use crate::error::Result;
use crate::ledger::{Reservation, ReservationId, ReservationLedger};

/// Full engine state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub windows: Vec<AvailabilityWindow>,
    pub next_window_id: WindowId,
    pub reservations: Vec<Reservation>,
    pub next_reservation_id: ReservationId,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            windows: Vec::new(),
            next_window_id: 1,
            reservations: Vec::new(),
            next_reservation_id: 1,
        }
    }
}

impl Scheduler {
    /// Clone the current engine state under the stores' locks.
    pub fn snapshot(&self) -> Result<Snapshot> {
        let (windows, next_window_id) = self.availability.to_parts()?;
        let (reservations, next_reservation_id) = self.ledger.to_parts()?;
        Ok(Snapshot {
            windows,
            next_window_id,
            reservations,
            next_reservation_id,
        })
    }

    /// Rebuild a scheduler from persisted state.
    ///
    /// The policy is supplied by the caller; it is configuration, not
    /// state, and `chrono::Duration` carries no serde representation.
    pub fn from_snapshot(snapshot: Snapshot, policy: Policy) -> Self {
        Self {
            availability: AvailabilityBook::from_parts(snapshot.windows, snapshot.next_window_id),
            ledger: ReservationLedger::from_parts(
                snapshot.reservations,
                snapshot.next_reservation_id,
            ),
            policy,
        }
    }
}
