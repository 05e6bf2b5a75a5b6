//! Reservation records and the ledger that exclusively owns them.
//!
//! The ledger is the only shared mutable state in the system. A single
//! mutex serializes every mutation, so the check-then-insert sequence in
//! [`ReservationLedger::create`] and the conflict re-check in
//! [`ReservationLedger::confirm`] are each atomic with respect to all
//! other ledger mutations.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::availability::ProviderId;
use crate::error::{Result, ScheduleError};

/// Identifier assigned to a reservation on insertion.
pub type ReservationId = u64;

/// A client reservation against one derived slot.
///
/// Created unconfirmed; either confirmed via [`ReservationLedger::confirm`]
/// (terminal) or deleted by cleanup once older than the grace period while
/// still unconfirmed. A confirmed reservation is never cleaned up.
/// `created_at` is set once, from the caller-supplied clock, and never
/// mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub provider_id: ProviderId,
    pub client_name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub confirmed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
struct LedgerInner {
    next_id: ReservationId,
    reservations: BTreeMap<ReservationId, Reservation>,
}

impl Default for LedgerInner {
    fn default() -> Self {
        Self {
            next_id: 1,
            reservations: BTreeMap::new(),
        }
    }
}

/// Owner of all reservation records, with serialized mutation.
#[derive(Debug, Default)]
pub struct ReservationLedger {
    inner: Mutex<LedgerInner>,
}

impl ReservationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit a new reservation request.
    ///
    /// Checks run in order: interval validity, lead time, then -- under
    /// the ledger lock -- a confirmed-conflict scan followed by the
    /// insert. Two pending (unconfirmed) reservations for the same slot
    /// are both admitted; only an already-confirmed slot blocks creation.
    ///
    /// # Errors
    /// - `InvalidInterval` if `start >= end`.
    /// - `LeadTimeViolation` if `start < now + min_lead_time`.
    /// - `SlotTaken` if a confirmed reservation exists for the same
    ///   `(provider_id, start)`.
    pub fn create(
        &self,
        provider_id: ProviderId,
        client_name: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        now: DateTime<Utc>,
        min_lead_time: Duration,
    ) -> Result<ReservationId> {
        if start >= end {
            return Err(ScheduleError::InvalidInterval { start, end });
        }
        let earliest = now + min_lead_time;
        if start < earliest {
            return Err(ScheduleError::LeadTimeViolation { start, earliest });
        }

        let mut inner = self.lock()?;
        if Self::confirmed_conflict(&inner, provider_id, start, None) {
            return Err(ScheduleError::SlotTaken { provider_id, start });
        }
        let id = inner.next_id;
        inner.next_id += 1;
        inner.reservations.insert(
            id,
            Reservation {
                id,
                provider_id,
                client_name: client_name.to_string(),
                start,
                end,
                confirmed: false,
                created_at: now,
            },
        );
        tracing::debug!(reservation_id = id, provider_id, %start, "reservation admitted (unconfirmed)");
        Ok(id)
    }

    /// Confirm a pending reservation. Terminal: no further transitions.
    ///
    /// Re-checks for a confirmed conflict on the same `(provider_id,
    /// start)` under the lock, so a slot can end up with at most one
    /// confirmed reservation under any interleaving. Confirming an
    /// already-confirmed id is a no-op success.
    ///
    /// # Errors
    /// - `NotFound` if the id does not exist.
    /// - `SlotTaken` if a different reservation on the same slot is
    ///   already confirmed; the pending reservation is left untouched.
    pub fn confirm(&self, id: ReservationId) -> Result<()> {
        let mut inner = self.lock()?;
        let (provider_id, start, already_confirmed) = match inner.reservations.get(&id) {
            None => return Err(ScheduleError::NotFound(id)),
            Some(r) => (r.provider_id, r.start, r.confirmed),
        };
        if already_confirmed {
            return Ok(());
        }
        if Self::confirmed_conflict(&inner, provider_id, start, Some(id)) {
            return Err(ScheduleError::SlotTaken { provider_id, start });
        }
        if let Some(r) = inner.reservations.get_mut(&id) {
            r.confirmed = true;
        }
        tracing::info!(reservation_id = id, provider_id, %start, "reservation confirmed");
        Ok(())
    }

    /// Delete every unconfirmed reservation with `created_at < now - grace`.
    ///
    /// Returns the number removed. Confirmed reservations survive
    /// regardless of age; a reservation created exactly at the cutoff
    /// also survives (strict `<`).
    pub fn expire_older_than(&self, now: DateTime<Utc>, grace: Duration) -> Result<usize> {
        let cutoff = now - grace;
        let mut inner = self.lock()?;
        let before = inner.reservations.len();
        inner
            .reservations
            .retain(|_, r| r.confirmed || r.created_at >= cutoff);
        let removed = before - inner.reservations.len();
        if removed > 0 {
            tracing::info!(removed, %cutoff, "expired unconfirmed reservations");
        }
        Ok(removed)
    }

    /// Point lookup by id.
    pub fn get(&self, id: ReservationId) -> Result<Option<Reservation>> {
        let inner = self.lock()?;
        Ok(inner.reservations.get(&id).cloned())
    }

    /// All reservations for `provider_id`, ordered by id.
    pub fn reservations_for(&self, provider_id: ProviderId) -> Result<Vec<Reservation>> {
        let inner = self.lock()?;
        Ok(inner
            .reservations
            .values()
            .filter(|r| r.provider_id == provider_id)
            .cloned()
            .collect())
    }

    /// Start times of confirmed reservations for `provider_id`.
    pub fn confirmed_starts(&self, provider_id: ProviderId) -> Result<Vec<DateTime<Utc>>> {
        let inner = self.lock()?;
        Ok(inner
            .reservations
            .values()
            .filter(|r| r.confirmed && r.provider_id == provider_id)
            .map(|r| r.start)
            .collect())
    }

    /// Clone the full ledger contents for a snapshot.
    pub(crate) fn to_parts(&self) -> Result<(Vec<Reservation>, ReservationId)> {
        let inner = self.lock()?;
        Ok((inner.reservations.values().cloned().collect(), inner.next_id))
    }

    /// Rebuild a ledger from snapshot contents.
    pub(crate) fn from_parts(reservations: Vec<Reservation>, next_id: ReservationId) -> Self {
        let reservations = reservations.into_iter().map(|r| (r.id, r)).collect();
        Self {
            inner: Mutex::new(LedgerInner {
                next_id,
                reservations,
            }),
        }
    }

    /// True when a confirmed reservation other than `exclude` occupies
    /// `(provider_id, start)`. Caller holds the lock.
    fn confirmed_conflict(
        inner: &LedgerInner,
        provider_id: ProviderId,
        start: DateTime<Utc>,
        exclude: Option<ReservationId>,
    ) -> bool {
        inner
            .reservations
            .values()
            .any(|r| r.confirmed && r.provider_id == provider_id && r.start == start && Some(r.id) != exclude)
    }

    fn lock(&self) -> Result<MutexGuard<'_, LedgerInner>> {
        self.inner
            .lock()
            .map_err(|_| ScheduleError::Storage("reservation ledger lock poisoned".to_string()))
    }
}
