//! Orchestration -- derives bookable slots from availability and drives
//! the reservation lifecycle against the ledger.
//!
//! The scheduler owns the availability book and the reservation ledger;
//! callers never touch either store directly. Errors from the stores pass
//! through unchanged.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::availability::{AvailabilityBook, AvailabilityWindow, ProviderId, WindowId};
use crate::error::Result;
use crate::ledger::{Reservation, ReservationId, ReservationLedger};
use crate::slots::{self, Slot};

/// Scheduling policy constants. [`Policy::default`] is the shipped
/// configuration: 15-minute slots, 24-hour lead time, 30-minute grace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    /// Fixed size of every derived slot.
    pub slot_duration: Duration,
    /// Minimum interval between reservation creation and its start.
    pub min_lead_time: Duration,
    /// Maximum age an unconfirmed reservation may reach before cleanup.
    pub grace_period: Duration,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            slot_duration: Duration::minutes(15),
            min_lead_time: Duration::hours(24),
            grace_period: Duration::minutes(30),
        }
    }
}

/// A derived slot paired with its confirmed-reservation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotStatus {
    #[serde(flatten)]
    pub slot: Slot,
    /// True iff a confirmed reservation starts exactly at `slot.start`.
    pub reserved: bool,
}

/// The scheduling engine: slot derivation, admission, lifecycle, cleanup.
#[derive(Debug, Default)]
pub struct Scheduler {
    pub(crate) availability: AvailabilityBook,
    pub(crate) ledger: ReservationLedger,
    pub(crate) policy: Policy,
}

impl Scheduler {
    /// Empty scheduler with the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty scheduler with an explicit policy.
    pub fn with_policy(policy: Policy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Declare an availability window for a provider.
    pub fn add_availability(
        &self,
        provider_id: ProviderId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<WindowId> {
        self.availability.add_window(provider_id, start, end)
    }

    /// The provider's declared windows, in insertion order.
    pub fn windows(&self, provider_id: ProviderId) -> Result<Vec<AvailabilityWindow>> {
        self.availability.windows_for(provider_id)
    }

    /// Every slot derivable from the provider's windows, concatenated in
    /// window insertion order.
    ///
    /// "Available" means schedulable time exists, not that the slot is
    /// unbooked: slots holding a confirmed reservation are not filtered
    /// out, and overlapping windows yield duplicate slots. Callers that
    /// want booking state use [`Scheduler::slot_statuses`].
    pub fn available_slots(&self, provider_id: ProviderId) -> Result<Vec<Slot>> {
        let windows = self.availability.windows_for(provider_id)?;
        Ok(windows
            .iter()
            .flat_map(|w| slots::slice(w.start, w.end, self.policy.slot_duration))
            .collect())
    }

    /// Admit a reservation request against the ledger.
    ///
    /// The range is not validated against declared availability; a
    /// reservation may lie outside every window. Lead-time and
    /// confirmed-conflict checks apply as documented on
    /// [`ReservationLedger::create`].
    pub fn request_reservation(
        &self,
        provider_id: ProviderId,
        client_name: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<ReservationId> {
        self.ledger
            .create(provider_id, client_name, start, end, now, self.policy.min_lead_time)
    }

    /// Confirm a pending reservation. See [`ReservationLedger::confirm`].
    pub fn confirm_reservation(&self, id: ReservationId) -> Result<()> {
        self.ledger.confirm(id)
    }

    /// Remove unconfirmed reservations older than the grace period.
    /// Returns the number removed.
    pub fn run_cleanup(&self, now: DateTime<Utc>) -> Result<usize> {
        self.ledger.expire_older_than(now, self.policy.grace_period)
    }

    /// Each derivable slot paired with whether a confirmed reservation
    /// starts at it.
    pub fn slot_statuses(&self, provider_id: ProviderId) -> Result<Vec<SlotStatus>> {
        let confirmed: HashSet<DateTime<Utc>> = self
            .ledger
            .confirmed_starts(provider_id)?
            .into_iter()
            .collect();
        Ok(self
            .available_slots(provider_id)?
            .into_iter()
            .map(|slot| SlotStatus {
                slot,
                reserved: confirmed.contains(&slot.start),
            })
            .collect())
    }

    /// Point lookup of a reservation.
    pub fn reservation(&self, id: ReservationId) -> Result<Option<Reservation>> {
        self.ledger.get(id)
    }

    /// All reservations for a provider, ordered by id.
    pub fn reservations_for(&self, provider_id: ProviderId) -> Result<Vec<Reservation>> {
        self.ledger.reservations_for(provider_id)
    }
}
