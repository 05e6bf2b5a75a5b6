//! Error types for scheduling operations.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::availability::ProviderId;
use crate::ledger::ReservationId;

#[derive(Error, Debug)]
pub enum ScheduleError {
    /// A window or reservation range where `start >= end`.
    #[error("invalid interval: start {start} is not before end {end}")]
    InvalidInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// Reservation requested too close to its start time.
    #[error("reservation start {start} violates the minimum lead time (earliest allowed: {earliest})")]
    LeadTimeViolation {
        start: DateTime<Utc>,
        earliest: DateTime<Utc>,
    },

    /// The slot already has a confirmed reservation.
    #[error("slot starting {start} for provider {provider_id} is already confirmed")]
    SlotTaken {
        provider_id: ProviderId,
        start: DateTime<Utc>,
    },

    /// Unknown reservation identifier.
    #[error("unknown reservation id {0}")]
    NotFound(ReservationId),

    /// The underlying store is unavailable or inconsistent.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Convenience alias used throughout slotbook-engine.
pub type Result<T> = std::result::Result<T, ScheduleError>;
