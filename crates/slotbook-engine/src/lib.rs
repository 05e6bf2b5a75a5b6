//! # slotbook-engine
//!
//! Deterministic slot derivation and reservation-conflict engine.
//!
//! Turns provider-declared availability windows into fixed-size bookable
//! slots, admits reservation requests against concurrency-safe conflict
//! checks, and drives the confirm/expire lifecycle. Every time-sensitive
//! operation takes the current instant as an explicit `now` parameter, so
//! behavior is a pure function of inputs and stored state.
//!
//! ## Modules
//!
//! - [`slots`] — pure slot slicing and interval overlap math
//! - [`availability`] — append-only provider availability windows
//! - [`ledger`] — reservation store with serialized mutation
//! - [`engine`] — orchestration: derivation, admission, lifecycle, cleanup
//! - [`snapshot`] — serde state snapshot for the durable-store boundary
//! - [`error`] — error types

pub mod availability;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod slots;
pub mod snapshot;

pub use availability::{AvailabilityBook, AvailabilityWindow, ProviderId, WindowId};
pub use engine::{Policy, Scheduler, SlotStatus};
pub use error::{Result, ScheduleError};
pub use ledger::{Reservation, ReservationId, ReservationLedger};
pub use slots::{overlaps, slice, Slot};
pub use snapshot::Snapshot;
