//! Provider availability windows -- append-only declarations of bookable time.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// Opaque provider identifier. Provider attributes (name, contact) live
/// outside this crate's concern.
pub type ProviderId = u64;

/// Identifier assigned to an availability window on insertion.
pub type WindowId = u64;

/// A provider-declared half-open interval `[start, end)` during which
/// scheduling is permitted. Invariant: `start < end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    pub id: WindowId,
    pub provider_id: ProviderId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug)]
struct BookInner {
    next_id: WindowId,
    windows: Vec<AvailabilityWindow>,
}

impl Default for BookInner {
    fn default() -> Self {
        Self {
            next_id: 1,
            windows: Vec::new(),
        }
    }
}

/// Append-only store of availability windows.
///
/// Windows for one provider may overlap and are never merged or validated
/// against earlier declarations; overlapping windows surface as duplicate
/// derived slots downstream. Reads run concurrently; appends take the
/// write lock.
#[derive(Debug, Default)]
pub struct AvailabilityBook {
    inner: RwLock<BookInner>,
}

impl AvailabilityBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a new window for `provider_id`.
    ///
    /// # Errors
    /// Returns `ScheduleError::InvalidInterval` if `start >= end`. No
    /// overlap or ordering checks are performed against existing windows.
    pub fn add_window(
        &self,
        provider_id: ProviderId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<WindowId> {
        if start >= end {
            return Err(ScheduleError::InvalidInterval { start, end });
        }
        let mut inner = self.write()?;
        let id = inner.next_id;
        inner.next_id += 1;
        inner.windows.push(AvailabilityWindow {
            id,
            provider_id,
            start,
            end,
        });
        tracing::debug!(provider_id, window_id = id, %start, %end, "availability window added");
        Ok(id)
    }

    /// All windows declared for `provider_id`, in insertion order.
    ///
    /// An unknown provider yields an empty vec, not an error.
    pub fn windows_for(&self, provider_id: ProviderId) -> Result<Vec<AvailabilityWindow>> {
        let inner = self.read()?;
        Ok(inner
            .windows
            .iter()
            .filter(|w| w.provider_id == provider_id)
            .cloned()
            .collect())
    }

    /// Clone the full store contents for a snapshot.
    pub(crate) fn to_parts(&self) -> Result<(Vec<AvailabilityWindow>, WindowId)> {
        let inner = self.read()?;
        Ok((inner.windows.clone(), inner.next_id))
    }

    /// Rebuild a store from snapshot contents.
    pub(crate) fn from_parts(windows: Vec<AvailabilityWindow>, next_id: WindowId) -> Self {
        Self {
            inner: RwLock::new(BookInner { next_id, windows }),
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, BookInner>> {
        self.inner
            .read()
            .map_err(|_| ScheduleError::Storage("availability store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, BookInner>> {
        self.inner
            .write()
            .map_err(|_| ScheduleError::Storage("availability store lock poisoned".to_string()))
    }
}
