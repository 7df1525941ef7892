//! Persistence and clock ports.
//!
//! The session store only ever reads, replaces or deletes one opaque record,
//! so any backend that can do those three things atomically can host it.

use chrono::{Local, NaiveDateTime};

use crate::error::TipResult;

/// A keyed store of opaque text records.
///
/// Each call is one atomic operation on one record; last writer wins.
pub trait SnapshotStore {
    /// Reads a record, returning `None` if it does not exist.
    fn read(&self, key: &str) -> TipResult<Option<String>>;

    /// Replaces a record.
    fn write(&mut self, key: &str, value: &str) -> TipResult<()>;

    /// Deletes a record; deleting a missing record is not an error.
    fn delete(&mut self, key: &str) -> TipResult<()>;
}

/// A source of the current local time.
pub trait Clock {
    /// Returns the current local date and time.
    fn now(&self) -> NaiveDateTime;
}

/// The system clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
