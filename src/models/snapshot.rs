//! Persisted snapshot of a session.
//!
//! The snapshot is the single record written to the local store. Its fields
//! are the session's fields plus the display-formatted save time.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Session, SessionStatus, WorkerEntry};

/// The serialized form of a [`Session`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The selected headcount; `None` when blank.
    pub headcount: Option<usize>,
    /// One entry per headcount position.
    pub workers: Vec<WorkerEntry>,
    /// The tip pool; `None` when blank.
    pub tip_pool: Option<Decimal>,
    /// Lifecycle state at save time.
    pub status: SessionStatus,
    /// Display-formatted time the snapshot was written.
    pub save_time: String,
}

impl Snapshot {
    /// Captures a session together with the time it is being saved.
    pub fn capture(session: &Session, save_time: impl Into<String>) -> Self {
        Self {
            headcount: session.headcount,
            workers: session.workers.clone(),
            tip_pool: session.tip_pool,
            status: session.status,
            save_time: save_time.into(),
        }
    }

    /// Checks that the snapshot describes a consistent session.
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        let expected = self.headcount.unwrap_or(0);
        if self.workers.len() != expected {
            return Err(format!(
                "snapshot has {} worker entries for headcount {}",
                self.workers.len(),
                expected
            ));
        }
        if self.headcount.is_none() && self.status != SessionStatus::Empty {
            return Err(format!(
                "snapshot without headcount has status {}",
                self.status
            ));
        }
        if self.tip_pool.is_some_and(|p| p.is_sign_negative()) {
            return Err("snapshot has a negative tip pool".to_string());
        }
        Ok(())
    }

    /// Restores the session this snapshot was captured from.
    pub fn into_session(self) -> Session {
        Session {
            headcount: self.headcount,
            workers: self.workers,
            tip_pool: self.tip_pool,
            last_saved: Some(self.save_time),
            status: self.status,
        }
    }
}
