//! Session aggregate.
//!
//! A [`Session`] is the whole editable state of one tip split: headcount,
//! worker slots, tip pool and the last save timestamp. Exactly one session
//! is live at a time; it is persisted as a single snapshot.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::WorkerEntry;

/// Lifecycle state of a session.
///
/// `Empty` until a headcount is chosen, `Configured` while being edited and
/// `Settled` right after a submission, until the next edit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// No headcount has been selected.
    #[default]
    Empty,
    /// Slots exist and are being edited.
    Configured,
    /// Shares were computed and saved, with no edits since.
    Settled,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Empty => write!(f, "Empty"),
            SessionStatus::Configured => write!(f, "Configured"),
            SessionStatus::Settled => write!(f, "Settled"),
        }
    }
}

/// The complete editable state of a tip split.
///
/// `workers.len()` always equals the headcount (zero when the headcount is
/// blank). Slots are only created by [`Session::with_headcount`], so the
/// per-slot inputs and outputs cannot drift out of step.
///
/// # Example
///
/// ```
/// use shift_tips::models::{Session, SessionStatus};
///
/// let session = Session::with_headcount(3);
/// assert_eq!(session.headcount(), 3);
/// assert_eq!(session.workers.len(), 3);
/// assert_eq!(session.status, SessionStatus::Configured);
///
/// let empty = Session::default();
/// assert_eq!(empty.headcount(), 0);
/// assert_eq!(empty.status, SessionStatus::Empty);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The selected headcount; `None` when blank.
    pub headcount: Option<usize>,
    /// One entry per headcount position.
    pub workers: Vec<WorkerEntry>,
    /// The tip pool to split; `None` when blank.
    pub tip_pool: Option<Decimal>,
    /// Display-formatted timestamp of the last save.
    pub last_saved: Option<String>,
    /// Where the session is in its lifecycle.
    pub status: SessionStatus,
}

impl Session {
    /// Creates a session with `headcount` blank slots.
    pub fn with_headcount(headcount: usize) -> Self {
        Self {
            headcount: Some(headcount),
            workers: vec![WorkerEntry::default(); headcount],
            tip_pool: None,
            last_saved: None,
            status: SessionStatus::Configured,
        }
    }

    /// Returns the headcount, treating blank as zero.
    pub fn headcount(&self) -> usize {
        self.headcount.unwrap_or(0)
    }

    /// Returns the sum of all contributing hours.
    pub fn total_hours(&self) -> Decimal {
        self.workers
            .iter()
            .map(WorkerEntry::contributing_hours)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Returns the sum of all computed tip shares, blank shares counting as zero.
    pub fn total_tips(&self) -> Decimal {
        self.workers
            .iter()
            .filter_map(|w| w.tip_share)
            .fold(Decimal::ZERO, Decimal::saturating_add)
            .round_dp(2)
    }

    /// Returns the hours of every slot in order.
    pub fn hours(&self) -> Vec<Option<Decimal>> {
        self.workers.iter().map(|w| w.hours).collect()
    }

    /// Returns the tip share of every slot in order.
    pub fn tip_shares(&self) -> Vec<Option<Decimal>> {
        self.workers.iter().map(|w| w.tip_share).collect()
    }

    /// Marks the session as edited after a settlement.
    pub(crate) fn touch(&mut self) {
        if self.status == SessionStatus::Settled {
            self.status = SessionStatus::Configured;
        }
    }
}
