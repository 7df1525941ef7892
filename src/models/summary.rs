//! Read-only view of a session for display.
//!
//! This is everything the form shows back to the user: per-slot hours and
//! shares, the aggregate tip total and the last save time.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::EmployeeRoster;

use super::{EmployeeId, Session, SessionStatus, TimeLabel};

/// One display row per worker slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerRow {
    /// Zero-based slot position.
    pub index: usize,
    /// Selected roster identity.
    pub employee_id: Option<EmployeeId>,
    /// Roster display name for the identity, if it resolves.
    pub employee_name: Option<String>,
    /// Selected start time.
    pub start_time: Option<TimeLabel>,
    /// Selected end time.
    pub end_time: Option<TimeLabel>,
    /// Computed hours, blank until both times are selected.
    pub hours: Option<Decimal>,
    /// Tip share from the last allocation.
    pub tip_share: Option<Decimal>,
}

/// The output surface of a session.
///
/// # Example
///
/// ```
/// use shift_tips::config::ConfigLoader;
/// use shift_tips::models::{Session, SessionSummary};
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::builtin().unwrap();
///
/// let mut session = Session::with_headcount(1);
/// session.workers[0].employee_id = Some(2);
/// session.workers[0].tip_share = Some(Decimal::new(2550, 2));
///
/// let summary = SessionSummary::build(&session, loader.roster());
/// assert_eq!(summary.rows[0].employee_name.as_deref(), Some("pv"));
/// assert_eq!(summary.total_tips, Decimal::new(2550, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// One row per slot, in order.
    pub rows: Vec<WorkerRow>,
    /// Sum of all computed tip shares.
    pub total_tips: Decimal,
    /// Display-formatted timestamp of the last save.
    pub last_saved: Option<String>,
    /// Lifecycle state of the session.
    pub status: SessionStatus,
}

impl SessionSummary {
    /// Builds the view of a session, resolving names against the roster.
    pub fn build(session: &Session, roster: &EmployeeRoster) -> Self {
        let rows = session
            .workers
            .iter()
            .enumerate()
            .map(|(index, worker)| WorkerRow {
                index,
                employee_id: worker.employee_id,
                employee_name: worker
                    .employee_id
                    .and_then(|id| roster.display_name(id))
                    .map(str::to_string),
                start_time: worker.start_time,
                end_time: worker.end_time,
                hours: worker.hours,
                tip_share: worker.tip_share,
            })
            .collect();

        Self {
            rows,
            total_tips: session.total_tips(),
            last_saved: session.last_saved.clone(),
            status: session.status,
        }
    }
}
