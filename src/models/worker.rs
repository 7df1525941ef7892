//! Worker slot model.
//!
//! A [`WorkerEntry`] holds everything the session knows about one headcount
//! position: the editable inputs (start, end, employee) and the two computed
//! outputs (hours, tip share).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TimeLabel;

/// Identifier of an employee in the roster.
pub type EmployeeId = u32;

/// One worker's record at a given position in the session.
///
/// `None` means the field is blank on the form. `hours` is only written when
/// both times are present, and `tip_share` is only written by an allocation,
/// so it may be stale after later edits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerEntry {
    /// The selected shift start time.
    #[serde(default)]
    pub start_time: Option<TimeLabel>,
    /// The selected shift end time.
    #[serde(default)]
    pub end_time: Option<TimeLabel>,
    /// The selected roster identity.
    #[serde(default)]
    pub employee_id: Option<EmployeeId>,
    /// Hours worked, signed, computed from the start and end times.
    #[serde(default)]
    pub hours: Option<Decimal>,
    /// The share of the tip pool from the last allocation.
    #[serde(default)]
    pub tip_share: Option<Decimal>,
}

impl WorkerEntry {
    /// Returns true if both a start and end time have been selected.
    pub fn has_complete_shift(&self) -> bool {
        self.start_time.is_some() && self.end_time.is_some()
    }

    /// Hours this worker contributes to an allocation.
    ///
    /// Blank hours count as zero, and so do negative hours.
    ///
    /// # Examples
    ///
    /// ```
    /// use shift_tips::models::WorkerEntry;
    /// use rust_decimal::Decimal;
    ///
    /// let mut entry = WorkerEntry::default();
    /// assert_eq!(entry.contributing_hours(), Decimal::ZERO);
    ///
    /// entry.hours = Some(Decimal::new(45, 1));
    /// assert_eq!(entry.contributing_hours(), Decimal::new(45, 1));
    ///
    /// entry.hours = Some(Decimal::new(-4, 0));
    /// assert_eq!(entry.contributing_hours(), Decimal::ZERO);
    /// ```
    pub fn contributing_hours(&self) -> Decimal {
        self.hours
            .filter(|h| h.is_sign_positive())
            .unwrap_or(Decimal::ZERO)
    }
}
