//! Shift duration calculation.
//!
//! Time labels carry no date, so both ends of a shift are first anchored to
//! a nominal calendar date and then subtracted. Under the
//! [`WraparoundPolicy::NextDayBeforeOpening`] policy a label earlier in the
//! clock day than the business day start (e.g. `12:30 AM` when the day opens
//! at `11:00 AM`) is anchored to the following date, so a shift running past
//! midnight yields a positive duration.

use chrono::{Days, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{Settings, WraparoundPolicy};
use crate::models::TimeLabel;

/// The rules used to anchor labels to calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationRules {
    /// The nominal date labels are anchored to.
    pub anchor_date: NaiveDate,
    /// The earliest label that stays on the anchor date.
    pub business_day_start: TimeLabel,
    /// The midnight wraparound rule.
    pub policy: WraparoundPolicy,
}

impl DurationRules {
    /// Creates a new set of duration rules.
    pub fn new(
        anchor_date: NaiveDate,
        business_day_start: TimeLabel,
        policy: WraparoundPolicy,
    ) -> Self {
        Self {
            anchor_date,
            business_day_start,
            policy,
        }
    }

    /// Extracts the duration rules from the general settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.anchor_date,
            settings.business_day_start,
            settings.wraparound,
        )
    }

    /// Places a label on a calendar date according to these rules.
    ///
    /// # Example
    ///
    /// ```
    /// use shift_tips::calculation::DurationRules;
    /// use shift_tips::config::WraparoundPolicy;
    /// use chrono::NaiveDate;
    ///
    /// let anchor = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    /// let rules = DurationRules::new(
    ///     anchor,
    ///     "11:00 AM".parse().unwrap(),
    ///     WraparoundPolicy::NextDayBeforeOpening,
    /// );
    ///
    /// let late = rules.anchor("12:30 AM".parse().unwrap());
    /// assert_eq!(late.date(), NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    ///
    /// let evening = rules.anchor("09:00 PM".parse().unwrap());
    /// assert_eq!(evening.date(), anchor);
    /// ```
    pub fn anchor(&self, label: TimeLabel) -> NaiveDateTime {
        let date = match self.policy {
            WraparoundPolicy::NextDayBeforeOpening if label < self.business_day_start => self
                .anchor_date
                .checked_add_days(Days::new(1))
                .unwrap_or(self.anchor_date),
            _ => self.anchor_date,
        };
        date.and_time(label.time())
    }
}

/// A shift with both ends placed on calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftSpan {
    /// The anchored start of the shift.
    pub start: NaiveDateTime,
    /// The anchored end of the shift.
    pub end: NaiveDateTime,
    /// `end - start` in fractional hours; negative if the end precedes the start.
    pub hours: Decimal,
    /// Whether the two ends fall on different dates.
    pub crosses_midnight: bool,
}

/// Anchors a start/end pair and measures the shift.
pub fn resolve_shift(start: TimeLabel, end: TimeLabel, rules: &DurationRules) -> ShiftSpan {
    let start = rules.anchor(start);
    let end = rules.anchor(end);
    let minutes = (end - start).num_minutes();

    ShiftSpan {
        start,
        end,
        hours: (Decimal::new(minutes, 0) / Decimal::new(60, 0)).normalize(),
        crosses_midnight: start.date() != end.date(),
    }
}

/// Computes the hours between two labels.
///
/// Returns `None` if either side is blank.
///
/// # Examples
///
/// ```
/// use shift_tips::calculation::{compute_hours, DurationRules};
/// use shift_tips::config::WraparoundPolicy;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let rules = DurationRules::new(
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     "11:00 AM".parse().unwrap(),
///     WraparoundPolicy::NextDayBeforeOpening,
/// );
///
/// let hours = compute_hours(
///     Some("11:00 PM".parse().unwrap()),
///     Some("12:30 AM".parse().unwrap()),
///     &rules,
/// );
/// assert_eq!(hours, Some(Decimal::new(15, 1))); // 1.5 hours
///
/// assert_eq!(compute_hours(None, Some("12:30 AM".parse().unwrap()), &rules), None);
/// ```
pub fn compute_hours(
    start: Option<TimeLabel>,
    end: Option<TimeLabel>,
    rules: &DurationRules,
) -> Option<Decimal> {
    match (start, end) {
        (Some(start), Some(end)) => Some(resolve_shift(start, end, rules).hours),
        _ => None,
    }
}

/// Applies one end label against each worker's own start label.
///
/// The result is parallel to `starts`; entries whose start is blank (or all
/// entries, if `end` is blank) are `None`.
pub fn compute_hours_for_all(
    end: Option<TimeLabel>,
    starts: &[Option<TimeLabel>],
    rules: &DurationRules,
) -> Vec<Option<Decimal>> {
    starts
        .iter()
        .map(|start| compute_hours(*start, end, rules))
        .collect()
}
