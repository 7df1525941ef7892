//! Configuration types for tip splitting.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{TipError, TipResult};
use crate::models::{EmployeeId, TimeLabel};

/// How labels earlier in the clock day than the opening time are anchored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WraparoundPolicy {
    /// Both labels sit on the anchor date; a shift ending after midnight
    /// produces a negative duration.
    SameDay,
    /// Labels earlier than the business day start belong to the next day.
    #[default]
    NextDayBeforeOpening,
}

/// General settings from settings.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// The name of the persisted snapshot record.
    pub storage_key: String,
    /// The nominal calendar date labels are anchored to.
    pub anchor_date: NaiveDate,
    /// The earliest label that still belongs to the anchor date.
    pub business_day_start: TimeLabel,
    /// The midnight wraparound rule.
    #[serde(default)]
    pub wraparound: WraparoundPolicy,
    /// chrono format string for the save timestamp.
    pub timestamp_format: String,
    /// The largest headcount the form may select.
    #[serde(default = "default_max_headcount")]
    pub max_headcount: usize,
}

fn default_max_headcount() -> usize {
    11
}

/// A single roster member.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RosterEntry {
    /// The employee identifier.
    pub id: EmployeeId,
    /// The display name.
    pub name: String,
}

/// Roster configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
    /// All roster members.
    pub employees: Vec<RosterEntry>,
}

/// Fixed, read-only mapping from employee identifier to display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRoster {
    entries: Vec<RosterEntry>,
}

impl EmployeeRoster {
    /// Creates a roster from its entries.
    pub fn new(entries: Vec<RosterEntry>) -> Self {
        Self { entries }
    }

    /// Returns all roster entries in configured order.
    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    /// Returns the display name of an employee, if present.
    pub fn display_name(&self, id: EmployeeId) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.name.as_str())
    }

    /// Returns true if the identifier is in the roster.
    pub fn contains(&self, id: EmployeeId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }
}

/// Time labels configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeLabelsConfig {
    /// The selectable labels in display order.
    pub labels: Vec<TimeLabel>,
}

/// The closed set of selectable time labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLabelSet {
    labels: Vec<TimeLabel>,
}

impl TimeLabelSet {
    /// Creates a label set.
    pub fn new(labels: Vec<TimeLabel>) -> Self {
        Self { labels }
    }

    /// Returns the labels in display order.
    pub fn labels(&self) -> &[TimeLabel] {
        &self.labels
    }

    /// Returns true if the label is selectable.
    pub fn contains(&self, label: TimeLabel) -> bool {
        self.labels.contains(&label)
    }

    /// Resolves raw form input to a label.
    ///
    /// Blank input resolves to `None`. Anything else must parse and be part
    /// of the set, otherwise `InvalidTimeLabel` is returned.
    pub fn resolve(&self, raw: &str) -> TipResult<Option<TimeLabel>> {
        if raw.trim().is_empty() {
            return Ok(None);
        }
        let label: TimeLabel = raw.parse()?;
        if !self.contains(label) {
            return Err(TipError::InvalidTimeLabel {
                label: raw.to_string(),
            });
        }
        Ok(Some(label))
    }
}

/// The complete configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct AppConfig {
    settings: Settings,
    roster: EmployeeRoster,
    time_labels: TimeLabelSet,
}

impl AppConfig {
    /// Creates a new AppConfig from its component parts.
    pub fn new(settings: Settings, roster: EmployeeRoster, time_labels: TimeLabelSet) -> Self {
        Self {
            settings,
            roster,
            time_labels,
        }
    }

    /// Returns the general settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the employee roster.
    pub fn roster(&self) -> &EmployeeRoster {
        &self.roster
    }

    /// Returns the selectable time labels.
    pub fn time_labels(&self) -> &TimeLabelSet {
        &self.time_labels
    }
}
