//! Time-of-day labels.
//!
//! A [`TimeLabel`] is a 12-hour clock value with an AM/PM designator, such as
//! `"11:00 AM"` or `"12:30 AM"`. Labels carry no date; the duration engine
//! anchors them to a calendar date before subtracting.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::TipError;

/// The chrono format used to parse and render labels.
pub const TIME_LABEL_FORMAT: &str = "%I:%M %p";

/// A 12-hour clock time-of-day label.
///
/// Labels are stored as a [`NaiveTime`] and always render in the canonical
/// zero-padded form (`"03:00 PM"`), so parsing `"3:00 pm"` and displaying the
/// result yields `"03:00 PM"`.
///
/// # Example
///
/// ```
/// use shift_tips::models::TimeLabel;
///
/// let label: TimeLabel = "11:30 PM".parse().unwrap();
/// assert_eq!(label.to_string(), "11:30 PM");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeLabel {
    time: NaiveTime,
}

impl TimeLabel {
    /// Creates a label from a time of day.
    pub fn new(time: NaiveTime) -> Self {
        Self { time }
    }

    /// Returns the time of day this label represents.
    pub fn time(&self) -> NaiveTime {
        self.time
    }
}

impl FromStr for TimeLabel {
    type Err = TipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s.trim(), TIME_LABEL_FORMAT)
            .map(Self::new)
            .map_err(|_| TipError::InvalidTimeLabel {
                label: s.to_string(),
            })
    }
}

impl TryFrom<String> for TimeLabel {
    type Error = TipError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeLabel> for String {
    fn from(label: TimeLabel) -> Self {
        label.to_string()
    }
}

impl fmt::Display for TimeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.time.format(TIME_LABEL_FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_morning_label() {
        let label: TimeLabel = "11:00 AM".parse().unwrap();
        assert_eq!(label.time(), NaiveTime::from_hms_opt(11, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_midnight_labels() {
        let midnight: TimeLabel = "12:00 AM".parse().unwrap();
        let half_past: TimeLabel = "12:30 AM".parse().unwrap();
        assert_eq!(midnight.time(), NaiveTime::from_hms_opt(0, 0, 0).unwrap());
        assert_eq!(half_past.time(), NaiveTime::from_hms_opt(0, 30, 0).unwrap());
    }

    #[test]
    fn test_display_is_zero_padded() {
        let label: TimeLabel = "3:00 PM".parse().unwrap();
        assert_eq!(label.to_string(), "03:00 PM");
    }

    #[test]
    fn test_parse_rejects_24_hour_clock() {
        let result = "15:00".parse::<TimeLabel>();
        match result {
            Err(TipError::InvalidTimeLabel { label }) => assert_eq!(label, "15:00"),
            _ => panic!("Expected InvalidTimeLabel error"),
        }
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!("".parse::<TimeLabel>().is_err());
    }

    #[test]
    fn test_serializes_as_label_string() {
        let label: TimeLabel = "07:30 PM".parse().unwrap();
        assert_eq!(serde_json::to_string(&label).unwrap(), "\"07:30 PM\"");

        let back: TimeLabel = serde_json::from_str("\"07:30 PM\"").unwrap();
        assert_eq!(back, label);
    }

    #[test]
    fn test_deserialize_rejects_garbage() {
        assert!(serde_json::from_str::<TimeLabel>("\"late\"").is_err());
    }
}
