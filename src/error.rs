//! Error types for the tip splitting engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while editing, allocating, or
//! persisting a session.

use thiserror::Error;

/// The main error type for the tip splitting engine.
///
/// Input that the session coerces (blank headcount, non-numeric tip pool)
/// never produces an error. These variants cover configuration problems,
/// contract violations from the form layer, and storage failures.
///
/// # Example
///
/// ```
/// use shift_tips::error::TipError;
///
/// let error = TipError::InvalidTimeLabel {
///     label: "10:15 AM".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid time label: 10:15 AM");
/// ```
#[derive(Debug, Error)]
pub enum TipError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A time label was malformed or is not part of the configured label set.
    #[error("Invalid time label: {label}")]
    InvalidTimeLabel {
        /// The offending label.
        label: String,
    },

    /// A slot index was past the current headcount.
    #[error("Slot {index} is out of range for headcount {headcount}")]
    SlotOutOfRange {
        /// The requested slot index.
        index: usize,
        /// The headcount at the time of the request.
        headcount: usize,
    },

    /// A headcount was larger than the configured maximum.
    #[error("Headcount {headcount} exceeds the maximum of {max}")]
    HeadcountOutOfRange {
        /// The requested headcount.
        headcount: usize,
        /// The configured maximum.
        max: usize,
    },

    /// An employee identifier is not present in the roster.
    #[error("Employee not found in roster: {id}")]
    EmployeeNotFound {
        /// The identifier that was not found.
        id: u32,
    },

    /// The snapshot storage backend failed.
    #[error("Storage error for '{key}': {message}")]
    Storage {
        /// The record key being accessed.
        key: String,
        /// A description of the failure.
        message: String,
    },

    /// The session could not be encoded into a snapshot.
    #[error("Failed to encode snapshot: {message}")]
    SnapshotEncode {
        /// A description of the encoding failure.
        message: String,
    },
}

/// A type alias for Results that return TipError.
pub type TipResult<T> = Result<T, TipError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = TipError::ConfigNotFound {
            path: "/missing/settings.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/settings.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = TipError::ConfigParseError {
            path: "/config/roster.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/roster.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_slot_out_of_range_displays_index_and_headcount() {
        let error = TipError::SlotOutOfRange {
            index: 4,
            headcount: 3,
        };
        assert_eq!(error.to_string(), "Slot 4 is out of range for headcount 3");
    }

    #[test]
    fn test_headcount_out_of_range_displays_limit() {
        let error = TipError::HeadcountOutOfRange {
            headcount: 12,
            max: 11,
        };
        assert_eq!(error.to_string(), "Headcount 12 exceeds the maximum of 11");
    }

    #[test]
    fn test_employee_not_found_displays_id() {
        let error = TipError::EmployeeNotFound { id: 42 };
        assert_eq!(error.to_string(), "Employee not found in roster: 42");
    }

    #[test]
    fn test_storage_displays_key_and_message() {
        let error = TipError::Storage {
            key: "shiftData".to_string(),
            message: "permission denied".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Storage error for 'shiftData': permission denied"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<TipError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_label() -> TipResult<()> {
            Err(TipError::InvalidTimeLabel {
                label: "noon".to_string(),
            })
        }

        fn propagates_error() -> TipResult<()> {
            returns_invalid_label()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
