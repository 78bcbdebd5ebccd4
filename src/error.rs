//! Custom error types for the expense tracker
//!
//! Every component returns a [`TrackerError`]; the session controller is the
//! single place where these are turned into operator-facing messages.

use thiserror::Error;

/// The main error type for expense tracker operations
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// CSV encoding/decoding errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Bad operator-supplied input (amount, date, names)
    #[error("Validation error: {0}")]
    Validation(String),

    /// A store that was never initialized
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// The budget table or ledger is missing for a budget evaluation
    #[error("Budget configuration missing: {0}")]
    ConfigMissing(String),

    /// Nothing to back up
    #[error("Backup source missing: {0}")]
    SourceMissing(String),

    /// Aggregation over no entries
    #[error("No data: {0}")]
    EmptyData(String),

    /// Persisted data that cannot be decoded
    #[error("Corrupt data in {source_name}, row {row}: {reason}")]
    DataCorruption {
        source_name: String,
        row: usize,
        reason: String,
    },

    /// A backup selection that matches no listed snapshot
    #[error("Selection '{selection}' is out of range ({available} backup(s) available)")]
    SelectionOutOfRange { selection: String, available: usize },

    /// The operator's input stream ended
    #[error("Input closed")]
    InputClosed,
}

impl TrackerError {
    /// Create a "not found" error for the expense ledger
    pub fn ledger_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Ledger",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for the budget table
    pub fn budget_table_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget table",
            identifier: identifier.into(),
        }
    }

    /// Create a data corruption error for a given source and row
    pub fn corrupt(source_name: impl Into<String>, row: usize, reason: impl Into<String>) -> Self {
        Self::DataCorruption {
            source_name: source_name.into(),
            row,
            reason: reason.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<csv::Error> for TrackerError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for expense tracker operations
pub type TrackerResult<T> = Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TrackerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = TrackerError::ledger_not_found("expenses.csv");
        assert_eq!(err.to_string(), "Ledger not found: expenses.csv");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_corruption_error() {
        let err = TrackerError::corrupt("expenses.csv", 4, "bad date 'yesterday'");
        assert_eq!(
            err.to_string(),
            "Corrupt data in expenses.csv, row 4: bad date 'yesterday'"
        );
    }

    #[test]
    fn test_selection_error() {
        let err = TrackerError::SelectionOutOfRange {
            selection: "9".into(),
            available: 2,
        };
        assert_eq!(
            err.to_string(),
            "Selection '9' is out of range (2 backup(s) available)"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let tracker_err: TrackerError = io_err.into();
        assert!(matches!(tracker_err, TrackerError::Io(_)));
    }
}
