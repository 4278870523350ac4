//! Error and diagnostic types.
//!
//! Failures are row-scoped: a malformed row is rejected and reported as a
//! [`RowDiagnostic`] while the remaining rows continue through ingestion
//! and scheduling. Only a missing or mismatched table header stops
//! ingestion, and it does so through [`TableError`], never a panic.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a single summary row was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowError {
    /// Row has fewer or more fields than the header.
    #[error("expected {expected} fields, found {found}")]
    ColumnCount { expected: usize, found: usize },

    /// A required field is empty.
    #[error("missing value for '{field}'")]
    MissingField { field: &'static str },

    /// A numeric field did not parse as a decimal.
    #[error("'{field}' is not numeric: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    /// `entry_count` is zero, negative, or not an integer.
    #[error("entry_count must be a positive integer, got '{0}'")]
    NonPositiveCount(String),

    /// Status outside {NORMAL, WARNING}.
    #[error("unknown status '{0}'")]
    UnknownStatus(String),
}

impl RowError {
    /// Diagnostic category for this error.
    ///
    /// Unknown statuses are reported as malformed rows.
    pub fn kind(&self) -> DiagnosticKind {
        DiagnosticKind::MalformedRow
    }
}

/// Table-level ingestion failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    /// Input contains no header line.
    #[error("summary table is missing its header row")]
    MissingHeader,

    /// Header columns do not match the expected layout.
    #[error("unexpected header: expected '{expected}', found '{found}'")]
    InvalidHeader { expected: String, found: String },
}

/// Result type for table-level operations.
pub type Result<T> = std::result::Result<T, TableError>;

/// Categories of row diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// Missing/non-numeric field, bad count, zero burst, or unknown status.
    MalformedRow,
}

/// A rejected row, surfaced to the caller instead of aborting the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowDiagnostic {
    /// 1-based line number in the source table, or 0-based input index
    /// when the row did not come from a table.
    pub line: usize,
    /// Patient ID, when the row got far enough to have one.
    pub patient_id: Option<String>,
    /// Diagnostic category.
    pub kind: DiagnosticKind,
    /// Human-readable description.
    pub message: String,
}

impl RowDiagnostic {
    /// Builds a diagnostic from a row error.
    pub fn from_error(line: usize, patient_id: Option<String>, error: &RowError) -> Self {
        Self {
            line,
            patient_id,
            kind: error.kind(),
            message: error.to_string(),
        }
    }

    /// Diagnostic for a patient whose burst time is zero.
    pub fn zero_burst(index: usize, patient_id: impl Into<String>) -> Self {
        Self {
            line: index,
            patient_id: Some(patient_id.into()),
            kind: DiagnosticKind::MalformedRow,
            message: "record_count must be at least 1".to_string(),
        }
    }
}
