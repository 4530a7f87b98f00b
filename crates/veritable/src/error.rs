//! Error types for the Veritable library.

use std::path::PathBuf;
use thiserror::Error;

use crate::dataset::DatasetId;

/// Main error type for Veritable operations.
#[derive(Debug, Error)]
pub enum VeritableError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data row's length differs from the header's at registration.
    #[error("shape error at row {row}: header has {expected} cells, row has {found}")]
    Shape {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Registration or load with no usable rows.
    #[error("empty data: {0}")]
    EmptyData(String),

    /// Query against an id the registry never issued.
    #[error("{0} is not registered")]
    DatasetNotFound(DatasetId),

    /// Expectation token outside the fixed operator set.
    #[error("unsupported operator '{0}'")]
    UnsupportedOperator(String),

    /// Expectation string with the wrong operand shape for its token.
    #[error("malformed expectation '{expectation}': {reason}")]
    MalformedExpectation {
        expectation: String,
        reason: String,
    },

    /// Ordering or tolerance comparison over a value that is not numeric.
    #[error("operator {operator} compares numerically, got '{value}'")]
    NonNumericOperand { operator: String, value: String },

    /// Set intersection/union called with no predicates.
    #[error("at least one (column, value) predicate is required")]
    EmptyPredicates,

    /// Verdict appended before the ledger was opened.
    #[error("results ledger is not open; call begin_ledger first")]
    LedgerNotOpen,

    /// Second begin on an already-open ledger.
    #[error("results ledger is already open")]
    LedgerAlreadyOpen,

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Saving or loading a report failed.
    #[error("persistence error: {0}")]
    Persistence(String),
}

/// Result type alias for Veritable operations.
pub type Result<T> = std::result::Result<T, VeritableError>;
