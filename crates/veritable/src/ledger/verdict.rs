//! Recorded verdict rows and source back-references.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dataset::DatasetId;
use crate::expect::Verdict;

/// By-value back-reference to the cell a verdict concerns.
///
/// Holds (dataset id, 1-based row, 1-based column) rather than any borrow of
/// the dataset, so a verdict never pins dataset contents and the dataset can
/// be queried or dropped independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    /// The dataset the cell belongs to.
    pub dataset: DatasetId,
    /// 1-based grid row (header is row 1).
    pub row: usize,
    /// 1-based column.
    pub column: usize,
}

impl SourceRef {
    /// Create a back-reference to one cell.
    pub fn new(dataset: DatasetId, row: usize, column: usize) -> Self {
        Self {
            dataset,
            row,
            column,
        }
    }

    /// Render a `<name>!R<row>C<col>` locator for presentation layers.
    pub fn locator(&self, dataset_name: &str) -> String {
        format!("{}!R{}C{}", dataset_name, self.row, self.column)
    }
}

/// One appended row of the results ledger. Immutable once recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerRow {
    /// Cursor position this row was written at.
    pub row: usize,
    /// Caller-supplied name for the check.
    pub label: String,
    /// The originating cell.
    pub source: SourceRef,
    /// The raw expectation string, kept for provenance.
    pub expectation: String,
    /// Resolved expected value (operand or band center).
    pub expected: String,
    /// The observed actual value.
    pub actual: String,
    /// Human-readable operator description.
    pub operation: String,
    /// PASS or FAIL.
    pub verdict: Verdict,
    /// Optional caller annotation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// When the verdict was recorded.
    pub recorded_at: DateTime<Utc>,
}
