//! Immutable tabular dataset with a header row and 1-based addressing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Row index of the header in the 1-based grid.
pub const HEADER_ROW: usize = 1;

/// Row index of the first data row in the 1-based grid.
pub const FIRST_DATA_ROW: usize = 2;

/// Stable identifier assigned to a dataset by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetId(pub(crate) usize);

impl DatasetId {
    /// The raw numeric id.
    pub fn value(&self) -> usize {
        self.0
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dataset {}", self.0)
    }
}

/// A registered rectangular grid of string cells.
///
/// Row 1 is the header; data rows start at [`FIRST_DATA_ROW`]. The grid is
/// immutable once registered: all query operations borrow it read-only.
#[derive(Debug, Clone)]
pub struct Dataset {
    id: DatasetId,
    name: String,
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    pub(crate) fn new(
        id: DatasetId,
        name: String,
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Self {
        Self {
            id,
            name,
            header,
            rows,
        }
    }

    /// The registry-assigned identifier.
    pub fn id(&self) -> DatasetId {
        self.id
    }

    /// Human-readable dataset name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column names, in grid order.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Number of data rows (header excluded).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (header cell count).
    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// Grid row index one past the last data row.
    pub fn end_row(&self) -> usize {
        FIRST_DATA_ROW + self.rows.len()
    }

    /// Cell lookup over the unified 1-based grid; row 1 addresses the header.
    ///
    /// Out-of-range coordinates return `None` rather than an error: absence
    /// is a routine outcome of row-scanning workflows, not a failure.
    pub fn cell_value(&self, row: usize, column: usize) -> Option<&str> {
        if row == 0 || column == 0 {
            return None;
        }
        let cells = if row == HEADER_ROW {
            &self.header
        } else {
            self.rows.get(row - FIRST_DATA_ROW)?
        };
        cells.get(column - 1).map(|s| s.as_str())
    }

    /// Iterate data rows as `(grid_row_index, cells)` pairs.
    pub(crate) fn data_rows(&self) -> impl Iterator<Item = (usize, &[String])> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, cells)| (i + FIRST_DATA_ROW, cells.as_slice()))
    }
}
