//! Registry of ingested datasets.

use crate::error::{Result, VeritableError};

use super::table::{Dataset, DatasetId};

/// Owns every registered dataset and issues sequential ids.
///
/// Datasets are validated once at registration (rectangular shape) and never
/// mutated afterwards, so queries against an issued id are safe to repeat
/// and to share across readers.
#[derive(Debug, Default)]
pub struct Registry {
    datasets: Vec<Dataset>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a grid whose first row is the header.
    ///
    /// The dataset is named `dataset-<id>`. Fails with
    /// [`VeritableError::EmptyData`] when no rows are supplied and
    /// [`VeritableError::Shape`] when any row's length differs from the
    /// header's; a failed registration leaves the registry untouched.
    pub fn register(&mut self, rows: Vec<Vec<String>>) -> Result<DatasetId> {
        let name = format!("dataset-{}", self.datasets.len() + 1);
        self.register_named(name, rows)
    }

    /// Register a grid under an explicit name.
    pub fn register_named(
        &mut self,
        name: impl Into<String>,
        mut rows: Vec<Vec<String>>,
    ) -> Result<DatasetId> {
        if rows.is_empty() {
            return Err(VeritableError::EmptyData(
                "a dataset needs at least a header row".to_string(),
            ));
        }

        let header = rows.remove(0);
        if header.is_empty() {
            return Err(VeritableError::EmptyData(
                "the header row has no columns".to_string(),
            ));
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != header.len() {
                return Err(VeritableError::Shape {
                    // grid row index: header is row 1, data starts at 2
                    row: i + 2,
                    expected: header.len(),
                    found: row.len(),
                });
            }
        }

        let id = DatasetId(self.datasets.len() + 1);
        self.datasets.push(Dataset::new(id, name.into(), header, rows));
        Ok(id)
    }

    /// Borrow a registered dataset.
    pub fn dataset(&self, id: DatasetId) -> Result<&Dataset> {
        self.datasets
            .get(id.0.wrapping_sub(1))
            .filter(|ds| ds.id() == id)
            .ok_or(VeritableError::DatasetNotFound(id))
    }

    /// Data-row count for a dataset (header excluded).
    pub fn row_count(&self, id: DatasetId) -> Result<usize> {
        Ok(self.dataset(id)?.row_count())
    }

    /// Column count for a dataset (header cell count).
    pub fn column_count(&self, id: DatasetId) -> Result<usize> {
        Ok(self.dataset(id)?.column_count())
    }

    /// Number of registered datasets.
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    /// Whether nothing has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// Iterate datasets in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Dataset> {
        self.datasets.iter()
    }
}
