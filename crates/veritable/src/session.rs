//! Verification session: one registry, one ledger, no globals.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::path::Path;

use crate::dataset::{Dataset, DatasetId, Predicates, Registry};
use crate::error::{Result, VeritableError};
use crate::input::{Loader, SourceMetadata};
use crate::ledger::{Ledger, SourceRef};
use crate::report::VerificationReport;

/// The context object a verification run happens in.
///
/// A session owns a dataset registry and, once [`begin_ledger`]
/// (Session::begin_ledger) has been called, the results ledger. Sessions are
/// independent of each other: any number can coexist, each with its own
/// datasets and cursor. Appends are single-writer; the id-keyed query
/// operations only read.
#[derive(Debug, Default)]
pub struct Session {
    registry: Registry,
    ledger: Option<Ledger>,
    sources: BTreeMap<DatasetId, SourceMetadata>,
}

impl Session {
    /// Create an empty session with an uninitialized ledger.
    pub fn new() -> Self {
        Self::default()
    }

    // --- datasets -------------------------------------------------------

    /// Register an in-memory grid; the first row is the header.
    pub fn register(&mut self, rows: Vec<Vec<String>>) -> Result<DatasetId> {
        self.registry.register(rows)
    }

    /// Register an in-memory grid under an explicit name.
    pub fn register_named(
        &mut self,
        name: impl Into<String>,
        rows: Vec<Vec<String>>,
    ) -> Result<DatasetId> {
        self.registry.register_named(name, rows)
    }

    /// Load a delimited file and register it under its file stem.
    pub fn load_csv(&mut self, path: impl AsRef<Path>) -> Result<DatasetId> {
        let (rows, metadata) = Loader::new().load_file(path)?;
        let id = self.registry.register_named(metadata.stem(), rows)?;
        self.sources.insert(id, metadata);
        Ok(id)
    }

    /// Borrow a registered dataset.
    pub fn dataset(&self, id: DatasetId) -> Result<&Dataset> {
        self.registry.dataset(id)
    }

    /// Source metadata for a file-loaded dataset, if any.
    pub fn source(&self, id: DatasetId) -> Option<&SourceMetadata> {
        self.sources.get(&id)
    }

    /// Data-row count (header excluded).
    pub fn row_count(&self, id: DatasetId) -> Result<usize> {
        self.registry.row_count(id)
    }

    /// Column count (header cell count).
    pub fn column_count(&self, id: DatasetId) -> Result<usize> {
        self.registry.column_count(id)
    }

    // --- queries --------------------------------------------------------

    /// Find a column by header name (1-based).
    pub fn find_column(&self, id: DatasetId, name: &str) -> Result<Option<usize>> {
        Ok(self.registry.dataset(id)?.find_column(name))
    }

    /// First data row whose cell at `column` equals `value`.
    pub fn find_first_row(
        &self,
        id: DatasetId,
        column: usize,
        value: &str,
    ) -> Result<Option<usize>> {
        Ok(self.registry.dataset(id)?.find_first_row(column, value))
    }

    /// As [`find_first_row`](Self::find_first_row), scanning from `start`.
    pub fn find_first_row_from(
        &self,
        id: DatasetId,
        column: usize,
        value: &str,
        start: usize,
    ) -> Result<Option<usize>> {
        Ok(self
            .registry
            .dataset(id)?
            .find_first_row_from(column, value, start))
    }

    /// All matching data rows, ascending.
    pub fn find_all_rows(&self, id: DatasetId, column: usize, value: &str) -> Result<Vec<usize>> {
        Ok(self.registry.dataset(id)?.find_all_rows(column, value))
    }

    /// Rows matching all predicates.
    pub fn find_rows_intersect(
        &self,
        id: DatasetId,
        predicates: &Predicates,
    ) -> Result<BTreeSet<usize>> {
        self.registry.dataset(id)?.find_rows_intersect(predicates)
    }

    /// Rows matching any predicate.
    pub fn find_rows_union(
        &self,
        id: DatasetId,
        predicates: &Predicates,
    ) -> Result<BTreeSet<usize>> {
        self.registry.dataset(id)?.find_rows_union(predicates)
    }

    /// Cell lookup over the 1-based grid; `None` when out of range.
    pub fn cell_value(&self, id: DatasetId, row: usize, column: usize) -> Result<Option<&str>> {
        Ok(self.registry.dataset(id)?.cell_value(row, column))
    }

    /// Render a `<name>!R<row>C<col>` locator for a source reference.
    pub fn locator(&self, source: SourceRef) -> Result<String> {
        Ok(source.locator(self.registry.dataset(source.dataset)?.name()))
    }

    // --- ledger ---------------------------------------------------------

    /// Open the results ledger. Valid exactly once per session.
    pub fn begin_ledger(&mut self) -> Result<()> {
        if self.ledger.is_some() {
            return Err(VeritableError::LedgerAlreadyOpen);
        }
        self.ledger = Some(Ledger::open());
        Ok(())
    }

    /// Evaluate an expectation against an actual value and record the
    /// verdict. Returns the ledger row written.
    ///
    /// This is the single integration point between searching and verdict
    /// recording; callers never write ledger rows directly.
    pub fn append_verdict(
        &mut self,
        label: impl Into<String>,
        source: SourceRef,
        expectation: &str,
        actual: &str,
    ) -> Result<usize> {
        self.open_ledger()?.append(label, source, expectation, actual, None)
    }

    /// As [`append_verdict`](Self::append_verdict) with an annotation.
    pub fn append_verdict_with_note(
        &mut self,
        label: impl Into<String>,
        source: SourceRef,
        expectation: &str,
        actual: &str,
        note: impl Into<String>,
    ) -> Result<usize> {
        self.open_ledger()?
            .append(label, source, expectation, actual, Some(note.into()))
    }

    /// The ledger, if it has been opened.
    pub fn ledger(&self) -> Option<&Ledger> {
        self.ledger.as_ref()
    }

    /// Iterate registered datasets in registration order.
    pub fn datasets(&self) -> impl Iterator<Item = &Dataset> {
        self.registry.iter()
    }

    /// Snapshot this session into a serializable report.
    pub fn report(&self) -> VerificationReport {
        VerificationReport::from_session(self)
    }

    fn open_ledger(&mut self) -> Result<&mut Ledger> {
        self.ledger.as_mut().ok_or(VeritableError::LedgerNotOpen)
    }
}
