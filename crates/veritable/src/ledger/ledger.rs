//! Append-only results ledger with a monotonically advancing row cursor.

use chrono::Utc;

use crate::error::Result;
use crate::expect::{self, Verdict};

use super::verdict::{LedgerRow, SourceRef};

/// Cursor position of the first writable row; row 1 is the ledger header.
pub const FIRST_LEDGER_ROW: usize = 2;

/// The open results ledger.
///
/// Rows are only ever appended through [`append`](Ledger::append), which
/// evaluates the expectation first and writes nothing on an evaluation
/// error. Single-writer: concurrent appends would corrupt the
/// cursor-to-row mapping and must be serialized by the caller.
#[derive(Debug, Default)]
pub struct Ledger {
    rows: Vec<LedgerRow>,
    cursor: usize,
}

impl Ledger {
    /// Open a fresh ledger with the cursor at the first writable row.
    pub fn open() -> Self {
        Self {
            rows: Vec::new(),
            cursor: FIRST_LEDGER_ROW,
        }
    }

    /// Evaluate `expectation` against `actual` and record the verdict at the
    /// current cursor row. Returns the row index written.
    ///
    /// On any evaluation error nothing is appended and the cursor does not
    /// move; a failed evaluation is never downgraded to a FAIL row.
    pub fn append(
        &mut self,
        label: impl Into<String>,
        source: SourceRef,
        expectation: &str,
        actual: &str,
        note: Option<String>,
    ) -> Result<usize> {
        let evaluation = expect::evaluate(expectation, actual)?;

        let row = self.cursor;
        self.rows.push(LedgerRow {
            row,
            label: label.into(),
            source,
            expectation: expectation.to_string(),
            expected: evaluation.expected,
            actual: actual.to_string(),
            operation: evaluation.description,
            verdict: evaluation.verdict,
            note,
            recorded_at: Utc::now(),
        });
        self.cursor += 1;
        Ok(row)
    }

    /// All recorded rows, in append order.
    pub fn rows(&self) -> &[LedgerRow] {
        &self.rows
    }

    /// Number of recorded verdicts.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether nothing has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The next row index an append would write to.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Look a recorded row up by its cursor position.
    pub fn get(&self, row: usize) -> Option<&LedgerRow> {
        self.rows.get(row.checked_sub(FIRST_LEDGER_ROW)?)
    }

    /// (pass, fail) tallies over the recorded verdicts.
    pub fn counts(&self) -> (usize, usize) {
        let passed = self
            .rows
            .iter()
            .filter(|r| r.verdict == Verdict::Pass)
            .count();
        (passed, self.rows.len() - passed)
    }

    /// Whether every recorded verdict passed.
    pub fn is_clean(&self) -> bool {
        self.rows.iter().all(|r| r.verdict == Verdict::Pass)
    }

    /// The rows that failed, in append order.
    pub fn failures(&self) -> Vec<&LedgerRow> {
        self.rows
            .iter()
            .filter(|r| r.verdict == Verdict::Fail)
            .collect()
    }
}
