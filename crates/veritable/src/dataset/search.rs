//! Row/column search and set combination over a registered dataset.
//!
//! All lookups use exact string equality with no type coercion: a numeric
//! actual value does not match a string rendering of the same number unless
//! the caller normalizes beforehand. That strictness is a contract, not an
//! oversight — callers that want numeric matching do it through the
//! expectation evaluator instead.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::error::{Result, VeritableError};

use super::table::{Dataset, FIRST_DATA_ROW};

/// Insertion-ordered (column index → match value) predicates for
/// [`Dataset::find_rows_intersect`] and [`Dataset::find_rows_union`].
pub type Predicates = IndexMap<usize, String>;

impl Dataset {
    /// Find a column by header name (1-based).
    ///
    /// Scans the header once, left to right; first exact case-sensitive
    /// match wins.
    pub fn find_column(&self, name: &str) -> Option<usize> {
        self.header().iter().position(|h| h == name).map(|i| i + 1)
    }

    /// Find the first data row whose cell at `column` equals `value`.
    pub fn find_first_row(&self, column: usize, value: &str) -> Option<usize> {
        self.find_first_row_from(column, value, FIRST_DATA_ROW)
    }

    /// As [`find_first_row`](Self::find_first_row), starting the scan at
    /// grid row `start` (clamped up to the first data row).
    pub fn find_first_row_from(&self, column: usize, value: &str, start: usize) -> Option<usize> {
        let start = start.max(FIRST_DATA_ROW);
        self.data_rows()
            .skip(start - FIRST_DATA_ROW)
            .find(|(_, cells)| cell_matches(cells, column, value))
            .map(|(row, _)| row)
    }

    /// Every data row whose cell at `column` equals `value`, in ascending
    /// row order. No match is an empty vec, not an error.
    pub fn find_all_rows(&self, column: usize, value: &str) -> Vec<usize> {
        self.data_rows()
            .filter(|(_, cells)| cell_matches(cells, column, value))
            .map(|(row, _)| row)
            .collect()
    }

    /// Rows matching *all* predicates: the intersection of
    /// [`find_all_rows`](Self::find_all_rows) per (column, value) pair.
    ///
    /// An empty predicate mapping is rejected with
    /// [`VeritableError::EmptyPredicates`].
    pub fn find_rows_intersect(&self, predicates: &Predicates) -> Result<BTreeSet<usize>> {
        let mut sets = self.predicate_sets(predicates)?;
        let mut result = sets.next().unwrap_or_default();
        for set in sets {
            result = result.intersection(&set).copied().collect();
            if result.is_empty() {
                break;
            }
        }
        Ok(result)
    }

    /// Rows matching *any* predicate: the union of the per-predicate sets.
    pub fn find_rows_union(&self, predicates: &Predicates) -> Result<BTreeSet<usize>> {
        let mut result = BTreeSet::new();
        for set in self.predicate_sets(predicates)? {
            result.extend(set);
        }
        Ok(result)
    }

    fn predicate_sets<'a>(
        &'a self,
        predicates: &'a Predicates,
    ) -> Result<impl Iterator<Item = BTreeSet<usize>> + 'a> {
        if predicates.is_empty() {
            return Err(VeritableError::EmptyPredicates);
        }
        Ok(predicates
            .iter()
            .map(|(&column, value)| self.find_all_rows(column, value).into_iter().collect()))
    }
}

fn cell_matches(cells: &[String], column: usize, value: &str) -> bool {
    column >= 1 && cells.get(column - 1).is_some_and(|cell| cell == value)
}
