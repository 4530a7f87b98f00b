//! Veritable: verification reports for tabular datasets.
//!
//! Veritable registers header-plus-rows datasets, locates rows of interest
//! by exact value match, evaluates human-authored expectation strings
//! (`EQ,30`, `TL,100,5`, ...) against observed values, and accumulates each
//! PASS/FAIL verdict in an append-only results ledger that back-references
//! the originating cell.
//!
//! # Core Principles
//!
//! - **Immutable inputs**: datasets are validated once at registration and
//!   never mutated afterwards
//! - **No silent verdicts**: an expectation that cannot be evaluated is an
//!   error, never a PASS or FAIL
//! - **Full provenance**: every verdict records its source cell, raw
//!   expectation, and record time
//!
//! # Example
//!
//! ```
//! use veritable::{Session, SourceRef};
//!
//! let mut session = Session::new();
//! let id = session.register(vec![
//!     vec!["Name".into(), "Age".into()],
//!     vec!["Ruth".into(), "30".into()],
//!     vec!["David".into(), "45".into()],
//! ]).unwrap();
//!
//! let age = session.find_column(id, "Age").unwrap().unwrap();
//! let row = session.find_first_row(id, 1, "David").unwrap().unwrap();
//! let actual = session.cell_value(id, row, age).unwrap().unwrap().to_string();
//!
//! session.begin_ledger().unwrap();
//! session.append_verdict("David's age", SourceRef::new(id, row, age), "GE,40", &actual).unwrap();
//!
//! assert!(session.ledger().unwrap().is_clean());
//! ```

pub mod dataset;
pub mod error;
pub mod expect;
pub mod input;
pub mod ledger;
pub mod report;

mod session;

pub use dataset::{Dataset, DatasetId, Predicates, Registry};
pub use error::{Result, VeritableError};
pub use expect::{evaluate, Evaluation, Expectation, Operator, Verdict};
pub use input::{Loader, LoaderConfig, SourceMetadata};
pub use ledger::{Ledger, LedgerRow, SourceRef};
pub use report::{report_path, DatasetSummary, ReportSummary, VerificationReport};
pub use session::Session;
