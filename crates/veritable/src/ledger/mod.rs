//! Results ledger: append-only verdict rows with source back-references.

mod ledger;
mod verdict;

pub use ledger::{Ledger, FIRST_LEDGER_ROW};
pub use verdict::{LedgerRow, SourceRef};
