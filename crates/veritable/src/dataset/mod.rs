//! Tabular dataset registry and row/column search.

mod registry;
mod search;
mod table;

pub use registry::Registry;
pub use search::Predicates;
pub use table::{Dataset, DatasetId, FIRST_DATA_ROW, HEADER_ROW};
