//! Input handling: delimited-file loading and source metadata.

mod loader;
mod source;

pub use loader::{Loader, LoaderConfig};
pub use source::SourceMetadata;
