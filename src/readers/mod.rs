pub mod index_reader;
pub mod source_locator;

pub use index_reader::IndexReader;
pub use source_locator::{IndexSource, SourceKind};
