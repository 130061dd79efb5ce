pub mod json_writer;

pub use json_writer::{partition_by_year, LookupWriter, OutputFileInfo};
