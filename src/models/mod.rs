pub mod derived_record;
pub mod index_record;

pub use derived_record::DerivedRecord;
pub use index_record::IndexRecord;
