pub mod field_deriver;
pub mod index_pipeline;
pub mod row_filter;

pub use field_deriver::FieldDeriver;
pub use index_pipeline::{IndexPipeline, PipelineOutput};
pub use row_filter::{FilterReport, RowFilter};
