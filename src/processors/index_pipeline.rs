use crate::config::{PipelineConfig, ProjectLayout};
use crate::error::Result;
use crate::models::{DerivedRecord, IndexRecord};
use crate::processors::{FieldDeriver, FilterReport, RowFilter};
use crate::readers::{IndexReader, IndexSource};
use crate::utils::progress::ProgressReporter;
use tracing::{info, warn};

/// Result of one pass: located source, derived rows, filter counts.
#[derive(Debug)]
pub struct PipelineOutput {
    pub source: IndexSource,
    pub records: Vec<DerivedRecord>,
    pub filter_report: FilterReport,
}

/// Locate, load, filter and derive, strictly in that order.
pub struct IndexPipeline {
    config: PipelineConfig,
}

impl IndexPipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        Ok(Self {
            config: config.validated()?,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Locate and parse the index without filtering.
    pub fn load(
        &self,
        layout: &ProjectLayout,
        progress: Option<&ProgressReporter>,
    ) -> Result<(IndexSource, Vec<IndexRecord>)> {
        let source = IndexSource::locate(&layout.data_dir, &layout.index_file)?;
        info!(path = %source.path.display(), kind = %source.kind, "index located");

        if let Some(progress) = progress {
            progress.set_message(&format!("Reading {}...", source.path.display()));
        }

        let records = IndexReader::from_config(&self.config).read_source(&source, progress)?;
        info!(rows = records.len(), "index parsed");
        Ok((source, records))
    }

    /// Filter then derive an already loaded table.
    pub fn transform(&self, records: Vec<IndexRecord>) -> (Vec<DerivedRecord>, FilterReport) {
        let (kept, filter_report) = RowFilter::from_config(&self.config).apply(records);
        if filter_report.is_empty() {
            warn!(
                input_rows = filter_report.input_rows,
                "no rows left after filtering; outputs will be empty"
            );
        }

        let derived = FieldDeriver::from_config(&self.config).derive_all(&kept);
        (derived, filter_report)
    }

    pub fn run(
        &self,
        layout: &ProjectLayout,
        progress: Option<&ProgressReporter>,
    ) -> Result<PipelineOutput> {
        let (source, records) = self.load(layout, progress)?;
        let (records, filter_report) = self.transform(records);
        Ok(PipelineOutput {
            source,
            records,
            filter_report,
        })
    }
}
