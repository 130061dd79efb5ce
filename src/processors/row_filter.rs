use crate::config::PipelineConfig;
use crate::models::IndexRecord;
use crate::utils::filename::is_delayed_mode_core;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterReport {
    pub input_rows: usize,
    /// Rows left after the delayed-mode pattern, when it was applied.
    pub pattern_retained: Option<usize>,
    pub placeholders_removed: usize,
    pub output_rows: usize,
}

impl FilterReport {
    pub fn is_empty(&self) -> bool {
        self.output_rows == 0
    }

    pub fn summary(&self) -> String {
        let mut lines = Vec::new();
        if let Some(retained) = self.pattern_retained {
            lines.push(format!(
                "Kept {} of {} rows matching delayed-mode core files (D*.nc)",
                retained, self.input_rows
            ));
        }
        if self.placeholders_removed > 0 {
            lines.push(format!(
                "Removed {} rows with placeholder lat/lon",
                self.placeholders_removed
            ));
        }
        lines.push(format!("Rows in table: {}", self.output_rows));
        lines.join("\n")
    }
}

/// Drops rows that must never reach the lookup tables.
pub struct RowFilter {
    delayed_mode_only: bool,
}

impl RowFilter {
    pub fn new() -> Self {
        Self {
            delayed_mode_only: false,
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            delayed_mode_only: config.filter_delayed_mode_only,
        }
    }

    pub fn with_delayed_mode_only(mut self, enabled: bool) -> Self {
        self.delayed_mode_only = enabled;
        self
    }

    /// Pattern filter first (if enabled), then the placeholder filter.
    pub fn apply(&self, records: Vec<IndexRecord>) -> (Vec<IndexRecord>, FilterReport) {
        let input_rows = records.len();

        let (records, pattern_retained) = if self.delayed_mode_only {
            let kept: Vec<IndexRecord> = records
                .into_iter()
                .filter(|r| is_delayed_mode_core(&r.file))
                .collect();
            info!(retained = kept.len(), input_rows, "delayed-mode filter applied");
            let retained = kept.len();
            (kept, Some(retained))
        } else {
            (records, None)
        };

        let before = records.len();
        let records: Vec<IndexRecord> = records
            .into_iter()
            .filter(|r| !r.has_placeholder_position())
            .collect();
        let placeholders_removed = before - records.len();
        info!(removed = placeholders_removed, "placeholder filter applied");

        let report = FilterReport {
            input_rows,
            pattern_retained,
            placeholders_removed,
            output_rows: records.len(),
        };
        (records, report)
    }
}

impl Default for RowFilter {
    fn default() -> Self {
        Self::new()
    }
}
