//! Run configuration.
//!
//! Everything the pipeline needs is resolved here once at startup and
//! passed down explicitly: the directory layout (defaults, then an optional
//! TOML file, then `ARGO_LOOKUP_*` environment variables, then CLI flags)
//! and the per-run [`PipelineConfig`] chosen by the command preset.

use crate::error::{LookupError, Result};
use crate::utils::constants::{DATA_DIR, DEFAULT_SAMPLE_ROWS, DOCS_DIR, ENV_PREFIX, INDEX_FILE};
use clap::ValueEnum;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use validator::Validate;

/// How `lon_round` is expressed in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LongitudeMode {
    /// Rounded as given, [-180, 180].
    #[default]
    Signed,
    /// Wrapped into [0, 360) before rounding.
    Normalized,
}

impl fmt::Display for LongitudeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LongitudeMode::Signed => write!(f, "signed"),
            LongitudeMode::Normalized => write!(f, "normalized"),
        }
    }
}

/// Options recognised by the index pipeline.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct PipelineConfig {
    pub partition_by_year: bool,
    pub filter_delayed_mode_only: bool,
    pub longitude_mode: LongitudeMode,
    #[validate(range(min = 1))]
    pub row_limit: Option<usize>,
    /// Column subset to load; `None` loads every column.
    pub columns: Option<Vec<String>>,
}

impl PipelineConfig {
    /// Whole index, one table, signed longitudes.
    pub fn full_table() -> Self {
        Self {
            partition_by_year: false,
            filter_delayed_mode_only: false,
            longitude_mode: LongitudeMode::Signed,
            row_limit: None,
            columns: None,
        }
    }

    /// One table per year, longitudes in [0, 360).
    pub fn by_year() -> Self {
        Self {
            partition_by_year: true,
            longitude_mode: LongitudeMode::Normalized,
            ..Self::full_table()
        }
    }

    /// First `rows` data rows only.
    pub fn sample(rows: usize) -> Self {
        Self {
            row_limit: Some(rows),
            ..Self::full_table()
        }
    }

    pub fn with_delayed_mode_only(mut self, enabled: bool) -> Self {
        self.filter_delayed_mode_only = enabled;
        self
    }

    pub fn with_longitude_mode(mut self, mode: LongitudeMode) -> Self {
        self.longitude_mode = mode;
        self
    }

    pub fn with_row_limit(mut self, row_limit: Option<usize>) -> Self {
        self.row_limit = row_limit;
        self
    }

    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = Some(columns);
        self
    }

    pub fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::sample(DEFAULT_SAMPLE_ROWS)
    }
}

#[derive(Debug, Default, Deserialize)]
struct LayoutSettings {
    data_dir: Option<PathBuf>,
    docs_dir: Option<PathBuf>,
    index_file: Option<String>,
}

/// Where inputs are read and outputs written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub root: PathBuf,
    pub data_dir: PathBuf,
    pub docs_dir: PathBuf,
    pub index_file: String,
}

impl ProjectLayout {
    /// Default `data/` and `docs/` under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            data_dir: root.join(DATA_DIR),
            docs_dir: root.join(DOCS_DIR),
            index_file: INDEX_FILE.to_string(),
            root,
        }
    }

    /// Layer an optional config file and the environment over the defaults.
    pub fn load(root: impl Into<PathBuf>, config_file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX));

        let settings: LayoutSettings = builder.build()?.try_deserialize()?;
        Ok(Self::new(root)
            .with_data_dir(settings.data_dir)
            .with_docs_dir(settings.docs_dir)
            .with_index_file(settings.index_file))
    }

    /// Relative paths are taken from the project root.
    pub fn with_data_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.data_dir = self.root.join(dir);
        }
        self
    }

    pub fn with_docs_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.docs_dir = self.root.join(dir);
        }
        self
    }

    pub fn with_index_file(mut self, name: Option<String>) -> Self {
        if let Some(name) = name {
            self.index_file = name;
        }
        self
    }

    pub fn check(&self) -> Result<()> {
        if self.index_file.trim().is_empty() {
            return Err(LookupError::Config("index file name is empty".to_string()));
        }
        if self.index_file.contains(['/', '\\']) {
            return Err(LookupError::Config(format!(
                "index file must be a bare file name inside the data directory, got '{}'",
                self.index_file
            )));
        }
        Ok(())
    }

    pub fn ensure_output_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.docs_dir)?;
        Ok(())
    }
}
