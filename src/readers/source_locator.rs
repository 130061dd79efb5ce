use crate::error::{LookupError, Result};
use crate::utils::constants::{DEFAULT_BUFFER_SIZE, GZIP_SUFFIX};
use flate2::read::MultiGzDecoder;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Plain,
    Gzip,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Plain => write!(f, "plain text"),
            SourceKind::Gzip => write!(f, "gzip"),
        }
    }
}

/// A located copy of the master index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSource {
    pub path: PathBuf,
    pub kind: SourceKind,
}

impl IndexSource {
    /// Find `<data_dir>/<base>`, falling back to `<base>.gz`.
    pub fn locate(data_dir: &Path, base: &str) -> Result<Self> {
        let plain = data_dir.join(base);
        if plain.is_file() {
            return Ok(Self {
                path: plain,
                kind: SourceKind::Plain,
            });
        }

        let gzip = data_dir.join(format!("{}{}", base, GZIP_SUFFIX));
        if gzip.is_file() {
            return Ok(Self {
                path: gzip,
                kind: SourceKind::Gzip,
            });
        }

        Err(LookupError::SourceNotFound {
            data_dir: data_dir.to_path_buf(),
            base: base.to_string(),
        })
    }

    /// Open the source as a buffered text stream, decompressing if needed.
    pub fn open(&self) -> Result<Box<dyn BufRead>> {
        let file = File::open(&self.path)?;
        match self.kind {
            SourceKind::Plain => Ok(Box::new(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file))),
            SourceKind::Gzip => Ok(Box::new(BufReader::with_capacity(
                DEFAULT_BUFFER_SIZE,
                MultiGzDecoder::new(file),
            ))),
        }
    }
}
