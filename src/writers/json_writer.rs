use crate::error::Result;
use crate::models::DerivedRecord;
use crate::utils::constants::BYTES_PER_MB;
use crate::utils::filename::{display_relative, year_file_path};
use flate2::{Compression, GzBuilder};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// What ended up on disk for one output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFileInfo {
    pub path: PathBuf,
    pub rows: usize,
    pub file_size: u64,
    pub compressed: bool,
}

impl OutputFileInfo {
    pub fn size_mb(&self) -> f64 {
        self.file_size as f64 / BYTES_PER_MB
    }

    /// One report line, e.g. `✓ wrote docs/2004.json (1,204 rows, 0.09 MB)`.
    pub fn summary(&self, root: &Path) -> String {
        format!(
            "✓ wrote {} ({} rows, {:.2} MB{})",
            display_relative(&self.path, root),
            group_thousands(self.rows),
            self.size_mb(),
            if self.compressed { " gzip" } else { "" }
        )
    }
}

/// Serializes lookup records as a compact JSON array of objects.
pub struct LookupWriter {
    compression: Compression,
}

impl LookupWriter {
    pub fn new() -> Self {
        Self {
            compression: Compression::default(),
        }
    }

    pub fn with_compression_level(mut self, level: u32) -> Self {
        self.compression = Compression::new(level.min(9));
        self
    }

    pub fn to_json_bytes<T: Serialize>(&self, records: &[T]) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(records)?)
    }

    pub fn write_json<T: Serialize>(&self, records: &[T], path: &Path) -> Result<OutputFileInfo> {
        let bytes = self.to_json_bytes(records)?;
        self.write_bytes(&bytes, records.len(), path)
    }

    pub fn write_json_gz<T: Serialize>(
        &self,
        records: &[T],
        path: &Path,
    ) -> Result<OutputFileInfo> {
        let bytes = self.to_json_bytes(records)?;
        self.write_gzip_bytes(&bytes, records.len(), path)
    }

    /// Plain JSON at `plain`, plus the same bytes gzip-compressed at `gzip`.
    pub fn write_single(
        &self,
        records: &[DerivedRecord],
        plain: &Path,
        gzip: Option<&Path>,
    ) -> Result<Vec<OutputFileInfo>> {
        let bytes = self.to_json_bytes(records)?;
        let mut written = vec![self.write_bytes(&bytes, records.len(), plain)?];
        if let Some(gzip) = gzip {
            written.push(self.write_gzip_bytes(&bytes, records.len(), gzip)?);
        }
        Ok(written)
    }

    /// One `<YEAR>.json` per distinct year in `dir`, ascending.
    pub fn write_partitioned(
        &self,
        records: &[DerivedRecord],
        dir: &Path,
    ) -> Result<Vec<OutputFileInfo>> {
        partition_by_year(records)
            .into_iter()
            .map(|(year, group)| self.write_json(&group, &year_file_path(dir, year)))
            .collect()
    }

    /// Byte-copy an already written output under another name.
    pub fn duplicate(&self, written: &OutputFileInfo, dest: &Path) -> Result<OutputFileInfo> {
        let file_size = std::fs::copy(&written.path, dest)?;
        debug!(from = %written.path.display(), to = %dest.display(), "duplicated output");
        Ok(OutputFileInfo {
            path: dest.to_path_buf(),
            file_size,
            ..written.clone()
        })
    }

    fn write_bytes(&self, bytes: &[u8], rows: usize, path: &Path) -> Result<OutputFileInfo> {
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(bytes)?;
        writer.flush()?;
        self.file_info(path, rows, false)
    }

    fn write_gzip_bytes(&self, bytes: &[u8], rows: usize, path: &Path) -> Result<OutputFileInfo> {
        // mtime 0 keeps the gzip header identical between runs
        let mut encoder = GzBuilder::new()
            .mtime(0)
            .write(BufWriter::new(File::create(path)?), self.compression);
        encoder.write_all(bytes)?;
        encoder.finish()?.flush()?;
        self.file_info(path, rows, true)
    }

    fn file_info(&self, path: &Path, rows: usize, compressed: bool) -> Result<OutputFileInfo> {
        let file_size = std::fs::metadata(path)?.len();
        debug!(path = %path.display(), rows, file_size, "wrote output");
        Ok(OutputFileInfo {
            path: path.to_path_buf(),
            rows,
            file_size,
            compressed,
        })
    }
}

impl Default for LookupWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Group records by year, preserving input order inside each year.
pub fn partition_by_year(records: &[DerivedRecord]) -> BTreeMap<i64, Vec<&DerivedRecord>> {
    let mut groups: BTreeMap<i64, Vec<&DerivedRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.year()).or_default().push(record);
    }
    groups
}

fn group_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use pretty_assertions::assert_eq;
    use std::io::Read;
    use tempfile::TempDir;

    fn records() -> Vec<DerivedRecord> {
        vec![
            DerivedRecord::new("aoml/13857/profiles/R13857_001.nc".to_string(), 19970729, 0, 344),
            DerivedRecord::new("aoml/13857/profiles/R13857_002.nc".to_string(), 20010102, 1, 342),
            DerivedRecord::new("aoml/13857/profiles/R13857_003.nc".to_string(), 19971231, 1, 340),
        ]
    }

    #[test]
    fn test_write_single_with_gzip_copy() -> Result<()> {
        let dir = TempDir::new()?;
        let plain = dir.path().join("search_table.json");
        let gzip = dir.path().join("search_table.json.gz");

        let written = LookupWriter::new().write_single(&records(), &plain, Some(&gzip))?;
        assert_eq!(written.len(), 2);
        assert_eq!(written[0].rows, 3);
        assert!(!written[0].compressed);
        assert!(written[1].compressed);

        let plain_bytes = std::fs::read(&plain)?;
        let mut unzipped = Vec::new();
        GzDecoder::new(File::open(&gzip)?).read_to_end(&mut unzipped)?;
        assert_eq!(plain_bytes, unzipped);

        let parsed: Vec<DerivedRecord> = serde_json::from_slice(&plain_bytes)?;
        assert_eq!(parsed, records());
        Ok(())
    }

    #[test]
    fn test_empty_table_is_empty_array() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("search_table.json");
        let info = LookupWriter::new().write_json::<DerivedRecord>(&[], &path)?;
        assert_eq!(info.rows, 0);
        assert_eq!(std::fs::read_to_string(&path)?, "[]");
        Ok(())
    }

    #[test]
    fn test_write_partitioned_by_year() -> Result<()> {
        let dir = TempDir::new()?;
        let written = LookupWriter::new().write_partitioned(&records(), dir.path())?;

        let names: Vec<String> = written
            .iter()
            .map(|w| w.path.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["1997.json", "2001.json"]);
        assert_eq!(written[0].rows, 2);
        assert_eq!(written[1].rows, 1);

        let year_1997: Vec<DerivedRecord> =
            serde_json::from_slice(&std::fs::read(dir.path().join("1997.json"))?)?;
        assert!(year_1997.iter().all(|r| r.year() == 1997));
        Ok(())
    }

    #[test]
    fn test_gzip_output_is_reproducible() -> Result<()> {
        let dir = TempDir::new()?;
        let first = dir.path().join("a.json.gz");
        let second = dir.path().join("b.json.gz");
        let writer = LookupWriter::new();
        writer.write_json_gz(&records(), &first)?;
        writer.write_json_gz(&records(), &second)?;
        assert_eq!(std::fs::read(first)?, std::fs::read(second)?);
        Ok(())
    }

    #[test]
    fn test_duplicate_copies_bytes() -> Result<()> {
        let dir = TempDir::new()?;
        let writer = LookupWriter::new();
        let original = writer.write_json_gz(&records(), &dir.path().join("sample.json.gz"))?;
        let copy = writer.duplicate(&original, &dir.path().join("search_table.json"))?;

        assert_eq!(copy.rows, original.rows);
        assert_eq!(copy.file_size, original.file_size);
        assert_eq!(std::fs::read(&original.path)?, std::fs::read(&copy.path)?);
        Ok(())
    }

    #[test]
    fn test_summary_line() {
        let info = OutputFileInfo {
            path: PathBuf::from("/repo/docs/2004.json"),
            rows: 1_204_331,
            file_size: 3 * 1_048_576,
            compressed: false,
        };
        assert_eq!(
            info.summary(Path::new("/repo")),
            "✓ wrote docs/2004.json (1,204,331 rows, 3.00 MB)"
        );
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
    }
}
