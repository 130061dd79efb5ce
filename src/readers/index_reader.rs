use crate::config::PipelineConfig;
use crate::error::{LookupError, Result};
use crate::models::IndexRecord;
use crate::readers::IndexSource;
use crate::utils::constants::{COL_DATE, COL_FILE, COL_LATITUDE, COL_LONGITUDE, REQUIRED_COLUMNS};
use crate::utils::progress::ProgressReporter;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::{BTreeMap, HashMap};
use std::io::{BufRead, ErrorKind, Lines};
use tracing::debug;

const PROGRESS_INTERVAL: usize = 250_000;

/// Parses the comma-delimited profile index.
pub struct IndexReader {
    columns: Option<Vec<String>>,
    row_limit: Option<usize>,
}

/// Column positions resolved from the header row.
struct ColumnMap {
    file: usize,
    date: usize,
    latitude: usize,
    longitude: usize,
    extra: Vec<(String, usize)>,
    width: usize,
}

impl IndexReader {
    pub fn new() -> Self {
        Self {
            columns: None,
            row_limit: None,
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            columns: config.columns.clone(),
            row_limit: config.row_limit,
        }
    }

    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = Some(columns);
        self
    }

    pub fn with_row_limit(mut self, row_limit: usize) -> Self {
        self.row_limit = Some(row_limit);
        self
    }

    /// Open a located index and read it.
    pub fn read_source(
        &self,
        source: &IndexSource,
        progress: Option<&ProgressReporter>,
    ) -> Result<Vec<IndexRecord>> {
        debug!(path = %source.path.display(), kind = %source.kind, "reading index");
        self.read(source.open()?, progress)
    }

    /// Read every data row from `reader`, failing on the first malformed one.
    pub fn read<R: BufRead>(
        &self,
        reader: R,
        progress: Option<&ProgressReporter>,
    ) -> Result<Vec<IndexRecord>> {
        let mut splitter = ReaderBuilder::new();
        splitter.has_headers(false).trim(Trim::All).buffer_capacity(1024);

        let mut lines = reader.lines();
        let mut line_no = 0;

        let header = match next_content_line(&mut lines, &mut line_no)? {
            Some(line) => split_fields(&splitter, &line, line_no)?,
            None => return Err(LookupError::parse(line_no, "index has no header row")),
        };
        let map = self.resolve_columns(&header, line_no)?;

        let mut records = Vec::new();
        while self.row_limit.map_or(true, |limit| records.len() < limit) {
            let Some(line) = next_content_line(&mut lines, &mut line_no)? else {
                break;
            };
            let fields = split_fields(&splitter, &line, line_no)?;
            records.push(parse_row(&fields, &map, line_no)?);

            if records.len() % PROGRESS_INTERVAL == 0 {
                if let Some(progress) = progress {
                    progress.set_message(&format!("Loaded {} rows", records.len()));
                }
            }
        }

        debug!(rows = records.len(), lines = line_no, "index loaded");
        Ok(records)
    }

    fn resolve_columns(&self, header: &StringRecord, line_no: usize) -> Result<ColumnMap> {
        let positions: HashMap<&str, usize> = header
            .iter()
            .enumerate()
            .map(|(i, name)| (name, i))
            .collect();

        let find = |name: &str| {
            positions.get(name).copied().ok_or_else(|| {
                LookupError::parse(line_no, format!("header is missing column '{}'", name))
            })
        };

        let wanted: Vec<String> = match self.columns {
            Some(ref requested) => {
                for required in REQUIRED_COLUMNS {
                    if !requested.iter().any(|c| c == required) {
                        return Err(LookupError::Config(format!(
                            "column subset must include '{}'",
                            required
                        )));
                    }
                }
                requested.clone()
            }
            None => header.iter().map(str::to_string).collect(),
        };

        let mut extra = Vec::new();
        for name in wanted {
            let index = find(&name)?;
            if !REQUIRED_COLUMNS.contains(&name.as_str()) {
                extra.push((name, index));
            }
        }

        Ok(ColumnMap {
            file: find(COL_FILE)?,
            date: find(COL_DATE)?,
            latitude: find(COL_LATITUDE)?,
            longitude: find(COL_LONGITUDE)?,
            extra,
            width: header.len(),
        })
    }
}

impl Default for IndexReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Next line that is neither blank nor a `#` comment.
fn next_content_line<B: BufRead>(lines: &mut Lines<B>, line_no: &mut usize) -> Result<Option<String>> {
    for line_result in lines.by_ref() {
        *line_no += 1;
        let line = line_result.map_err(|e| match e.kind() {
            ErrorKind::InvalidData => LookupError::parse(*line_no, "invalid UTF-8"),
            _ => LookupError::Io(e),
        })?;

        let trimmed = line.trim_start();
        if !trimmed.is_empty() && !trimmed.starts_with('#') {
            return Ok(Some(line));
        }
    }
    Ok(None)
}

fn split_fields(splitter: &ReaderBuilder, line: &str, line_no: usize) -> Result<StringRecord> {
    let mut reader = splitter.from_reader(line.as_bytes());
    match reader.records().next() {
        Some(Ok(record)) => Ok(record),
        Some(Err(e)) => Err(LookupError::parse(line_no, e.to_string())),
        None => Ok(StringRecord::new()),
    }
}

fn parse_row(fields: &StringRecord, map: &ColumnMap, line_no: usize) -> Result<IndexRecord> {
    if fields.len() != map.width {
        return Err(LookupError::parse(
            line_no,
            format!("expected {} fields, found {}", map.width, fields.len()),
        ));
    }

    let field = |index: usize| fields.get(index).unwrap_or_default();

    let date = field(map.date).parse::<i64>().map_err(|_| {
        LookupError::parse(line_no, format!("invalid date: '{}'", field(map.date)))
    })?;
    let latitude = parse_degrees(field(map.latitude), COL_LATITUDE, line_no)?;
    let longitude = parse_degrees(field(map.longitude), COL_LONGITUDE, line_no)?;

    let mut record =
        IndexRecord::new(field(map.file).to_string(), date, latitude, longitude).with_line(line_no);
    record.extra = map
        .extra
        .iter()
        .map(|(name, index)| (name.clone(), field(*index).to_string()))
        .collect::<BTreeMap<_, _>>();

    Ok(record)
}

fn parse_degrees(value: &str, column: &str, line_no: usize) -> Result<f64> {
    match value.parse::<f64>() {
        Ok(degrees) if degrees.is_finite() => Ok(degrees),
        _ => Err(LookupError::parse(
            line_no,
            format!("invalid {}: '{}'", column, value),
        )),
    }
}
