use crate::models::IndexRecord;
use chrono::NaiveDateTime;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeographicBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl GeographicBounds {
    fn from_records<'a>(records: impl Iterator<Item = &'a IndexRecord>) -> Option<Self> {
        records.fold(None, |bounds: Option<Self>, r| {
            Some(match bounds {
                None => Self {
                    min_lat: r.latitude,
                    max_lat: r.latitude,
                    min_lon: r.longitude,
                    max_lon: r.longitude,
                },
                Some(b) => Self {
                    min_lat: b.min_lat.min(r.latitude),
                    max_lat: b.max_lat.max(r.latitude),
                    min_lon: b.min_lon.min(r.longitude),
                    max_lon: b.max_lon.max(r.longitude),
                },
            })
        })
    }

    fn describe(&self) -> String {
        format!(
            "  Latitude : {:9.4}  →  {:9.4}\n  Longitude: {:9.4}  →  {:9.4}",
            self.min_lat, self.max_lat, self.min_lon, self.max_lon
        )
    }
}

/// Geographic and temporal extents of an index.
#[derive(Debug)]
pub struct ExtentReport {
    pub total_records: usize,
    pub overall: Option<GeographicBounds>,
    /// Extents once placeholder coordinates are excluded.
    pub clean: Option<GeographicBounds>,
    pub date_range: Option<(i64, i64)>,
    pub placeholder_records: Vec<IndexRecord>,
}

impl ExtentReport {
    pub fn detailed_summary(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("Records: {}\n", self.total_records));
        if let Some((first, last)) = self.date_range {
            out.push_str(&format!(
                "Dates  : {}  →  {}\n",
                format_packed_date(first),
                format_packed_date(last)
            ));
        }

        out.push_str("\nOverall:\n");
        out.push_str(&describe_bounds(self.overall));

        out.push_str("\n\nAfter excluding placeholder coordinates (-99.9990 / -999.9990):\n");
        out.push_str(&describe_bounds(self.clean));
        out.push('\n');

        if self.placeholder_records.is_empty() {
            out.push_str("\n✓ No placeholder coordinates found.");
        } else {
            out.push_str(&format!(
                "\n⚠ Found {} record(s) with placeholder coordinates:",
                self.placeholder_records.len()
            ));
            for r in &self.placeholder_records {
                out.push_str(&format!(
                    "\n  {:60}  date={}  lat={:.4}  lon={:.4}",
                    r.file, r.date, r.latitude, r.longitude
                ));
            }
        }

        out
    }
}

fn describe_bounds(bounds: Option<GeographicBounds>) -> String {
    bounds
        .map(|b| b.describe())
        .unwrap_or_else(|| "  (no records)".to_string())
}

/// Render a packed `YYYYMMDDHHMMSS` value, falling back to the raw number.
fn format_packed_date(date: i64) -> String {
    NaiveDateTime::parse_from_str(&date.to_string(), "%Y%m%d%H%M%S")
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|_| date.to_string())
}

pub struct ExtentAnalyzer;

impl ExtentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, records: &[IndexRecord]) -> ExtentReport {
        let date_range = records.iter().fold(None, |range: Option<(i64, i64)>, r| {
            Some(match range {
                None => (r.date, r.date),
                Some((first, last)) => (first.min(r.date), last.max(r.date)),
            })
        });

        ExtentReport {
            total_records: records.len(),
            overall: GeographicBounds::from_records(records.iter()),
            clean: GeographicBounds::from_records(
                records.iter().filter(|r| !r.has_placeholder_position()),
            ),
            date_range,
            placeholder_records: records
                .iter()
                .filter(|r| r.has_placeholder_position())
                .cloned()
                .collect(),
        }
    }
}

impl Default for ExtentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn records() -> Vec<IndexRecord> {
        vec![
            IndexRecord::new("a/R1_001.nc".to_string(), 19970729200300, 0.267, -16.032),
            IndexRecord::new("a/R1_002.nc".to_string(), 20050101120000, -99.999, -999.999),
            IndexRecord::new("a/R1_003.nc".to_string(), 20010315000000, 45.5, 170.25),
        ]
    }

    #[test]
    fn test_extents_with_and_without_placeholders() {
        let report = ExtentAnalyzer::new().analyze(&records());

        assert_eq!(report.total_records, 3);
        let overall = report.overall.unwrap();
        assert_eq!(overall.min_lat, -99.999);
        assert_eq!(overall.min_lon, -999.999);

        assert_eq!(
            report.clean,
            Some(GeographicBounds {
                min_lat: 0.267,
                max_lat: 45.5,
                min_lon: -16.032,
                max_lon: 170.25,
            })
        );
        assert_eq!(report.date_range, Some((19970729200300, 20050101120000)));
        assert_eq!(report.placeholder_records.len(), 1);
        assert_eq!(report.placeholder_records[0].file, "a/R1_002.nc");
    }

    #[test]
    fn test_summary_text() {
        let summary = ExtentAnalyzer::new().analyze(&records()).detailed_summary();
        assert!(summary.contains("1997-07-29 20:03:00"));
        assert!(summary.contains("Found 1 record(s) with placeholder coordinates"));
        assert!(summary.contains("a/R1_002.nc"));
    }

    #[test]
    fn test_empty_index() {
        let report = ExtentAnalyzer::new().analyze(&[]);
        assert_eq!(report.overall, None);
        assert!(report.detailed_summary().contains("(no records)"));
        assert!(report.detailed_summary().contains("No placeholder coordinates found"));
    }

    #[test]
    fn test_unparseable_date_falls_back_to_raw() {
        assert_eq!(format_packed_date(99999999999999), "99999999999999");
    }
}
