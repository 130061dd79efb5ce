use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::utils::coordinates::is_placeholder;

/// One row of the GDAC profile index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexRecord {
    /// Profile path relative to the GDAC `dac/` directory.
    pub file: String,

    /// Packed `YYYYMMDDHHMMSS` timestamp.
    pub date: i64,

    pub latitude: f64,

    pub longitude: f64,

    /// Other requested columns, kept verbatim.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,

    /// Physical line number in the source file.
    #[serde(default)]
    pub line: usize,
}

impl IndexRecord {
    pub fn new(file: String, date: i64, latitude: f64, longitude: f64) -> Self {
        Self {
            file,
            date,
            latitude,
            longitude,
            extra: BTreeMap::new(),
            line: 0,
        }
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    pub fn has_placeholder_position(&self) -> bool {
        is_placeholder(self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_position() {
        let good = IndexRecord::new(
            "aoml/13857/profiles/R13857_001.nc".to_string(),
            19970729053000,
            0.267,
            -16.032,
        );
        assert!(!good.has_placeholder_position());

        let bad_lat = IndexRecord::new("a.nc".to_string(), 20000101000000, -99.999, 10.0);
        assert!(bad_lat.has_placeholder_position());

        let bad_lon = IndexRecord::new("b.nc".to_string(), 20000101000000, 10.0, -999.999);
        assert!(bad_lon.has_placeholder_position());
    }
}
