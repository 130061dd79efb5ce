use serde::{Deserialize, Serialize};

use crate::utils::constants::MONTH_DAY_DIVISOR;

/// Reduced record persisted in the lookup tables.
///
/// Field order is the JSON key order the browser expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedRecord {
    pub file: String,

    #[serde(rename = "YYYYMMDD")]
    pub yyyymmdd: i64,

    pub lat_round: i32,

    pub lon_round: i32,
}

impl DerivedRecord {
    pub fn new(file: String, yyyymmdd: i64, lat_round: i32, lon_round: i32) -> Self {
        Self {
            file,
            yyyymmdd,
            lat_round,
            lon_round,
        }
    }

    /// Partition key; not serialized.
    pub fn year(&self) -> i64 {
        self.yyyymmdd / MONTH_DAY_DIVISOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_key_order() {
        let record = DerivedRecord::new(
            "aoml/13857/profiles/R13857_001.nc".to_string(),
            19970729,
            0,
            -16,
        );
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"file":"aoml/13857/profiles/R13857_001.nc","YYYYMMDD":19970729,"lat_round":0,"lon_round":-16}"#
        );
        assert_eq!(record.year(), 1997);
    }
}
