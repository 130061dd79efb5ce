use crate::config::{LongitudeMode, PipelineConfig};
use crate::models::{DerivedRecord, IndexRecord};
use crate::utils::constants::TIME_OF_DAY_DIVISOR;
use crate::utils::coordinates::{round_degrees, round_longitude_360};

/// Maps filtered index rows to the persisted lookup records.
pub struct FieldDeriver {
    longitude_mode: LongitudeMode,
}

impl FieldDeriver {
    pub fn new(longitude_mode: LongitudeMode) -> Self {
        Self { longitude_mode }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.longitude_mode)
    }

    pub fn derive(&self, record: &IndexRecord) -> DerivedRecord {
        let lon_round = match self.longitude_mode {
            LongitudeMode::Signed => round_degrees(record.longitude),
            LongitudeMode::Normalized => round_longitude_360(record.longitude),
        };

        DerivedRecord::new(
            record.file.clone(),
            record.date / TIME_OF_DAY_DIVISOR,
            round_degrees(record.latitude),
            lon_round,
        )
    }

    pub fn derive_all(&self, records: &[IndexRecord]) -> Vec<DerivedRecord> {
        records.iter().map(|r| self.derive(r)).collect()
    }
}

impl Default for FieldDeriver {
    fn default() -> Self {
        Self::new(LongitudeMode::Signed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(date: i64, latitude: f64, longitude: f64) -> IndexRecord {
        IndexRecord::new(
            "aoml/13857/profiles/R13857_001.nc".to_string(),
            date,
            latitude,
            longitude,
        )
    }

    #[test]
    fn test_date_truncation() {
        let derived = FieldDeriver::default().derive(&record(19970729053000, 0.267, -16.032));
        assert_eq!(derived.yyyymmdd, 19970729);
        assert_eq!(derived.year(), 1997);
        assert_eq!(derived.file, "aoml/13857/profiles/R13857_001.nc");
    }

    #[test]
    fn test_signed_longitude() {
        let deriver = FieldDeriver::new(LongitudeMode::Signed);
        let derived = deriver.derive(&record(20200101000000, 0.267, -16.3));
        assert_eq!(derived.lat_round, 0);
        assert_eq!(derived.lon_round, -16);

        let derived = deriver.derive(&record(20200101000000, -45.6, 179.7));
        assert_eq!(derived.lat_round, -46);
        assert_eq!(derived.lon_round, 180);
    }

    #[test]
    fn test_normalized_longitude() {
        let deriver = FieldDeriver::new(LongitudeMode::Normalized);

        assert_eq!(deriver.derive(&record(20200101000000, 0.0, -16.3)).lon_round, 344);
        assert_eq!(deriver.derive(&record(20200101000000, 0.0, 0.0)).lon_round, 0);
        assert_eq!(deriver.derive(&record(20200101000000, 0.0, 360.0)).lon_round, 0);
        assert_eq!(deriver.derive(&record(20200101000000, 0.0, 359.6)).lon_round, 0);
        assert_eq!(deriver.derive(&record(20200101000000, 0.0, -180.0)).lon_round, 180);
    }

    #[test]
    fn test_latitude_ties_to_even() {
        let deriver = FieldDeriver::default();
        assert_eq!(deriver.derive(&record(20200101000000, 89.5, 0.0)).lat_round, 90);
        assert_eq!(deriver.derive(&record(20200101000000, 88.5, 0.0)).lat_round, 88);
        assert_eq!(deriver.derive(&record(20200101000000, -0.5, 0.0)).lat_round, 0);
    }
}
