use crate::utils::constants::{MISSING_LATITUDE, MISSING_LONGITUDE};

/// Round to the nearest whole degree, ties to even.
///
/// # Examples
/// ```
/// use argo_index_lookup::utils::coordinates::round_degrees;
///
/// assert_eq!(round_degrees(0.5), 0);
/// assert_eq!(round_degrees(1.5), 2);
/// assert_eq!(round_degrees(-16.3), -16);
/// ```
pub fn round_degrees(value: f64) -> i32 {
    value.round_ties_even() as i32
}

/// Bring a longitude into [0, 360) without rounding.
pub fn normalize_longitude(longitude: f64) -> f64 {
    ((longitude % 360.0) + 360.0) % 360.0
}

/// Normalize then round a longitude, keeping the result in [0, 360).
///
/// # Examples
/// ```
/// use argo_index_lookup::utils::coordinates::round_longitude_360;
///
/// assert_eq!(round_longitude_360(-16.3), 344);
/// assert_eq!(round_longitude_360(359.6), 0);
/// ```
pub fn round_longitude_360(longitude: f64) -> i32 {
    let rounded = round_degrees(normalize_longitude(longitude));
    if rounded >= 360 {
        rounded - 360
    } else {
        rounded
    }
}

/// True when either coordinate carries the GDAC "not available" sentinel.
pub fn is_placeholder(latitude: f64, longitude: f64) -> bool {
    latitude == MISSING_LATITUDE || longitude == MISSING_LONGITUDE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_degrees_ties_to_even() {
        assert_eq!(round_degrees(0.5), 0);
        assert_eq!(round_degrees(1.5), 2);
        assert_eq!(round_degrees(2.5), 2);
        assert_eq!(round_degrees(-0.5), 0);
        assert_eq!(round_degrees(-89.5), -90);
        assert_eq!(round_degrees(89.4), 89);
    }

    #[test]
    fn test_normalize_longitude() {
        assert!((normalize_longitude(-16.3) - 343.7).abs() < 1e-9);
        assert!((normalize_longitude(725.0) - 5.0).abs() < 1e-9);
        assert_eq!(normalize_longitude(0.0), 0.0);
        assert_eq!(normalize_longitude(360.0), 0.0);
        assert_eq!(normalize_longitude(-360.0), 0.0);
        assert_eq!(normalize_longitude(-180.0), 180.0);
    }

    #[test]
    fn test_round_longitude_360_stays_half_open() {
        assert_eq!(round_longitude_360(0.0), 0);
        assert_eq!(round_longitude_360(360.0), 0);
        assert_eq!(round_longitude_360(359.6), 0);
        assert_eq!(round_longitude_360(-0.4), 0);
        assert_eq!(round_longitude_360(-16.3), 344);
        assert_eq!(round_longitude_360(179.9), 180);

        for tenth in -7200..=7200 {
            let lon = tenth as f64 / 10.0;
            let rounded = round_longitude_360(lon);
            assert!((0..360).contains(&rounded), "{} -> {}", lon, rounded);
        }
    }

    #[test]
    fn test_is_placeholder_exact_match() {
        assert!(is_placeholder(-99.999, 10.0));
        assert!(is_placeholder(10.0, -999.999));
        assert!(is_placeholder("-99.9990".parse().unwrap(), 0.0));
        assert!(!is_placeholder(-99.998, -999.998));
        assert!(!is_placeholder(-90.0, -180.0));
    }
}
