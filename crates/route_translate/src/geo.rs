use serde::{Deserialize, Serialize};

/// Default tolerance (degrees) when comparing a vendor coordinate against a
/// decoded polyline point. Roughly one metre at the equator.
pub const DEFAULT_COORDINATE_TOLERANCE_DEG: f64 = 1e-5;

/// A WGS84 coordinate in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Coordinates survive a lossy encode/decode, so bit equality is useless here.
    pub fn approx_eq(&self, other: &GeoPoint, tolerance_deg: f64) -> bool {
        (self.lat - other.lat).abs() < tolerance_deg && (self.lon - other.lon).abs() < tolerance_deg
    }
}

/// Signed shortest angular difference `a1 - a2`, wrapped into (-180, 180].
pub fn degrees_diff(a1: f64, a2: f64) -> f64 {
    let mut diff = (a1 - a2) % 360.0;
    if diff > 180.0 {
        diff -= 360.0;
    } else if diff <= -180.0 {
        diff += 360.0;
    }
    diff
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approx_eq_accepts_sub_tolerance_drift() {
        let decoded = GeoPoint::new(52.51234, 13.40001);
        let vendor = GeoPoint::new(52.512343, 13.400007);
        assert!(decoded.approx_eq(&vendor, DEFAULT_COORDINATE_TOLERANCE_DEG));
    }

    #[test]
    fn approx_eq_rejects_neighbouring_point() {
        let a = GeoPoint::new(52.51234, 13.40001);
        let b = GeoPoint::new(52.51236, 13.40001);
        assert!(!a.approx_eq(&b, DEFAULT_COORDINATE_TOLERANCE_DEG));
    }

    #[test]
    fn degrees_diff_wraps_into_half_open_range() {
        assert_eq!(degrees_diff(100.0, 10.0), 90.0);
        assert_eq!(degrees_diff(10.0, 100.0), -90.0);
        assert_eq!(degrees_diff(350.0, 10.0), -20.0);
        assert_eq!(degrees_diff(10.0, 350.0), 20.0);
        assert_eq!(degrees_diff(180.0, 0.0), 180.0);
        assert_eq!(degrees_diff(0.0, 180.0), 180.0);
        assert_eq!(degrees_diff(720.0, 0.0), 0.0);
    }

    #[test]
    fn degrees_diff_stays_in_range_for_all_bearings() {
        for before in (0..=360).step_by(15) {
            for after in (0..=360).step_by(15) {
                let diff = degrees_diff(f64::from(after), f64::from(before));
                assert!(diff > -180.0 && diff <= 180.0, "{after} - {before} = {diff}");
            }
        }
    }
}
