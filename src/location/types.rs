//! Coordinate types.

use serde::{Deserialize, Serialize};

/// A geographic position as reported by the device.
///
/// Construction validates both components: non-finite or out-of-range
/// values fall back to 0.0 rather than propagating corrupted GPS data
/// into downstream lookups.
///
/// # Example
///
/// ```
/// use aegis_core::location::Coordinates;
///
/// let position = Coordinates::new(37.7749, -122.4194);
/// assert_eq!(position.latitude, 37.7749);
///
/// // Corrupted input is neutralized, not propagated.
/// let bad = Coordinates::new(f64::NAN, 200.0);
/// assert_eq!(bad.latitude, 0.0);
/// assert_eq!(bad.longitude, 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees, always within [-90, 90].
    pub latitude: f64,
    /// Longitude in decimal degrees, always within [-180, 180].
    pub longitude: f64,
}

impl Coordinates {
    /// Creates a validated coordinate pair.
    ///
    /// Latitude must be -90.0 to 90.0, longitude must be -180.0 to 180.0.
    /// Invalid components default to 0.0 so malicious or corrupted data
    /// is never processed downstream.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        let latitude = if latitude.is_finite() && (-90.0..=90.0).contains(&latitude) {
            latitude
        } else {
            0.0
        };

        let longitude = if longitude.is_finite() && (-180.0..=180.0).contains(&longitude) {
            longitude
        } else {
            0.0
        };

        Self {
            latitude,
            longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_valid_coordinates() {
        let position = Coordinates::new(37.7749, -122.4194);
        assert_eq!(position.latitude, 37.7749);
        assert_eq!(position.longitude, -122.4194);
    }

    #[test]
    fn new_accepts_valid_boundaries() {
        let north_pole = Coordinates::new(90.0, 0.0);
        assert_eq!(north_pole.latitude, 90.0);

        let south_pole = Coordinates::new(-90.0, 0.0);
        assert_eq!(south_pole.latitude, -90.0);

        let date_line = Coordinates::new(0.0, 180.0);
        assert_eq!(date_line.longitude, 180.0);

        let neg_date_line = Coordinates::new(0.0, -180.0);
        assert_eq!(neg_date_line.longitude, -180.0);
    }

    #[test]
    fn new_rejects_nan_latitude() {
        let position = Coordinates::new(f64::NAN, -122.4194);
        assert_eq!(position.latitude, 0.0);
        assert_eq!(position.longitude, -122.4194);
    }

    #[test]
    fn new_rejects_infinite_longitude() {
        let position = Coordinates::new(37.7749, f64::INFINITY);
        assert_eq!(position.latitude, 37.7749);
        assert_eq!(position.longitude, 0.0);
    }

    #[test]
    fn new_rejects_out_of_range_latitude() {
        assert_eq!(Coordinates::new(91.0, 0.0).latitude, 0.0);
        assert_eq!(Coordinates::new(-91.0, 0.0).latitude, 0.0);
    }

    #[test]
    fn new_rejects_out_of_range_longitude() {
        assert_eq!(Coordinates::new(0.0, 181.0).longitude, 0.0);
        assert_eq!(Coordinates::new(0.0, -181.0).longitude, 0.0);
    }

    #[test]
    fn roundtrip_json() {
        let original = Coordinates::new(48.8566, 2.3522);
        let json = serde_json::to_string(&original).unwrap();
        let recovered: Coordinates = serde_json::from_str(&json).unwrap();
        assert_eq!(original, recovered);
    }
}
