//! Geographic value types

use serde::{Deserialize, Serialize};

use crate::error::GlosaError;

/// A point on the Earth surface in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Build validated coordinates
    pub fn new(lat: f64, lng: f64) -> Result<Self, GlosaError> {
        let coords = Self { lat, lng };
        coords.validate()?;
        Ok(coords)
    }

    /// Reject non-finite values and anything outside -90..90 / -180..180
    pub fn validate(&self) -> Result<(), GlosaError> {
        let lat_ok = self.lat.is_finite() && (-90.0..=90.0).contains(&self.lat);
        let lng_ok = self.lng.is_finite() && (-180.0..=180.0).contains(&self.lng);

        if lat_ok && lng_ok {
            Ok(())
        } else {
            Err(GlosaError::InvalidCoordinate { lat: self.lat, lng: self.lng })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_accept_valid_range() {
        assert!(Coordinates::new(28.6140, 77.2185).is_ok());
        assert!(Coordinates::new(-90.0, -180.0).is_ok());
        assert!(Coordinates::new(90.0, 180.0).is_ok());
    }

    #[test]
    fn test_coordinates_reject_out_of_range() {
        assert!(matches!(
            Coordinates::new(90.5, 0.0),
            Err(GlosaError::InvalidCoordinate { .. })
        ));
        assert!(Coordinates::new(0.0, -180.01).is_err());
    }

    #[test]
    fn test_coordinates_reject_non_finite() {
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
        assert!(Coordinates::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_coordinates_deserialize_from_lat_lng() {
        let coords: Coordinates = serde_json::from_str(r#"{"lat": 28.6, "lng": 77.2}"#).unwrap();
        assert_eq!(coords, Coordinates { lat: 28.6, lng: 77.2 });
    }
}
