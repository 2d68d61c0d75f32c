//! Geographic calculations

use crate::types::Coordinates;

/// Mean Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculate Haversine distance between two points in meters
pub fn haversine_distance(from: &Coordinates, to: &Coordinates) -> f64 {
    haversine_distance_with_radius(from, to, EARTH_RADIUS_M)
}

/// Haversine distance on a sphere of the given radius (same unit as the result)
///
/// Identical points yield exactly 0. Inputs are not range-checked.
pub fn haversine_distance_with_radius(from: &Coordinates, to: &Coordinates, radius: f64) -> f64 {
    if from == to {
        return 0.0;
    }

    let d_lat = (to.lat - from.lat).to_radians();
    let d_lon = (to.lng - from.lng).to_radians();

    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    // Rounding can push `a` marginally past 1 for antipodal points
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

    (radius * c).max(0.0)
}
