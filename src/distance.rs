//! Great-circle distance between two geographic coordinates.

use haversine::{distance as haversine_distance, Location as HaversineLocation, Units};

/// Earth mean radius in kilometers used by [`distance_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle (haversine) distance in kilometers between `(lat1, lng1)` and
/// `(lat2, lng2)`, all in decimal degrees.
///
/// # Examples
///
/// ```
/// use laps::distance_km;
///
/// let d = distance_km(26.0, 76.0, 25.0, 75.0);
/// assert!((d - 149.8).abs() < 0.5);
/// assert_eq!(distance_km(25.0, 75.0, 25.0, 75.0), 0.0);
/// ```
pub fn distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    haversine_distance(
        HaversineLocation {
            latitude: lat1,
            longitude: lng1,
        },
        HaversineLocation {
            latitude: lat2,
            longitude: lng2,
        },
        Units::Kilometers,
    )
}
