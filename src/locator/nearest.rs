//! Nearest-record lookup over a latitude-sorted slice.
//!
//! A binary search on latitude finds where the query would be inserted, then a
//! fixed window of records on each side of that landing point is scanned by
//! great-circle distance. The true nearest record is only guaranteed to be found
//! when it lies inside that window, which holds for latitude-dense regional
//! datasets but is not a proven bound.

use crate::distance::distance_km;
use crate::types::location_record::LocationRecord;
use std::ops::RangeInclusive;

/// Records scanned on each side of the latitude landing point.
pub const DEFAULT_SEARCH_WINDOW: usize = 50;

/// Index of the first record whose latitude is `>= lat`; `records.len()` if none.
fn latitude_lower_bound(records: &[LocationRecord], lat: f64) -> usize {
    records.partition_point(|record| record.lat < lat)
}

/// Indices scanned around `landing`, clamped to the slice. `len` must be non-zero.
fn scan_range(len: usize, landing: usize, window: usize) -> RangeInclusive<usize> {
    let start = landing.saturating_sub(window);
    let end = landing.saturating_add(window).min(len - 1);
    start..=end
}

/// Position of the nearest record within the scan window, with its distance.
/// Ties keep the lowest index.
pub(crate) fn nearest_index(
    records: &[LocationRecord],
    lat: f64,
    lng: f64,
    window: usize,
) -> Option<(usize, f64)> {
    if records.is_empty() {
        return None;
    }
    let landing = latitude_lower_bound(records, lat);
    let range = scan_range(records.len(), landing, window);

    let mut best: Option<(usize, f64)> = None;
    for index in range {
        let candidate = &records[index];
        let dist = distance_km(lat, lng, candidate.lat, candidate.lng);
        match best {
            Some((_, best_dist)) if !(dist < best_dist) => {}
            _ => best = Some((index, dist)),
        }
    }
    best
}

/// Finds the record nearest to `(lat, lng)` in a latitude-sorted slice, scanning
/// [`DEFAULT_SEARCH_WINDOW`] records on each side of the latitude landing point.
///
/// Returns `None` only for an empty slice. The returned record is a copy of the
/// match with [`LocationRecord::distance`] set in kilometers; the slice is not
/// modified.
pub fn find_nearest(records: &[LocationRecord], lat: f64, lng: f64) -> Option<LocationRecord> {
    find_nearest_within(records, lat, lng, DEFAULT_SEARCH_WINDOW)
}

/// Like [`find_nearest`], scanning `window` records on each side of the latitude
/// landing point.
///
/// `records` must be sorted by ascending latitude. Queries far outside the data
/// are still resolved to whichever record in the window is closest.
///
/// # Examples
///
/// ```
/// # use laps::{find_nearest_within, LocationRecord};
/// # fn at(lat: f64, lng: f64) -> LocationRecord {
/// #     serde_json::from_value(serde_json::json!({
/// #         "id": 1, "lat": lat, "lng": lng, "location": "x", "elevation": 0,
/// #         "slopeAngle": 0, "rainfall": 0, "soilType": "", "vegetation": "",
/// #         "landslideRisk": "Low", "avalancheRisk": "Low", "temperature": 0, "humidity": 0
/// #     })).unwrap()
/// # }
/// let records = vec![at(20.0, 70.0), at(25.0, 75.0), at(30.0, 80.0)];
///
/// let nearest = find_nearest_within(&records, 26.0, 76.0, 50).unwrap();
/// assert_eq!((nearest.lat, nearest.lng), (25.0, 75.0));
/// assert!((nearest.distance.unwrap() - 149.8).abs() < 0.5);
/// ```
pub fn find_nearest_within(
    records: &[LocationRecord],
    lat: f64,
    lng: f64,
    window: usize,
) -> Option<LocationRecord> {
    nearest_index(records, lat, lng, window).map(|(index, dist)| records[index].with_distance(dist))
}
