//! R-tree backed nearest-record lookup.
//!
//! The tree orders candidates by squared distance in degree space, which does not
//! match great-circle order exactly, so a bounded number of candidates is drawn
//! and re-ranked by haversine distance.

use crate::distance::distance_km;
use crate::locator::nearest;
use crate::types::location_record::LocationRecord;
use rstar::{PointDistance, RTree, RTreeObject, AABB};
use std::fmt;

/// Candidates drawn from the tree before re-ranking.
const CANDIDATE_LIMIT: usize = 16;

/// Position of a record inside the dataset the tree was built from.
#[derive(Debug, Clone, Copy)]
struct IndexedPoint {
    lat: f64,
    lng: f64,
    index: usize,
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.lat, self.lng])
    }
}

impl PointDistance for IndexedPoint {
    // Squared Euclidean distance in degrees; point[0] = latitude, point[1] = longitude
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.lat - point[0];
        let dy = self.lng - point[1];
        dx * dx + dy * dy
    }
}

/// Spatial index over the positions of a dataset's records.
///
/// The locator stores indices, not records, so it must be queried with the same
/// slice it was built from.
#[derive(Clone)]
pub struct TreeLocator {
    tree: RTree<IndexedPoint>,
    len: usize,
}

impl fmt::Debug for TreeLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeLocator").field("len", &self.len).finish()
    }
}

impl TreeLocator {
    pub fn new(records: &[LocationRecord]) -> Self {
        // Non-finite positions cannot be ordered inside the tree.
        let points = records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.lat.is_finite() && record.lng.is_finite())
            .map(|(index, record)| IndexedPoint {
                lat: record.lat,
                lng: record.lng,
                index,
            })
            .collect();
        TreeLocator {
            tree: RTree::bulk_load(points),
            len: records.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Position and great-circle distance of the record nearest to `(lat, lng)`.
    /// Ties keep the lowest index.
    ///
    /// Queries the tree cannot answer (a non-finite coordinate, or no finite
    /// record positions) are resolved by a full linear scan instead.
    pub(crate) fn nearest_index(&self, records: &[LocationRecord], lat: f64, lng: f64) -> Option<(usize, f64)> {
        if !lat.is_finite() || !lng.is_finite() || self.tree.size() == 0 {
            return nearest::nearest_index(records, lat, lng, usize::MAX);
        }
        self.tree
            .nearest_neighbor_iter(&[lat, lng])
            .take(CANDIDATE_LIMIT)
            .filter_map(|point| {
                records
                    .get(point.index)
                    .map(|record| (point.index, distance_km(lat, lng, record.lat, record.lng)))
            })
            .fold(None, |best, (index, dist)| match best {
                Some((best_index, best_dist))
                    if best_dist < dist || (best_dist == dist && best_index < index) =>
                {
                    best
                }
                _ => Some((index, dist)),
            })
    }

    /// Finds the record nearest to `(lat, lng)` among `records`, which must be the
    /// slice this locator was built from.
    ///
    /// Returns `None` only when the dataset is empty. The record is returned as a
    /// copy with [`LocationRecord::distance`] set.
    pub fn nearest(&self, records: &[LocationRecord], lat: f64, lng: f64) -> Option<LocationRecord> {
        self.nearest_index(records, lat, lng)
            .map(|(index, dist)| records[index].with_distance(dist))
    }
}
