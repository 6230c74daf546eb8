use crate::locator::nearest::{find_nearest_within, DEFAULT_SEARCH_WINDOW};
use crate::types::location_record::LocationRecord;
use ordered_float::OrderedFloat;
use serde::Serialize;

/// Stable sort by ascending latitude.
pub(crate) fn sort_by_latitude(records: &mut [LocationRecord]) {
    records.sort_by_key(|record| OrderedFloat(record.lat));
}

/// The records of one region, kept in non-decreasing latitude order.
///
/// The ordering is established on construction and the records are only handed
/// out immutably, so it cannot be broken afterwards. A new region selection
/// replaces the whole dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RegionDataset {
    records: Vec<LocationRecord>,
}

impl RegionDataset {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a dataset from records in any order.
    pub fn from_records(mut records: Vec<LocationRecord>) -> Self {
        sort_by_latitude(&mut records);
        Self { records }
    }

    pub fn records(&self) -> &[LocationRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<LocationRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LocationRecord> {
        self.records.iter()
    }

    /// Nearest record to the query point using the default search window.
    /// See [`find_nearest_within`].
    pub fn nearest(&self, lat: f64, lng: f64) -> Option<LocationRecord> {
        find_nearest_within(&self.records, lat, lng, DEFAULT_SEARCH_WINDOW)
    }

    /// Nearest record to the query point, scanning `window` records on each side
    /// of the latitude landing point.
    pub fn nearest_within(&self, lat: f64, lng: f64, window: usize) -> Option<LocationRecord> {
        find_nearest_within(&self.records, lat, lng, window)
    }

    pub fn is_sorted_by_latitude(&self) -> bool {
        self.records.windows(2).all(|pair| pair[0].lat <= pair[1].lat)
    }
}

impl From<Vec<LocationRecord>> for RegionDataset {
    fn from(records: Vec<LocationRecord>) -> Self {
        Self::from_records(records)
    }
}

impl<'a> IntoIterator for &'a RegionDataset {
    type Item = &'a LocationRecord;
    type IntoIter = std::slice::Iter<'a, LocationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
