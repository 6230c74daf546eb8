pub mod nearest;
pub mod tree;

use crate::types::location_record::LocationRecord;

/// How a session resolves clicks against its dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Binary search on latitude, then scan this many records on each side.
    LatitudeWindow(usize),
    /// Query an R-tree built over the dataset.
    Tree,
}

impl Default for SearchStrategy {
    fn default() -> Self {
        SearchStrategy::LatitudeWindow(nearest::DEFAULT_SEARCH_WINDOW)
    }
}

/// A dataset's records paired with the index the configured strategy needs.
#[derive(Debug, Clone)]
pub(crate) enum Resolver {
    Window(usize),
    Tree(tree::TreeLocator),
}

impl Resolver {
    pub(crate) fn build(strategy: SearchStrategy, records: &[LocationRecord]) -> Self {
        match strategy {
            SearchStrategy::LatitudeWindow(window) => Resolver::Window(window),
            SearchStrategy::Tree => Resolver::Tree(tree::TreeLocator::new(records)),
        }
    }

    pub(crate) fn nearest(&self, records: &[LocationRecord], lat: f64, lng: f64) -> Option<LocationRecord> {
        match self {
            Resolver::Window(window) => nearest::find_nearest_within(records, lat, lng, *window),
            Resolver::Tree(locator) => locator.nearest(records, lat, lng),
        }
    }
}
