//! Region selection state: the dataset of the selected region and the markers
//! placed by clicking the map.

use crate::dataset::region_dataset::RegionDataset;
use crate::error::LapsError;
use crate::laps::{Laps, LatLng};
use crate::locator::{Resolver, SearchStrategy};
use crate::types::location_record::LocationRecord;
use crate::types::region::Region;
use log::{debug, info, warn};
use serde::Serialize;

/// Identifies one region selection. Only the ticket of the most recent selection
/// can install a loaded dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionTicket {
    generation: u64,
    region: Option<Region>,
}

impl SelectionTicket {
    pub fn region(&self) -> Option<Region> {
        self.region
    }
}

/// A clicked coordinate and the record nearest to it at the time of the click.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerQuery {
    pub lat: f64,
    pub lng: f64,
    /// `None` when no data was loaded.
    pub nearest: Option<LocationRecord>,
}

impl MarkerQuery {
    pub fn position(&self) -> LatLng {
        LatLng(self.lat, self.lng)
    }
}

pub struct RegionSession {
    strategy: SearchStrategy,
    generation: u64,
    selected: Option<Region>,
    dataset: RegionDataset,
    resolver: Resolver,
    markers: Vec<MarkerQuery>,
}

impl RegionSession {
    pub fn new(strategy: SearchStrategy) -> Self {
        Self {
            strategy,
            generation: 0,
            selected: None,
            dataset: RegionDataset::empty(),
            resolver: Resolver::build(strategy, &[]),
            markers: Vec::new(),
        }
    }

    /// Starts selecting `region`. Results of earlier selections still in flight
    /// are discarded once this is called. Selecting `None` clears the dataset
    /// right away.
    pub fn begin_selection(&mut self, region: Option<Region>) -> SelectionTicket {
        self.generation += 1;
        self.selected = region;
        if region.is_none() {
            self.install(RegionDataset::empty());
        }
        SelectionTicket {
            generation: self.generation,
            region,
        }
    }

    /// Selects `region`, or clears the selection if it is already selected.
    pub fn toggle(&mut self, region: Region) -> SelectionTicket {
        let next = if self.selected == Some(region) {
            None
        } else {
            Some(region)
        };
        self.begin_selection(next)
    }

    pub fn is_current(&self, ticket: SelectionTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Installs the outcome of loading `ticket`'s region. Returns `false`, leaving
    /// the session untouched, when a newer selection has started since.
    ///
    /// A failed load installs an empty dataset.
    pub fn apply(&mut self, ticket: SelectionTicket, result: Result<RegionDataset, LapsError>) -> bool {
        if !self.is_current(ticket) {
            debug!(
                "Discarding stale load for {:?} (generation {}, current {})",
                ticket.region, ticket.generation, self.generation
            );
            return false;
        }

        match result {
            Ok(dataset) => {
                info!("Installed {} records for {:?}", dataset.len(), ticket.region);
                self.install(dataset);
            }
            Err(e) => {
                warn!("No data available for {:?}: {}", ticket.region, e);
                self.install(RegionDataset::empty());
            }
        }
        true
    }

    /// Selects `region`, loading its full forecast dataset through `laps`.
    /// Returns whether the loaded result was installed.
    pub async fn select_region(&mut self, laps: &Laps, region: Option<Region>) -> bool {
        let ticket = self.begin_selection(region);
        let Some(region) = region else {
            return true;
        };
        let result = laps.load_region().region(region).call().await;
        self.apply(ticket, result)
    }

    /// Resolves a click against the current dataset and records it as a marker.
    pub fn click(&mut self, lat: f64, lng: f64) -> &MarkerQuery {
        let nearest = self.resolver.nearest(self.dataset.records(), lat, lng);
        self.markers.push(MarkerQuery { lat, lng, nearest });
        &self.markers[self.markers.len() - 1]
    }

    pub fn selected_region(&self) -> Option<Region> {
        self.selected
    }

    pub fn dataset(&self) -> &RegionDataset {
        &self.dataset
    }

    pub fn markers(&self) -> &[MarkerQuery] {
        &self.markers
    }

    pub fn clear_markers(&mut self) {
        self.markers.clear();
    }

    pub fn search_strategy(&self) -> SearchStrategy {
        self.strategy
    }

    fn install(&mut self, dataset: RegionDataset) {
        self.resolver = Resolver::build(self.strategy, dataset.records());
        self.dataset = dataset;
    }
}

impl Default for RegionSession {
    fn default() -> Self {
        Self::new(SearchStrategy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::error::{DatasetError, FetchError};
    use crate::types::location_record::fixtures::record;
    use std::path::PathBuf;

    fn northern() -> RegionDataset {
        RegionDataset::from_records(vec![record(1, 34.08, 74.79), record(2, 32.24, 77.19)])
    }

    fn central() -> RegionDataset {
        RegionDataset::from_records(vec![record(10, 30.32, 78.03)])
    }

    fn load_failure() -> LapsError {
        LapsError::Dataset(DatasetError::Fetch(FetchError::NotFound(PathBuf::from("central.csv"))))
    }

    #[test]
    fn latest_selection_wins() {
        let mut session = RegionSession::default();
        let first = session.begin_selection(Some(Region::Northern));
        let second = session.begin_selection(Some(Region::Central));

        assert!(session.apply(second, Ok(central())));
        assert!(!session.apply(first, Ok(northern())));
        assert_eq!(session.selected_region(), Some(Region::Central));
        assert_eq!(session.dataset(), &central());
    }

    #[test]
    fn stale_result_does_not_overwrite_newer_one_arriving_later() {
        let mut session = RegionSession::default();
        let first = session.begin_selection(Some(Region::Northern));
        let second = session.begin_selection(Some(Region::Central));

        assert!(!session.apply(first, Ok(northern())));
        assert!(session.dataset().is_empty());
        assert!(session.apply(second, Ok(central())));
        assert_eq!(session.dataset().len(), 1);
    }

    #[test]
    fn failed_load_installs_empty_dataset() {
        let mut session = RegionSession::default();
        let ticket = session.begin_selection(Some(Region::Northern));
        session.apply(ticket, Ok(northern()));

        let ticket = session.begin_selection(Some(Region::Central));
        assert!(session.apply(ticket, Err(load_failure())));
        assert!(session.dataset().is_empty());
        assert_eq!(session.click(30.0, 78.0).nearest, None);
    }

    #[test]
    fn toggling_selected_region_clears_it() {
        let mut session = RegionSession::default();
        let ticket = session.toggle(Region::Eastern);
        assert_eq!(ticket.region(), Some(Region::Eastern));
        session.apply(ticket, Ok(central()));

        let ticket = session.toggle(Region::Eastern);
        assert_eq!(ticket.region(), None);
        assert_eq!(session.selected_region(), None);
        assert!(session.dataset().is_empty());

        let ticket = session.toggle(Region::Northern);
        assert_eq!(ticket.region(), Some(Region::Northern));
    }

    #[test]
    fn clicks_are_recorded_in_order() {
        for strategy in [SearchStrategy::LatitudeWindow(50), SearchStrategy::Tree] {
            let mut session = RegionSession::new(strategy);
            assert!(session.click(32.0, 77.0).nearest.is_none());

            let ticket = session.begin_selection(Some(Region::Northern));
            session.apply(ticket, Ok(northern()));
            let marker = session.click(34.0, 74.9);
            assert_eq!(marker.nearest.as_ref().unwrap().id, 1);
            assert!(marker.nearest.as_ref().unwrap().distance.is_some());
            session.click(32.3, 77.2);

            let ids: Vec<Option<i64>> = session
                .markers()
                .iter()
                .map(|m| m.nearest.as_ref().map(|r| r.id))
                .collect();
            assert_eq!(ids, vec![None, Some(1), Some(2)]);
            assert_eq!(session.markers()[1].position(), LatLng(34.0, 74.9));
            // The dataset itself never carries distances.
            assert!(session.dataset().iter().all(|r| r.distance.is_none()));
        }
    }

    #[tokio::test]
    async fn select_region_loads_through_client() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("central.csv"),
            "id,lat,lng,location,elevation,slopeAngle,rainfall,soilType,vegetation,landslideRisk,avalancheRisk,temperature,humidity\n\
             4,30.32,78.03,Dehradun,640,8,2000,Alluvial,Mixed,Low,Low,22,70\n",
        )
        .unwrap();
        let laps = Laps::builder().data_dir(dir.path().to_path_buf()).build();
        let mut session = laps.new_session();

        assert!(session.select_region(&laps, Some(Region::Central)).await);
        assert_eq!(session.dataset().len(), 1);
        assert_eq!(session.click(30.3, 78.0).nearest.as_ref().unwrap().location, "Dehradun");

        assert!(session.select_region(&laps, Some(Region::Eastern)).await);
        assert!(session.dataset().is_empty());

        assert!(session.select_region(&laps, None).await);
        assert_eq!(session.selected_region(), None);
        assert_eq!(session.markers().len(), 1);
    }
}
