//! The main entry point: a configured client that loads regional datasets,
//! resolves coordinates against them, serves boundary overlays and submits
//! risk predictions.

use crate::boundaries::loader::BoundaryLoader;
use crate::dataset::loader::RegionDataLoader;
use crate::dataset::region_dataset::RegionDataset;
use crate::dataset::source::{DatasetSource, DirectorySource, HttpSource};
use crate::error::LapsError;
use crate::locator::{Resolver, SearchStrategy};
use crate::prediction::client::{PredictionClient, DEFAULT_API_URL};
use crate::prediction::types::{PredictionRequest, PredictionResponse};
use crate::session::RegionSession;
use crate::types::location_record::LocationRecord;
use crate::types::region::Region;
use bon::bon;
use chrono::NaiveDate;
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;

pub const DEFAULT_DATA_URL: &str = "http://localhost:3000/data";

/// A geographical coordinate: latitude (index 0) and longitude (index 1), in degrees.
///
/// ```
/// use laps::LatLng;
///
/// let shimla = LatLng(31.1048, 77.1734);
/// assert_eq!(shimla.0, 31.1048);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng(pub f64, pub f64);

/// Client for regional hazard datasets and the services around them.
///
/// Create one with [`Laps::builder`]; every setting has a default, so
/// `Laps::builder().build()` talks to a local dashboard deployment.
///
/// # Examples
///
/// ```no_run
/// # use laps::{Laps, LapsError, LatLng, Region};
/// # #[tokio::main]
/// # async fn main() -> Result<(), LapsError> {
/// let laps = Laps::builder().data_url("https://example.org/data".to_string()).build();
///
/// let northern = laps.load_region().region(Region::Northern).call().await?;
/// if let Some(record) = laps.find_nearest(&northern, LatLng(32.24, 77.19)) {
///     println!("{} is {:.1} km away", record.location, record.distance.unwrap_or_default());
/// }
/// # Ok(())
/// # }
/// ```
pub struct Laps {
    loader: RegionDataLoader,
    boundaries: BoundaryLoader,
    predictions: PredictionClient,
    search_strategy: SearchStrategy,
}

#[bon]
impl Laps {
    /// Creates a client.
    ///
    /// * `.data_url(String)`: Optional. Base URL of the dataset files. Defaults to [`DEFAULT_DATA_URL`].
    /// * `.data_dir(PathBuf)`: Optional. Read dataset files from this directory instead; takes precedence over `data_url`.
    /// * `.api_url(String)`: Optional. Base URL of the prediction service. Defaults to [`DEFAULT_API_URL`].
    /// * `.search_strategy(SearchStrategy)`: Optional. Resolver used by [`Laps::find_nearest`] and sessions. Defaults to a 50-record latitude window.
    /// * `.boundary_url(String)`: Optional. Base URL of the remote boundary GeoJSON files.
    /// * `.boundary_dir(PathBuf)`: Optional. Directory of offline boundary GeoJSON files.
    /// * `.client(Client)`: Optional. HTTP client shared by every component.
    #[builder]
    pub fn new(
        data_url: Option<String>,
        data_dir: Option<PathBuf>,
        api_url: Option<String>,
        search_strategy: Option<SearchStrategy>,
        boundary_url: Option<String>,
        boundary_dir: Option<PathBuf>,
        client: Option<Client>,
    ) -> Self {
        let client = client.unwrap_or_default();
        let source: Arc<dyn DatasetSource> = match data_dir {
            Some(dir) => Arc::new(DirectorySource::new(dir)),
            None => Arc::new(HttpSource::with_client(
                data_url.unwrap_or_else(|| DEFAULT_DATA_URL.to_string()),
                client.clone(),
            )),
        };
        let boundaries = BoundaryLoader::builder()
            .client(client.clone())
            .maybe_base_url(boundary_url)
            .maybe_offline_dir(boundary_dir)
            .build();
        let predictions = PredictionClient::with_client(
            api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            client,
        );

        Self {
            loader: RegionDataLoader::new(source),
            boundaries,
            predictions,
            search_strategy: search_strategy.unwrap_or_default(),
        }
    }

    /// Loads the dataset of a region, sorted by ascending latitude.
    ///
    /// * `.region(Region)`: **Required.** The region to load.
    /// * `.include_forecast(bool)`: Optional. Load and merge all three forecast days. Defaults to `true`.
    /// * `.today(NaiveDate)`: Optional. Reference date for the date labels. Defaults to the local date.
    ///
    /// # Errors
    ///
    /// Returns [`LapsError::Dataset`] when a day (and its fallback) cannot be
    /// fetched or parsed. An empty dataset is not an error.
    #[builder]
    pub async fn load_region(
        &self,
        region: Region,
        include_forecast: Option<bool>,
        today: Option<NaiveDate>,
    ) -> Result<RegionDataset, LapsError> {
        let include_forecast = include_forecast.unwrap_or(true);
        let dataset = match today {
            Some(today) => {
                self.loader
                    .load_region_on(region, include_forecast, today)
                    .await?
            }
            None => self.loader.load_region(region, include_forecast).await?,
        };
        Ok(dataset)
    }

    /// Nearest record of `dataset` to `location` using the configured search strategy.
    /// `None` only for an empty dataset.
    ///
    /// With [`SearchStrategy::Tree`] the index is built for this one call. Use
    /// [`Laps::find_nearest_all`] or a [`RegionSession`], which keep the index for
    /// the lifetime of the dataset, to resolve many points.
    pub fn find_nearest(&self, dataset: &RegionDataset, location: LatLng) -> Option<LocationRecord> {
        Resolver::build(self.search_strategy, dataset.records()).nearest(dataset.records(), location.0, location.1)
    }

    /// Nearest record of `dataset` to each of `locations`, in order, building the
    /// search index once.
    pub fn find_nearest_all(&self, dataset: &RegionDataset, locations: &[LatLng]) -> Vec<Option<LocationRecord>> {
        let records = dataset.records();
        let resolver = Resolver::build(self.search_strategy, records);
        locations
            .iter()
            .map(|location| resolver.nearest(records, location.0, location.1))
            .collect()
    }

    pub async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse, LapsError> {
        Ok(self.predictions.predict(request).await?)
    }

    /// A fresh session with no region selected, using this client's search strategy.
    pub fn new_session(&self) -> RegionSession {
        RegionSession::new(self.search_strategy)
    }

    pub fn boundaries(&self) -> &BoundaryLoader {
        &self.boundaries
    }

    pub fn loader(&self) -> &RegionDataLoader {
        &self.loader
    }

    pub fn prediction_client(&self) -> &PredictionClient {
        &self.predictions
    }

    pub fn search_strategy(&self) -> SearchStrategy {
        self.search_strategy
    }
}

impl Default for Laps {
    fn default() -> Self {
        Self::builder().build()
    }
}
