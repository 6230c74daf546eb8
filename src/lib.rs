mod boundaries;
mod dataset;
mod distance;
mod error;
mod laps;
mod locator;
mod prediction;
mod session;
mod types;

#[cfg(test)]
mod test_support;

pub use error::LapsError;
pub use laps::*;
pub use session::*;

pub use distance::{distance_km, EARTH_RADIUS_KM};

pub use types::forecast_day::ForecastDay;
pub use types::location_record::{Forecast, LocationRecord, RiskLevel, UnknownRiskLevel};
pub use types::region::{Region, RegionBounds, UnknownRegion};

pub use dataset::csv_io::{export_to_csv, import_from_csv};
pub use dataset::loader::RegionDataLoader;
pub use dataset::parser::{parse_records, COLUMNS};
pub use dataset::region_dataset::RegionDataset;
pub use dataset::source::{DatasetSource, DirectorySource, HttpSource};

pub use locator::nearest::{find_nearest, find_nearest_within, DEFAULT_SEARCH_WINDOW};
pub use locator::tree::TreeLocator;
pub use locator::SearchStrategy;

pub use boundaries::fallback::fallback_boundaries;
pub use boundaries::loader::{BoundaryLoader, BoundarySet, DEFAULT_BOUNDARY_URL};
pub use boundaries::types::{BoundaryCollection, BoundaryFeature, BoundaryKind, Geometry};

pub use prediction::client::{PredictionClient, DEFAULT_API_URL};
pub use prediction::log::PredictionLog;
pub use prediction::types::{PredictedRisk, PredictionRequest, PredictionResponse};

pub use boundaries::error::BoundaryError;
pub use dataset::error::{DataFormatError, DatasetError, FetchError};
pub use prediction::error::PredictionError;
