use crate::dataset::error::FetchError;
use thiserror::Error;

/// Why real boundary data could not be used. The loader recovers from all of
/// these by serving generated boundaries.
#[derive(Debug, Error)]
pub enum BoundaryError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("No offline boundary directory configured")]
    NoOfflineDirectory,

    #[error("Invalid JSON in boundary data from {0}")]
    Json(String, #[source] serde_json::Error),

    #[error("Boundary data from {0} is not a GeoJSON FeatureCollection")]
    InvalidStructure(String),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl BoundaryError {
    /// Whether the generated fallback served for this failure may be cached.
    /// Only a definite answer from the source (a status, or local data that is
    /// missing or unusable) is remembered; transient remote failures are retried
    /// on the next load.
    pub fn fallback_is_cacheable(&self, offline: bool) -> bool {
        offline || matches!(self, BoundaryError::Fetch(FetchError::HttpStatus { .. }))
    }
}
