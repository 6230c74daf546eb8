use crate::laps::LatLng;
use crate::prediction::types::PredictionResponse;

/// Predictions received so far, oldest first, plus the location the map should
/// pan to: the closest known sample of the latest prediction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionLog {
    results: Vec<PredictionResponse>,
    pan_to: Option<LatLng>,
}

impl PredictionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, result: PredictionResponse) {
        self.pan_to = Some(LatLng(result.closest_db_lat, result.closest_db_lon));
        self.results.push(result);
    }

    pub fn results(&self) -> &[PredictionResponse] {
        &self.results
    }

    pub fn latest(&self) -> Option<&PredictionResponse> {
        self.results.last()
    }

    pub fn pan_to(&self) -> Option<LatLng> {
        self.pan_to
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
