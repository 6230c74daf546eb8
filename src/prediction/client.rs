use crate::prediction::error::PredictionError;
use crate::prediction::types::{PredictionRequest, PredictionResponse};
use log::{info, warn};
use reqwest::{Client, StatusCode};
use serde_json::Value;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Client for the remote risk classification service.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    api_url: String,
    client: Client,
}

impl PredictionClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(api_url, Client::new())
    }

    pub fn with_client(api_url: impl Into<String>, client: Client) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { api_url, client }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn endpoint(&self) -> String {
        format!("{}/predict/", self.api_url)
    }

    /// Submits `request` to `POST {api_url}/predict/`.
    ///
    /// # Errors
    ///
    /// * [`PredictionError::NetworkRequest`] if the service cannot be reached.
    /// * [`PredictionError::Rejected`] for a non-success status, with the service's
    ///   `detail` message when the body carries one.
    /// * [`PredictionError::Decode`] if a success body is not a prediction.
    pub async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse, PredictionError> {
        let url = self.endpoint();
        info!(
            "Requesting prediction for ({}, {}) on {}",
            request.lat, request.lon, request.date
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| PredictionError::NetworkRequest(url.clone(), e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = rejection_detail(status, &body);
            warn!("Prediction rejected by {} ({}): {}", url, status, detail);
            return Err(PredictionError::Rejected { status, detail });
        }

        let prediction: PredictionResponse = response
            .json()
            .await
            .map_err(|e| PredictionError::Decode(url.clone(), e))?;
        info!(
            "Prediction for ({}, {}): {}",
            prediction.lat,
            prediction.lon,
            prediction.risk()
        );
        Ok(prediction)
    }
}

/// The `detail` field of an error body, or a generic message built from the status.
fn rejection_detail(status: StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("detail").cloned());
    match detail {
        Some(Value::String(message)) => message,
        Some(Value::Null) | None => format!("API Error: {}", status.canonical_reason().unwrap_or("Unknown")),
        Some(other) => other.to_string(),
    }
}
