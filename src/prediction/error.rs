use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("Prediction rejected with status {status}: {detail}")]
    Rejected {
        status: reqwest::StatusCode,
        detail: String,
    },

    #[error("Failed to decode prediction response from {0}")]
    Decode(String, #[source] reqwest::Error),
}
