use std::path::PathBuf;
use thiserror::Error;

/// Failure to retrieve a dataset file from its source.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Dataset file '{0}' does not exist")]
    NotFound(PathBuf),

    #[error("Failed to read dataset file '{0}'")]
    Io(PathBuf, #[source] std::io::Error),
}

impl FetchError {
    /// Whether the source answered but does not have the requested file, as opposed
    /// to the source itself being unreachable. Only unavailable files fall back to
    /// the shared regional baseline.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, FetchError::HttpStatus { .. } | FetchError::NotFound(_))
    }
}

/// Structural failure while turning delimited text into records.
#[derive(Debug, Error)]
pub enum DataFormatError {
    #[error("Malformed CSV data")]
    Csv(#[from] csv::Error),

    #[error("Required column '{0}' missing from header")]
    MissingColumn(&'static str),

    #[error("Invalid value '{value}' for column '{column}' on line {line}")]
    InvalidField {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("Failed to write CSV data")]
    Write(#[source] std::io::Error),

    #[error("Written CSV data is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Failed to parse dataset '{file}'")]
    DataFormat {
        file: String,
        #[source]
        source: DataFormatError,
    },

    // Covers errors joining tokio blocking tasks
    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
