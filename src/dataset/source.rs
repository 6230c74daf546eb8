//! Where dataset files come from: a web server or a local directory.

use crate::dataset::error::FetchError;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use std::path::{Path, PathBuf};

/// A place dataset files can be fetched from by name, e.g. `northern-day2.csv`.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Fetches the raw bytes of `file_name`.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`]; errors for which [`FetchError::is_unavailable`]
    /// is `true` mean the source was reached but has no such file.
    async fn fetch(&self, file_name: &str) -> Result<Vec<u8>, FetchError>;

    /// Where `file_name` is fetched from, for logs and error messages.
    fn describe(&self, file_name: &str) -> String;
}

/// Fetches dataset files over HTTP from `{base_url}/{file_name}`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        HttpSource { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, file_name: &str) -> String {
        format!("{}/{}", self.base_url, file_name)
    }
}

#[async_trait]
impl DatasetSource for HttpSource {
    async fn fetch(&self, file_name: &str) -> Result<Vec<u8>, FetchError> {
        let url = self.url(file_name);
        debug!("Requesting {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                return Err(if let Some(status) = e.status() {
                    FetchError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    warn!("HTTP error for {}: {:?}", url, e);
                    FetchError::NetworkRequest(url, e)
                });
            }
        };

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::NetworkRequest(url.clone(), e))?;
        Ok(body.to_vec())
    }

    fn describe(&self, file_name: &str) -> String {
        self.url(file_name)
    }
}

/// Reads dataset files from a local directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectorySource { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl DatasetSource for DirectorySource {
    async fn fetch(&self, file_name: &str) -> Result<Vec<u8>, FetchError> {
        let path = self.root.join(file_name);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(FetchError::NotFound(path)),
            Err(e) => Err(FetchError::Io(path, e)),
        }
    }

    fn describe(&self, file_name: &str) -> String {
        self.root.join(file_name).display().to_string()
    }
}
