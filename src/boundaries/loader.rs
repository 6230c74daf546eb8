use crate::boundaries::error::BoundaryError;
use crate::boundaries::fallback::fallback_boundaries;
use crate::boundaries::types::{BoundaryCollection, BoundaryKind};
use crate::dataset::source::{DatasetSource, DirectorySource, HttpSource};
use bon::bon;
use log::{debug, info, warn};
use reqwest::Client;
use serde_json::Value;
use std::collections::{hash_map::Entry, HashMap};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task;

pub const DEFAULT_BOUNDARY_URL: &str = "https://raw.githubusercontent.com/geohacker/india/master";

/// Boundaries of every kind, as returned by [`BoundaryLoader::load_all`].
#[derive(Debug, Clone)]
pub struct BoundarySet {
    pub country: Arc<BoundaryCollection>,
    pub states: Arc<BoundaryCollection>,
    pub districts: Arc<BoundaryCollection>,
}

/// Loads administrative boundary overlays, remotely or from an offline
/// directory, and keeps loaded collections in its own cache.
///
/// Loading never fails: whenever real data is unusable a generated fallback is
/// served instead.
pub struct BoundaryLoader {
    remote: HttpSource,
    offline: Option<DirectorySource>,
    cache: Mutex<HashMap<BoundaryKind, Arc<BoundaryCollection>>>,
}

#[bon]
impl BoundaryLoader {
    /// Creates a loader.
    ///
    /// * `.client(Client)`: Optional. HTTP client to share; a new one is created otherwise.
    /// * `.base_url(String)`: Optional. Base URL of the remote GeoJSON files. Defaults to [`DEFAULT_BOUNDARY_URL`].
    /// * `.offline_dir(PathBuf)`: Optional. Directory holding the `gadm41_IND_{0,1,2}.geojson` files.
    #[builder]
    pub fn new(client: Option<Client>, base_url: Option<String>, offline_dir: Option<PathBuf>) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BOUNDARY_URL.to_string());
        Self {
            remote: HttpSource::with_client(base_url, client.unwrap_or_default()),
            offline: offline_dir.map(DirectorySource::new),
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn remote_url(&self, kind: BoundaryKind) -> String {
        self.remote.describe(kind.remote_path())
    }

    /// Returns the boundaries of `kind`, from the cache when present.
    ///
    /// Offline, the GeoJSON file in the offline directory is used, or the fallback
    /// when it is missing or invalid; either is cached. Online, the remote file is
    /// fetched. A non-success status serves the fallback and caches it; any other
    /// failure serves the fallback without caching it.
    pub async fn load(&self, kind: BoundaryKind, offline: bool) -> Arc<BoundaryCollection> {
        {
            let cache = self.cache.lock().await;
            if let Some(cached) = cache.get(&kind) {
                debug!("Boundary cache hit for {}", kind);
                return cached.clone();
            }
        }

        let loaded = if offline {
            self.read_offline(kind).await
        } else {
            self.fetch_remote(kind).await
        };

        let (collection, cacheable) = match loaded {
            Ok(collection) => {
                info!("Loaded {} {} boundaries", collection.len(), kind);
                (collection, true)
            }
            Err(e) => {
                warn!("Using fallback {} boundaries: {}", kind, e);
                let cacheable = e.fallback_is_cacheable(offline);
                (fallback_boundaries(kind), cacheable)
            }
        };
        let collection = Arc::new(collection);
        if !cacheable {
            return collection;
        }

        let mut cache = self.cache.lock().await;
        match cache.entry(kind) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => {
                entry.insert(collection.clone());
                collection
            }
        }
    }

    /// Loads country, state and district boundaries, in that order.
    pub async fn load_all(&self, offline: bool) -> BoundarySet {
        let country = self.load(BoundaryKind::Country, offline).await;
        let states = self.load(BoundaryKind::States, offline).await;
        let districts = self.load(BoundaryKind::Districts, offline).await;
        BoundarySet {
            country,
            states,
            districts,
        }
    }

    pub async fn clear_cache(&self) {
        self.cache.lock().await.clear();
    }

    pub async fn is_cached(&self, kind: BoundaryKind) -> bool {
        self.cache.lock().await.contains_key(&kind)
    }

    /// Reads and validates the offline GeoJSON file for `kind`, bypassing the cache.
    pub async fn read_offline(&self, kind: BoundaryKind) -> Result<BoundaryCollection, BoundaryError> {
        let offline = self
            .offline
            .as_ref()
            .ok_or(BoundaryError::NoOfflineDirectory)?;
        let file_name = kind.offline_file_name();
        let bytes = offline.fetch(file_name).await?;
        let origin = offline.describe(file_name);
        task::spawn_blocking(move || parse_collection(&bytes, origin)).await?
    }

    /// Fetches and validates the remote GeoJSON file for `kind`, bypassing the cache.
    pub async fn fetch_remote(&self, kind: BoundaryKind) -> Result<BoundaryCollection, BoundaryError> {
        let url = self.remote_url(kind);
        info!("Downloading {} boundaries from {}", kind, url);
        let bytes = self.remote.fetch(kind.remote_path()).await?;
        task::spawn_blocking(move || parse_collection(&bytes, url)).await?
    }
}

/// Parses GeoJSON text, accepting only a `FeatureCollection` with a `features` array.
fn parse_collection(bytes: &[u8], origin: String) -> Result<BoundaryCollection, BoundaryError> {
    let value: Value = match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(e) => return Err(BoundaryError::Json(origin, e)),
    };
    let is_collection = value.get("type").and_then(Value::as_str) == Some("FeatureCollection")
        && value.get("features").is_some_and(Value::is_array);
    if !is_collection {
        return Err(BoundaryError::InvalidStructure(origin));
    }
    serde_json::from_value(value).map_err(|e| BoundaryError::Json(origin, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::error::FetchError;
    use crate::test_support::{HttpResponder, Reply};

    const STATES: &str = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","properties":{"NAME_1":"Sikkim"},"geometry":{"type":"Polygon","coordinates":[[[88.0,27.0],[88.9,27.0],[88.9,28.1],[88.0,27.0]]]}}
    ]}"#;

    fn online_loader(server: &HttpResponder) -> BoundaryLoader {
        BoundaryLoader::builder()
            .base_url(format!("{}/india/", server.base_url()))
            .build()
    }

    #[test]
    fn rejects_non_collections() {
        assert!(matches!(
            parse_collection(br#"{"type":"Feature","features":[]}"#, "x".into()),
            Err(BoundaryError::InvalidStructure(_))
        ));
        assert!(matches!(
            parse_collection(br#"{"type":"FeatureCollection","features":{}}"#, "x".into()),
            Err(BoundaryError::InvalidStructure(_))
        ));
        assert!(matches!(
            parse_collection(b"<html>", "x".into()),
            Err(BoundaryError::Json(..))
        ));
        assert_eq!(parse_collection(STATES.as_bytes(), "x".into()).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn offline_reads_local_file_and_caches_it() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("gadm41_IND_1.geojson"), STATES).unwrap();
        let loader = BoundaryLoader::builder().offline_dir(dir.path().to_path_buf()).build();

        let states = loader.load(BoundaryKind::States, true).await;
        assert_eq!(states.names().collect::<Vec<_>>(), vec!["Sikkim"]);
        assert!(loader.is_cached(BoundaryKind::States).await);

        // Served from the cache even after the file goes away.
        std::fs::remove_file(dir.path().join("gadm41_IND_1.geojson")).unwrap();
        let again = loader.load(BoundaryKind::States, true).await;
        assert!(Arc::ptr_eq(&states, &again));
    }

    #[tokio::test]
    async fn offline_without_files_caches_fallback() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("gadm41_IND_0.geojson"), r#"{"type":"Feature"}"#).unwrap();
        let loader = BoundaryLoader::builder().offline_dir(dir.path().to_path_buf()).build();

        let country = loader.load(BoundaryKind::Country, true).await;
        assert_eq!(*country, fallback_boundaries(BoundaryKind::Country));
        assert!(loader.is_cached(BoundaryKind::Country).await);

        let districts = loader.load(BoundaryKind::Districts, true).await;
        assert_eq!(districts.len(), fallback_boundaries(BoundaryKind::Districts).len());
        assert!(loader.is_cached(BoundaryKind::Districts).await);
    }

    #[tokio::test]
    async fn offline_without_directory_uses_fallback() {
        let loader = BoundaryLoader::builder().build();
        assert!(matches!(
            loader.read_offline(BoundaryKind::States).await,
            Err(BoundaryError::NoOfflineDirectory)
        ));
        let states = loader.load(BoundaryKind::States, true).await;
        assert_eq!(states.len(), 3);
    }

    #[tokio::test]
    async fn fetch_errors_keep_their_source_kind() {
        let server = HttpResponder::start(vec![]).await;
        let loader = online_loader(&server);
        let err = loader.fetch_remote(BoundaryKind::Country).await.unwrap_err();
        assert!(matches!(err, BoundaryError::Fetch(FetchError::HttpStatus { .. })), "{err:?}");
        assert!(err.fallback_is_cacheable(false));

        let dir = tempfile::tempdir().unwrap();
        let loader = BoundaryLoader::builder().offline_dir(dir.path().to_path_buf()).build();
        let err = loader.read_offline(BoundaryKind::Districts).await.unwrap_err();
        assert!(matches!(err, BoundaryError::Fetch(FetchError::NotFound(_))), "{err:?}");
    }

    #[tokio::test]
    async fn online_success_is_cached() {
        let server = HttpResponder::start(vec![(
            "/india/state/india_state.geojson",
            Reply::ok("application/json", STATES),
        )])
        .await;
        let loader = online_loader(&server);

        let first = loader.load(BoundaryKind::States, false).await;
        let second = loader.load(BoundaryKind::States, false).await;
        assert_eq!(first.len(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(server.hits("/india/state/india_state.geojson"), 1);
    }

    #[tokio::test]
    async fn http_status_caches_fallback() {
        let server = HttpResponder::start(vec![]).await;
        let loader = online_loader(&server);

        let country = loader.load(BoundaryKind::Country, false).await;
        assert_eq!(country.names().next(), Some("India"));
        loader.load(BoundaryKind::Country, false).await;
        assert_eq!(server.hits("/india/country/india.geojson"), 1);
    }

    #[tokio::test]
    async fn invalid_remote_data_is_not_cached() {
        let server = HttpResponder::start(vec![
            ("/india/country/india.geojson", Reply::ok("application/json", r#"{"type":"Topology"}"#)),
            ("/india/district/india_district.geojson", Reply::ok("application/json", "{not json")),
        ])
        .await;
        let loader = online_loader(&server);

        let country = loader.load(BoundaryKind::Country, false).await;
        assert_eq!(*country, fallback_boundaries(BoundaryKind::Country));
        assert!(!loader.is_cached(BoundaryKind::Country).await);
        loader.load(BoundaryKind::Country, false).await;
        assert_eq!(server.hits("/india/country/india.geojson"), 2);

        let districts = loader.load(BoundaryKind::Districts, false).await;
        assert_eq!(districts.len(), 126);
        assert!(!loader.is_cached(BoundaryKind::Districts).await);
    }

    #[tokio::test]
    async fn unreachable_remote_is_not_cached() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let loader = BoundaryLoader::builder().base_url(format!("http://{addr}")).build();

        let states = loader.load(BoundaryKind::States, false).await;
        assert_eq!(states.len(), 3);
        assert!(!loader.is_cached(BoundaryKind::States).await);
    }

    #[tokio::test]
    async fn load_all_goes_in_order_and_clear_cache_refetches() {
        let server = HttpResponder::start(vec![(
            "/india/state/india_state.geojson",
            Reply::ok("application/json", STATES),
        )])
        .await;
        let loader = online_loader(&server);

        let set = loader.load_all(false).await;
        assert_eq!(set.country.len(), 1);
        assert_eq!(set.states.names().collect::<Vec<_>>(), vec!["Sikkim"]);
        assert_eq!(set.districts.len(), 126);
        let paths: Vec<String> = server.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(
            paths,
            vec![
                "/india/country/india.geojson",
                "/india/state/india_state.geojson",
                "/india/district/india_district.geojson",
            ]
        );

        loader.clear_cache().await;
        assert!(!loader.is_cached(BoundaryKind::States).await);
        loader.load(BoundaryKind::States, false).await;
        assert_eq!(server.hits("/india/state/india_state.geojson"), 2);
    }
}
