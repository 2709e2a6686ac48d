//! JSON file backed store.

use std::path::{Path, PathBuf};

use tokio::sync::RwLock;
use tracing::info;

use crate::domain::{FareTier, Route, TransferLink};

use super::error::StoreError;
use super::{DataStore, NetworkData};

/// Store serving network data from a single JSON document.
///
/// The document has the shape `{ "routes": [..], "transfers": [..],
/// "fareTiers": [..] }`. It is read once when opened and again on
/// [`DataStore::reload`].
pub struct JsonFileStore {
    path: Option<PathBuf>,
    data: RwLock<NetworkData>,
}

impl JsonFileStore {
    /// Open a store by reading the document at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let data = read_document(&path)?;
        info!(
            path = %path.display(),
            routes = data.routes.len(),
            transfers = data.transfers.len(),
            fare_tiers = data.fare_tiers.len(),
            "loaded network data"
        );

        Ok(Self {
            path: Some(path),
            data: RwLock::new(data),
        })
    }

    /// Create a store holding the given data, with no backing file.
    pub fn from_data(data: NetworkData) -> Self {
        Self {
            path: None,
            data: RwLock::new(data),
        }
    }

    /// Path of the backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Replace the held data, writing it to the backing file if there is one.
    ///
    /// Callers that cache derived data must invalidate it afterwards.
    pub async fn replace(&self, data: NetworkData) -> Result<(), StoreError> {
        if let Some(path) = &self.path {
            let json = serde_json::to_string_pretty(&data).map_err(|e| StoreError::Json {
                message: e.to_string(),
            })?;
            std::fs::write(path, json).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
        }

        *self.data.write().await = data;
        Ok(())
    }
}

fn read_document(path: &Path) -> Result<NetworkData, StoreError> {
    let contents = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|e| StoreError::Json {
        message: format!("{}: {}", path.display(), e),
    })
}

impl DataStore for JsonFileStore {
    async fn list_routes(&self) -> Result<Vec<Route>, StoreError> {
        Ok(self.data.read().await.routes.clone())
    }

    async fn list_transfer_links(&self) -> Result<Vec<TransferLink>, StoreError> {
        Ok(self.data.read().await.transfers.clone())
    }

    async fn list_fare_tiers(&self) -> Result<Vec<FareTier>, StoreError> {
        Ok(self.data.read().await.fare_tiers.clone())
    }

    async fn list_stop_bus_names(&self, stop_name: &str) -> Result<Vec<String>, StoreError> {
        Ok(self.data.read().await.bus_names_at(stop_name))
    }

    /// Re-read the backing file. On failure the previous data is kept.
    async fn reload(&self) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let data = read_document(path)?;
        info!(path = %path.display(), routes = data.routes.len(), "reloaded network data");
        *self.data.write().await = data;
        Ok(())
    }

    async fn load_network(&self) -> Result<NetworkData, StoreError> {
        Ok(self.data.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Stop;
    use tempfile::tempdir;

    const DOC: &str = r#"{
        "routes": [
            {"routeNumber": 5, "name": "Harbour Line", "stops": [
                {"name": "Depot", "lat": 10.0, "lon": 20.0},
                {"name": "Harbour", "lat": 10.1, "lon": 20.1}
            ]}
        ],
        "transfers": [],
        "fareTiers": [{"min": 0, "max": 3, "fare": 9}]
    }"#;

    #[tokio::test]
    async fn open_and_list() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("network.json");
        std::fs::write(&path, DOC).unwrap();

        let store = JsonFileStore::open(&path).unwrap();
        let routes = store.list_routes().await.unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].name, "Harbour Line");
        assert_eq!(store.list_fare_tiers().await.unwrap().len(), 1);
        assert_eq!(
            store.list_stop_bus_names("harbour").await.unwrap(),
            vec!["Harbour Line"]
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = JsonFileStore::open("/nonexistent/network.json")
            .err()
            .unwrap();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[test]
    fn malformed_file_is_json_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("network.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStore::open(&path).err().unwrap();
        assert!(matches!(err, StoreError::Json { .. }));
    }

    #[tokio::test]
    async fn reload_picks_up_changes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("network.json");
        std::fs::write(&path, DOC).unwrap();
        let store = JsonFileStore::open(&path).unwrap();

        std::fs::write(&path, r#"{"routes": []}"#).unwrap();
        assert_eq!(store.list_routes().await.unwrap().len(), 1);

        store.reload().await.unwrap();
        assert!(store.list_routes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_reload_keeps_data() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("network.json");
        std::fs::write(&path, DOC).unwrap();
        let store = JsonFileStore::open(&path).unwrap();

        std::fs::write(&path, "garbage").unwrap();
        assert!(store.reload().await.is_err());
        assert_eq!(store.list_routes().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn replace_writes_through() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("network.json");
        std::fs::write(&path, DOC).unwrap();
        let store = JsonFileStore::open(&path).unwrap();

        let data = NetworkData {
            routes: vec![Route::new(9, "Night", vec![Stop::new("Depot", 10.0, 20.0)])],
            ..Default::default()
        };
        store.replace(data.clone()).await.unwrap();

        assert_eq!(store.load_network().await.unwrap(), data);
        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.load_network().await.unwrap(), data);
    }

    #[tokio::test]
    async fn in_memory_reload_is_noop() {
        let store = JsonFileStore::from_data(NetworkData::default());
        assert!(store.path().is_none());
        store.reload().await.unwrap();
        assert!(store.list_routes().await.unwrap().is_empty());
    }
}
