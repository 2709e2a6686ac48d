//! Access to the network data store.
//!
//! The store owns routes, transfer links and fare tiers; this service only
//! reads them as plain ordered lists. Two backends are provided: a JSON file
//! on disk and a REST data service.

mod error;
mod http;
mod json;

use serde::{Deserialize, Serialize};

use crate::domain::{FareTier, Route, TransferLink, same_name};

pub use error::StoreError;
pub use http::{HttpStore, HttpStoreConfig};
pub use json::JsonFileStore;

/// Everything path resolution and fare lookup need, as loaded from storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkData {
    #[serde(default)]
    pub routes: Vec<Route>,
    #[serde(default)]
    pub transfers: Vec<TransferLink>,
    #[serde(default)]
    pub fare_tiers: Vec<FareTier>,
}

impl NetworkData {
    /// Names of the routes calling at a stop, in route order, without repeats.
    pub fn bus_names_at(&self, stop_name: &str) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for route in self.routes.iter().filter(|r| r.serves(stop_name)) {
            if !names.iter().any(|n| same_name(n, &route.name)) {
                names.push(route.name.clone());
            }
        }
        names
    }
}

/// Read access to network data.
///
/// Implementations return collections in their stored order; resolution
/// tie-breaks depend on it. Every future is `Send` so handlers can await
/// them on the multi-threaded runtime; implementors may still write plain
/// `async fn`.
pub trait DataStore: Send + Sync {
    fn list_routes(&self) -> impl Future<Output = Result<Vec<Route>, StoreError>> + Send;

    fn list_transfer_links(
        &self,
    ) -> impl Future<Output = Result<Vec<TransferLink>, StoreError>> + Send;

    fn list_fare_tiers(&self) -> impl Future<Output = Result<Vec<FareTier>, StoreError>> + Send;

    /// Names of the buses (routes) calling at a stop.
    fn list_stop_bus_names(
        &self,
        stop_name: &str,
    ) -> impl Future<Output = Result<Vec<String>, StoreError>> + Send;

    /// Re-read the underlying data, if the backend holds a copy.
    fn reload(&self) -> impl Future<Output = Result<(), StoreError>> + Send {
        async { Ok(()) }
    }

    /// Fetch all three collections.
    fn load_network(&self) -> impl Future<Output = Result<NetworkData, StoreError>> + Send {
        async move {
            let (routes, transfers, fare_tiers) = futures::try_join!(
                self.list_routes(),
                self.list_transfer_links(),
                self.list_fare_tiers()
            )?;

            Ok(NetworkData {
                routes,
                transfers,
                fare_tiers,
            })
        }
    }
}

/// The configured store backend.
pub enum Store {
    Json(JsonFileStore),
    Http(HttpStore),
}

impl DataStore for Store {
    async fn list_routes(&self) -> Result<Vec<Route>, StoreError> {
        match self {
            Store::Json(s) => s.list_routes().await,
            Store::Http(s) => s.list_routes().await,
        }
    }

    async fn list_transfer_links(&self) -> Result<Vec<TransferLink>, StoreError> {
        match self {
            Store::Json(s) => s.list_transfer_links().await,
            Store::Http(s) => s.list_transfer_links().await,
        }
    }

    async fn list_fare_tiers(&self) -> Result<Vec<FareTier>, StoreError> {
        match self {
            Store::Json(s) => s.list_fare_tiers().await,
            Store::Http(s) => s.list_fare_tiers().await,
        }
    }

    async fn list_stop_bus_names(&self, stop_name: &str) -> Result<Vec<String>, StoreError> {
        match self {
            Store::Json(s) => s.list_stop_bus_names(stop_name).await,
            Store::Http(s) => s.list_stop_bus_names(stop_name).await,
        }
    }

    async fn reload(&self) -> Result<(), StoreError> {
        match self {
            Store::Json(s) => s.reload().await,
            Store::Http(s) => s.reload().await,
        }
    }

    async fn load_network(&self) -> Result<NetworkData, StoreError> {
        match self {
            Store::Json(s) => s.load_network().await,
            Store::Http(s) => s.load_network().await,
        }
    }
}
