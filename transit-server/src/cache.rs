//! Caching layer over the data store.
//!
//! Holds the indexed network snapshot and per-stop bus name lookups. Nothing
//! here expires on its own: whoever changes the underlying data must call
//! [`CachedStore::invalidate`] (or [`CachedStore::reload`]).

use std::sync::Arc;

use moka::future::Cache as MokaCache;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::fold_name;
use crate::fare::DEFAULT_FARE;
use crate::network::Network;
use crate::store::{DataStore, Store, StoreError};

/// Cached bus names for one stop.
type BusNamesEntry = Arc<Vec<String>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of stops whose bus names are cached.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { max_capacity: 1000 }
    }
}

/// Memo of bus names per stop, keyed by folded stop name.
pub struct BusNamesCache {
    names: MokaCache<String, BusNamesEntry>,
}

impl BusNamesCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let names = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .build();
        Self { names }
    }

    pub async fn get(&self, stop_name: &str) -> Option<BusNamesEntry> {
        self.names.get(&fold_name(stop_name)).await
    }

    pub async fn insert(&self, stop_name: &str, entry: BusNamesEntry) {
        self.names.insert(fold_name(stop_name), entry).await;
    }

    /// Approximate number of cached stops (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.names.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.names.invalidate_all();
    }
}

/// Data store with a cached network snapshot.
///
/// The snapshot is built on first use and reused until invalidated.
pub struct CachedStore<S = Store> {
    store: S,
    network: RwLock<Option<Arc<Network>>>,
    bus_names: BusNamesCache,
    default_fare: f64,
}

impl<S: DataStore> CachedStore<S> {
    /// Create a new cached store.
    pub fn new(store: S, cache_config: &CacheConfig) -> Self {
        Self {
            store,
            network: RwLock::new(None),
            bus_names: BusNamesCache::new(cache_config),
            default_fare: DEFAULT_FARE,
        }
    }

    /// Fare charged when no tier applies.
    pub fn with_default_fare(mut self, fare: f64) -> Self {
        self.default_fare = fare;
        self
    }

    /// The current network snapshot, loading it if necessary.
    pub async fn network(&self) -> Result<Arc<Network>, StoreError> {
        if let Some(network) = self.network.read().await.as_ref() {
            return Ok(Arc::clone(network));
        }

        let mut guard = self.network.write().await;
        // Another request may have built it while we waited.
        if let Some(network) = guard.as_ref() {
            return Ok(Arc::clone(network));
        }

        debug!("network snapshot missing; loading from store");
        let data = self.store.load_network().await?;
        let network = Arc::new(Network::build(data, self.default_fare));
        *guard = Some(Arc::clone(&network));

        Ok(network)
    }

    /// Bus names serving a stop, using the cache if available.
    pub async fn bus_names(&self, stop_name: &str) -> Result<BusNamesEntry, StoreError> {
        if let Some(cached) = self.bus_names.get(stop_name).await {
            return Ok(cached);
        }

        // Held across fetch and insert so an invalidation cannot slip in
        // between and be undone by a stale insert.
        let _snapshot = self.network.read().await;
        let names = Arc::new(self.store.list_stop_bus_names(stop_name).await?);
        self.bus_names.insert(stop_name, Arc::clone(&names)).await;

        Ok(names)
    }

    /// Drop every cached value. The next read goes to the store.
    ///
    /// Waits for in-flight bus name lookups to finish, then discards what
    /// they stored.
    pub async fn invalidate(&self) {
        let mut network = self.network.write().await;
        *network = None;
        self.bus_names.invalidate_all();
        drop(network);
        info!("cache invalidated");
    }

    /// Reload the store, then invalidate and rebuild the snapshot.
    pub async fn reload(&self) -> Result<Arc<Network>, StoreError> {
        self.store.reload().await?;
        self.invalidate().await;
        self.network().await
    }

    /// Whether a snapshot is currently cached.
    pub async fn is_loaded(&self) -> bool {
        self.network.read().await.is_some()
    }

    /// Access the underlying store for operations that bypass the cache.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get cache statistics.
    pub fn bus_names_entry_count(&self) -> u64 {
        self.bus_names.entry_count()
    }
}
