//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Network data, cached until explicitly invalidated
    pub store: Arc<CachedStore>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(store: CachedStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
