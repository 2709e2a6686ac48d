//! REST data service client.

use reqwest::Url;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{FareTier, Route, TransferLink};

use super::DataStore;
use super::error::StoreError;

/// Configuration for the data service client.
#[derive(Debug, Clone)]
pub struct HttpStoreConfig {
    /// Base URL of the data service
    pub base_url: String,
    /// API key for x-apikey header authentication
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl HttpStoreConfig {
    /// Create a new config for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout_secs: 30,
        }
    }

    /// Authenticate with an API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set a custom request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Store backed by a REST data service.
///
/// Expects `GET {base}/routes`, `{base}/transfers`, `{base}/fare-tiers` and
/// `{base}/stops/{name}/buses`, each returning a JSON array.
#[derive(Debug, Clone)]
pub struct HttpStore {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpStore {
    /// Create a new data service client.
    pub fn new(config: HttpStoreConfig) -> Result<Self, StoreError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            StoreError::NotConfigured(format!("invalid data service URL {}: {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::NotConfigured(format!(
                "data service URL cannot be a base: {}",
                config.base_url
            )));
        }

        let mut headers = HeaderMap::new();
        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(key)
                .map_err(|_| StoreError::NotConfigured("invalid API key format".to_string()))?;
            headers.insert(HeaderName::from_static("x-apikey"), value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Build an endpoint URL from path segments, percent-encoding each.
    fn url_for(&self, segments: &[&str]) -> Result<Url, StoreError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::NotConfigured("data service URL cannot be a base".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, StoreError> {
        let url = self.url_for(segments)?;
        debug!(%url, "fetching from data service");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(StoreError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| StoreError::Json {
            message: e.to_string(),
        })
    }
}

impl DataStore for HttpStore {
    async fn list_routes(&self) -> Result<Vec<Route>, StoreError> {
        self.get_json(&["routes"]).await
    }

    async fn list_transfer_links(&self) -> Result<Vec<TransferLink>, StoreError> {
        self.get_json(&["transfers"]).await
    }

    async fn list_fare_tiers(&self) -> Result<Vec<FareTier>, StoreError> {
        self.get_json(&["fare-tiers"]).await
    }

    async fn list_stop_bus_names(&self, stop_name: &str) -> Result<Vec<String>, StoreError> {
        self.get_json(&["stops", stop_name.trim(), "buses"]).await
    }
}
