//! Data store error types.

use std::path::PathBuf;

/// Errors that can occur when reading network data.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading the data file failed
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Data did not match the expected JSON shape
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check TRANSIT_API_KEY")]
    Unauthorized,

    /// Data service returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Store is missing required configuration
    #[error("not configured: {0}")]
    NotConfigured(String),
}
