//! Server configuration.
//!
//! Read from `TRANSIT_*` environment variables, with defaults suitable for
//! local development.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::cache::CacheConfig;
use crate::fare::DEFAULT_FARE;
use crate::store::HttpStoreConfig;

/// Default listen address.
const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Default network data file.
const DEFAULT_DATA_FILE: &str = "network.json";

/// Error returned when an environment variable holds an unusable value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {var}: {reason}")]
pub struct InvalidConfig {
    var: &'static str,
    reason: String,
}

/// Where network data comes from.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// A JSON document on disk.
    File(PathBuf),
    /// A REST data service.
    Http(HttpStoreConfig),
}

/// Configuration for the whole server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub data_source: DataSource,
    pub cache: CacheConfig,
    /// Fare charged when no tier applies.
    pub default_fare: f64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            data_source: DataSource::File(PathBuf::from(DEFAULT_DATA_FILE)),
            cache: CacheConfig::default(),
            default_fare: DEFAULT_FARE,
        }
    }
}

impl ServerConfig {
    /// Build configuration from the process environment.
    pub fn from_env() -> Result<Self, InvalidConfig> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, InvalidConfig> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let bind_str = get("TRANSIT_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_str.trim().parse().map_err(|_| InvalidConfig {
            var: "TRANSIT_BIND",
            reason: format!("not a socket address: {bind_str}"),
        })?;

        let data_source = match get("TRANSIT_DATA_URL") {
            Some(url) => {
                let mut http = HttpStoreConfig::new(url.trim());
                if let Some(key) = get("TRANSIT_API_KEY") {
                    http = http.with_api_key(key);
                }
                DataSource::Http(http)
            }
            None => DataSource::File(PathBuf::from(
                get("TRANSIT_DATA_FILE").unwrap_or_else(|| DEFAULT_DATA_FILE.to_string()),
            )),
        };

        let default_fare = match get("TRANSIT_DEFAULT_FARE") {
            Some(v) => parse_fare(&v)?,
            None => DEFAULT_FARE,
        };

        let cache = match get("TRANSIT_CACHE_CAPACITY") {
            Some(v) => CacheConfig {
                max_capacity: v.trim().parse().map_err(|_| InvalidConfig {
                    var: "TRANSIT_CACHE_CAPACITY",
                    reason: format!("not a non-negative integer: {v}"),
                })?,
            },
            None => CacheConfig::default(),
        };

        Ok(Self {
            bind,
            data_source,
            cache,
            default_fare,
        })
    }
}

fn parse_fare(value: &str) -> Result<f64, InvalidConfig> {
    let invalid = || InvalidConfig {
        var: "TRANSIT_DEFAULT_FARE",
        reason: format!("not a non-negative amount: {value}"),
    };
    let fare: f64 = value.trim().parse().map_err(|_| invalid())?;
    if fare.is_finite() && fare >= 0.0 {
        Ok(fare)
    } else {
        Err(invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig, InvalidConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.bind.to_string(), "127.0.0.1:3000");
        assert_eq!(config.default_fare, 10.0);
        assert_eq!(config.cache.max_capacity, 1000);
        assert!(matches!(config.data_source, DataSource::File(ref p) if p == &PathBuf::from("network.json")));
    }

    #[test]
    fn file_source() {
        let config = config(&[("TRANSIT_DATA_FILE", "/srv/data/buses.json")]).unwrap();
        assert!(
            matches!(config.data_source, DataSource::File(ref p) if p == &PathBuf::from("/srv/data/buses.json"))
        );
    }

    #[test]
    fn url_takes_precedence_over_file() {
        let config = config(&[
            ("TRANSIT_DATA_FILE", "buses.json"),
            ("TRANSIT_DATA_URL", "http://data.internal/api"),
            ("TRANSIT_API_KEY", "k3y"),
        ])
        .unwrap();
        match config.data_source {
            DataSource::Http(http) => {
                assert_eq!(http.base_url, "http://data.internal/api");
                assert_eq!(http.api_key.as_deref(), Some("k3y"));
            }
            other => panic!("expected HTTP source, got {other:?}"),
        }
    }

    #[test]
    fn blank_values_use_defaults() {
        let config = config(&[("TRANSIT_BIND", "  "), ("TRANSIT_DEFAULT_FARE", "")]).unwrap();
        assert_eq!(config.bind.to_string(), "127.0.0.1:3000");
        assert_eq!(config.default_fare, 10.0);
    }

    #[test]
    fn overrides() {
        let config = config(&[
            ("TRANSIT_BIND", "0.0.0.0:8080"),
            ("TRANSIT_DEFAULT_FARE", "12.5"),
            ("TRANSIT_CACHE_CAPACITY", "50"),
        ])
        .unwrap();
        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.default_fare, 12.5);
        assert_eq!(config.cache.max_capacity, 50);
    }

    #[test]
    fn rejects_bad_values() {
        let err = config(&[("TRANSIT_BIND", "localhost")]).unwrap_err();
        assert_eq!(err.to_string(), "invalid TRANSIT_BIND: not a socket address: localhost");

        assert!(config(&[("TRANSIT_DEFAULT_FARE", "-1")]).is_err());
        assert!(config(&[("TRANSIT_DEFAULT_FARE", "free")]).is_err());
        assert!(config(&[("TRANSIT_CACHE_CAPACITY", "lots")]).is_err());
    }
}
