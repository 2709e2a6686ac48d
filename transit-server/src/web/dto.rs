//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Stop;
use crate::fare::FareEstimate;
use crate::network::NetworkSummary;
use crate::planner::{Resolution, ResolutionKind};

/// Request to resolve a path between two stops.
#[derive(Debug, Deserialize)]
pub struct ResolvePathRequest {
    /// Starting stop name
    pub start: String,

    /// Destination stop name
    pub end: String,
}

/// The transfer made on a transfer path.
#[derive(Debug, Serialize, PartialEq)]
pub struct TransferResult {
    /// Stop where the rider leaves the first route
    pub from: String,

    /// Stop where the rider boards the second route
    pub to: String,

    /// Whether the rider walks between the two stops
    pub walked: bool,
}

/// Response for path resolution.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvePathResponse {
    /// How the path was found
    pub kind: ResolutionKind,

    /// Stops in travel order; empty when not found
    pub path: Vec<Stop>,

    /// Whether the path follows configured routes. Synthetic paths are
    /// straight-line guesses.
    pub verified: bool,

    /// Transfer details, for transfer paths only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer: Option<TransferResult>,

    /// Every known stop name, only when not found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_stops: Option<Vec<String>>,
}

impl ResolvePathResponse {
    /// Create from a resolution outcome.
    pub fn from_resolution(resolution: &Resolution) -> Self {
        let path = resolution
            .path()
            .map(|p| p.stops().to_vec())
            .unwrap_or_default();

        let transfer = match resolution {
            Resolution::Transfer { via, walked, .. } => Some(TransferResult {
                from: via.transfer1.clone(),
                to: via.transfer2.clone(),
                walked: *walked,
            }),
            _ => None,
        };

        let available_stops = match resolution {
            Resolution::NotFound {
                available_stops, ..
            } => Some(available_stops.clone()),
            _ => None,
        };

        Self {
            kind: resolution.kind(),
            path,
            verified: resolution.is_verified(),
            transfer,
            available_stops,
        }
    }
}

/// Request to estimate a fare.
#[derive(Debug, Deserialize)]
pub struct EstimateFareRequest {
    /// Starting stop name
    pub start: String,

    /// Destination stop name
    pub end: String,

    /// Pre-resolved path to measure instead of resolving
    #[serde(default)]
    pub path: Option<Vec<Stop>>,
}

/// Response for fare estimation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateFareResponse {
    pub from: String,

    pub to: String,

    /// Distance in kilometres, two decimal places
    pub total_distance_km: String,

    pub fare: String,

    /// How the measured path was found, when resolved by the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ResolutionKind>,
}

impl EstimateFareResponse {
    /// Create from a fare estimate.
    pub fn from_estimate(estimate: &FareEstimate) -> Self {
        Self {
            from: estimate.from.clone(),
            to: estimate.to.clone(),
            total_distance_km: estimate.distance_display(),
            fare: estimate.fare_display(),
            kind: estimate.resolution,
        }
    }
}

/// Query for stop-name search.
#[derive(Debug, Deserialize)]
pub struct StopSearchRequest {
    /// Search query
    #[serde(default)]
    pub q: String,

    /// Maximum number of results
    pub limit: Option<usize>,
}

/// Response for stop-name search.
#[derive(Debug, Serialize)]
pub struct StopSearchResponse {
    pub stops: Vec<Stop>,
}

/// Response listing the buses serving a stop.
#[derive(Debug, Serialize)]
pub struct BusNamesResponse {
    pub stop: String,
    pub buses: Vec<String>,
}

/// Description of the loaded network.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSummaryResponse {
    pub routes: usize,
    pub stops: usize,
    pub transfers: usize,
    pub fare_tiers: usize,
    pub loaded_at: DateTime<Utc>,
    /// Fare table problems; affected distances use fallback fares
    pub fare_issues: Vec<String>,
}

impl From<NetworkSummary> for NetworkSummaryResponse {
    fn from(summary: NetworkSummary) -> Self {
        Self {
            routes: summary.routes,
            stops: summary.stops,
            transfers: summary.transfers,
            fare_tiers: summary.fare_tiers,
            loaded_at: summary.loaded_at,
            fare_issues: summary.fare_issues,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Known stop names, when a stop could not be found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_stops: Option<Vec<String>>,
}
