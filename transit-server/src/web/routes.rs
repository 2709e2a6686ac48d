//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::de::DeserializeOwned;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::fare::FareError;
use crate::store::StoreError;

use super::dto::*;
use super::state::AppState;

/// Default number of stop search results.
const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Upper bound on stop search results.
const MAX_SEARCH_LIMIT: usize = 50;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/path/resolve", post(resolve_path))
        .route("/api/fare/estimate", post(estimate_fare))
        .route("/api/stops", get(search_stops))
        .route("/api/stops/:name/buses", get(stop_buses))
        .route("/api/network", get(network_summary))
        .route("/admin/reload", post(reload))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Parse a JSON request body, logging the body when it is malformed.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(body), "malformed request body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

/// Trim both endpoint names, rejecting blanks.
fn endpoints<'a>(start: &'a str, end: &'a str) -> Result<(&'a str, &'a str), AppError> {
    let (start, end) = (start.trim(), end.trim());
    if start.is_empty() {
        return Err(AppError::BadRequest {
            message: "start must not be blank".into(),
        });
    }
    if end.is_empty() {
        return Err(AppError::BadRequest {
            message: "end must not be blank".into(),
        });
    }
    Ok((start, end))
}

/// Resolve a path between two stops.
///
/// Always answers 200 once the request is valid: a stop that cannot be
/// found is a `not_found` resolution, not an error.
async fn resolve_path(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ResolvePathResponse>, AppError> {
    let req: ResolvePathRequest = parse_body(&body)?;
    let (start, end) = endpoints(&req.start, &req.end)?;

    let network = state.store.network().await?;
    let resolution = network.resolve(start, end);
    info!(start, end, kind = resolution.kind().as_str(), "resolved path");

    Ok(Json(ResolvePathResponse::from_resolution(&resolution)))
}

/// Estimate the fare between two stops.
async fn estimate_fare(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<EstimateFareResponse>, AppError> {
    let req: EstimateFareRequest = parse_body(&body)?;
    let (start, end) = endpoints(&req.start, &req.end)?;

    let network = state.store.network().await?;
    let estimate = network.estimate_fare(start, end, req.path.as_deref())?;

    Ok(Json(EstimateFareResponse::from_estimate(&estimate)))
}

/// Search stops by name.
async fn search_stops(
    State(state): State<AppState>,
    Query(req): Query<StopSearchRequest>,
) -> Result<Json<StopSearchResponse>, AppError> {
    let limit = req
        .limit
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .min(MAX_SEARCH_LIMIT);
    let network = state.store.network().await?;

    let stops = network
        .stops()
        .search(&req.q, limit)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(StopSearchResponse { stops }))
}

/// Names of the buses serving a stop.
async fn stop_buses(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<BusNamesResponse>, AppError> {
    let buses = state.store.bus_names(&name).await?;

    Ok(Json(BusNamesResponse {
        stop: name,
        buses: buses.to_vec(),
    }))
}

/// Describe the currently loaded network.
async fn network_summary(
    State(state): State<AppState>,
) -> Result<Json<NetworkSummaryResponse>, AppError> {
    let network = state.store.network().await?;
    Ok(Json(network.summary().into()))
}

/// Reload network data and drop every cached value.
async fn reload(State(state): State<AppState>) -> Result<Json<NetworkSummaryResponse>, AppError> {
    let network = state.store.reload().await?;
    info!("network reloaded");
    Ok(Json(network.summary().into()))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest {
        message: String,
    },
    NotFound {
        message: String,
        available_stops: Option<Vec<String>>,
    },
    Unprocessable {
        message: String,
    },
    BadGateway {
        message: String,
    },
    Internal {
        message: String,
    },
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unauthorized => AppError::BadGateway {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<FareError> for AppError {
    fn from(e: FareError) -> Self {
        match e {
            FareError::StopNotFound {
                ref name,
                ref available_stops,
            } => AppError::NotFound {
                message: format!("Stop not found: {name}"),
                available_stops: Some(available_stops.clone()),
            },
            FareError::NoPathResolvable => AppError::Unprocessable {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message, available_stops) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message, None),
            AppError::NotFound {
                message,
                available_stops,
            } => (StatusCode::NOT_FOUND, message, available_stops),
            AppError::Unprocessable { message } => {
                (StatusCode::UNPROCESSABLE_ENTITY, message, None)
            }
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message, None),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message, None),
        };

        if status.is_server_error() {
            error!(%status, "{message}");
        } else {
            warn!(%status, "{message}");
        }

        let body = Json(ErrorResponse {
            error: message,
            available_stops,
        });
        (status, body).into_response()
    }
}
