//! Web layer for the transit server.
//!
//! Provides HTTP endpoints for resolving paths, estimating fares and
//! browsing stops.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
