use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use transit_server::cache::CachedStore;
use transit_server::config::{DataSource, ServerConfig};
use transit_server::store::{HttpStore, JsonFileStore, Store, StoreError};
use transit_server::web::{AppState, create_router};

fn open_store(source: &DataSource) -> Result<Store, StoreError> {
    match source {
        DataSource::File(path) => Ok(Store::Json(JsonFileStore::open(path)?)),
        DataSource::Http(config) => Ok(Store::Http(HttpStore::new(config.clone())?)),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("transit_server=info,tower_http=info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let store = match open_store(&config.data_source) {
        Ok(store) => store,
        Err(e) => {
            error!(error = %e, "failed to open network data");
            return ExitCode::FAILURE;
        }
    };

    let cached = CachedStore::new(store, &config.cache).with_default_fare(config.default_fare);

    // Fail fast if the data can't be indexed.
    match cached.network().await {
        Ok(network) => {
            let summary = network.summary();
            info!(
                routes = summary.routes,
                stops = summary.stops,
                fare_tiers = summary.fare_tiers,
                "network ready"
            );
        }
        Err(e) => {
            error!(error = %e, "failed to load network");
            return ExitCode::FAILURE;
        }
    }

    let app = create_router(AppState::new(cached));

    let listener = match tokio::net::TcpListener::bind(config.bind).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(bind = %config.bind, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };
    info!("transit server listening on http://{}", config.bind);

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
