use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use station_server::config::AppConfig;
use station_server::fetch::HttpJsonFetcher;
use station_server::pipeline::NearbyService;
use station_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("station_server=info,tower_http=info")),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let fetcher = match HttpJsonFetcher::new(config.fetch.clone()) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            error!("failed to create HTTP client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let nearby = match NearbyService::from_config(&config, Arc::new(fetcher)) {
        Ok(nearby) => nearby,
        Err(e) => {
            error!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let state = AppState::new(nearby, config.mapbox_token.as_str());
    let app = create_router(state, &config.static_dir);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, "failed to bind: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!("Station finder listening on http://{}", config.bind_addr);
    info!("  GET  /                - Search page");
    info!("  POST /                - Search (form)");
    info!("  GET  /api/nearby      - Search (JSON)");
    info!("  GET  /health          - Health check");
    info!("  GET  /about           - About page");

    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
