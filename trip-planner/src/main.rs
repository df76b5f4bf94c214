use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use trip_planner::config::ServerConfig;
use trip_planner::graph::reference_network;
use trip_planner::web::{AppState, create_router};

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "trip_planner=info,tower_http=info";

#[tokio::main]
async fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    // The demonstration network until a loader exists
    let graph = reference_network().expect("reference network is valid");
    info!(
        stations = graph.len(),
        routes = graph.edge_count(),
        "loaded network"
    );

    // Build app state
    let addr = config.addr;
    let state = AppState::new(graph, config.planner, &config.cache);

    // Create router
    let app = create_router(state);

    // Bind and serve
    info!("Trip planner listening on http://{addr}");
    info!("  GET  /health     - Health check");
    info!("  GET  /stations   - List stations");
    info!("  POST /trip/plan  - Plan a trip");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {addr}: {e}"));
    axum::serve(listener, app).await.expect("server error");
}
