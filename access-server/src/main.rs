use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use access_server::cache::{CacheConfig, CachedPlanner};
use access_server::network::{NetworkData, NetworkGraph};
use access_server::planner::SearchConfig;
use access_server::web::{AppState, create_router};

const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Read an optional numeric override from the environment.
fn env_number(name: &str, default: f64) -> f64 {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{name} must be a number, got {raw:?}")),
        Err(_) => default,
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("access_server=info,tower_http=info")),
        )
        .init();

    let dataset = std::env::var("ACCESS_DATASET").expect("ACCESS_DATASET must point to a network file");
    let addr: SocketAddr = std::env::var("ACCESS_BIND")
        .unwrap_or_else(|_| DEFAULT_BIND.to_string())
        .parse()
        .expect("ACCESS_BIND must be a socket address");

    let defaults = SearchConfig::default();
    let search_config = SearchConfig::new(
        env_number("ACCESS_TRANSFER_MINUTES", defaults.transfer_minutes),
        env_number("ACCESS_DEFAULT_INTERVAL", defaults.default_interval),
        defaults.fallback_max_transfers,
        defaults.fallback_max_minutes,
    )
    .expect("Invalid search configuration");

    // Load the network (fail fast if unavailable)
    info!(path = %dataset, "loading network");
    let data = NetworkData::from_json_file(&dataset).expect("Failed to load network dataset");
    let graph = NetworkGraph::build(data);
    info!(
        stations = graph.station_count(),
        lines = graph.line_count(),
        clusters = graph.cluster_count(),
        "network loaded"
    );

    let planner = CachedPlanner::new(
        Arc::new(graph),
        Arc::new(search_config),
        &CacheConfig::default(),
    );
    let app = create_router(AppState::new(planner));

    info!(%addr, "station access server listening");
    info!("  GET  /health             - Health check");
    info!("  GET  /api/clusters/:id   - Cluster details");
    info!("  POST /api/reachable      - Common destinations of several origins");
    info!("  GET  /api/route          - Route between two clusters");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
