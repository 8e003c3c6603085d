use std::net::SocketAddr;
use std::process::ExitCode;
use std::str::FromStr;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use route_server::cache::CacheConfig;
use route_server::graph::load_graph;
use route_server::planner::{PlannerTables, SearchConfig};
use route_server::web::{AppState, create_router};

const DEFAULT_GRAPH_PATH: &str = "data/graph.json";

/// Read an environment variable, falling back to `default` when it is unset
/// or does not parse.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(name, value = %raw, "ignoring unparseable environment variable");
            default
        }),
        Err(_) => default,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("route_server=info,tower_http=info")),
        )
        .init();

    let graph_path = env_or("ROUTE_GRAPH_PATH", DEFAULT_GRAPH_PATH.to_string());
    let addr = env_or(
        "ROUTE_BIND_ADDR",
        SocketAddr::from(([127, 0, 0, 1], 3000)),
    );

    let defaults = SearchConfig::default();
    let search_config = SearchConfig {
        max_expansions: env_or("ROUTE_MAX_EXPANSIONS", defaults.max_expansions),
        deadline_ms: std::env::var("ROUTE_SEARCH_DEADLINE_MS")
            .ok()
            .and_then(|v| v.trim().parse().ok()),
        ..defaults
    };

    // Fail fast: there is nothing to serve without a graph
    let graph = match load_graph(&graph_path) {
        Ok(graph) => graph,
        Err(e) => {
            error!(path = %graph_path, error = %e, "failed to load transport graph");
            return ExitCode::FAILURE;
        }
    };

    let state = AppState::new(
        graph,
        PlannerTables::default(),
        search_config,
        &CacheConfig::default(),
    );
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!(%addr, "route planner listening");
    info!("  GET  /health            - Health check");
    info!("  GET  /api/nodes/search  - Search locations");
    info!("  POST /routes/plan       - Plan routes");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
