use std::error::Error;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use transit_server::cache::{GraphCache, GraphCacheConfig};
use transit_server::config::ServerConfig;
use transit_server::network::InMemoryNetwork;
use transit_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = ServerConfig::from_env()?;

    let network = match &config.network_file {
        Some(path) => InMemoryNetwork::load(path)?,
        None => {
            warn!("TRANSIT_NETWORK_FILE not set, starting with an empty network");
            InMemoryNetwork::new()
        }
    };

    let graph_cache = config
        .graph_cache
        .then(|| GraphCache::new(&GraphCacheConfig::default()));

    let state = AppState::new(network, config.planner.clone(), graph_cache);
    let app = create_router(state);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(
        addr = %config.bind_addr,
        graph_cache = config.graph_cache,
        max_hops = ?config.planner.max_hops,
        stale_after_secs = ?config.planner.stale_after_secs,
        "Transit planner listening"
    );
    info!("API endpoints:");
    info!("  GET  /health                     - Health check");
    info!("  GET  /api/path?start=&end=       - Plan a path between stops");
    info!("  GET  /api/journeys/:id/eta       - Live ETAs for a journey");
    info!("  GET  /api/routes/:id             - Route with ordered stops");
    info!("  POST /api/journeys/:id/location  - Report a bus position");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
