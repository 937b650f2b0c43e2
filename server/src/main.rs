//! Oldest Game Finder API Service Binary
//!
//! Reads configuration from environment variables and starts the Axum server.

use anyhow::Context;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use oldest_finder_server::routes;
use oldest_finder_server::{ServerConfig, ServerStateFactory};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("Starting Oldest Game Finder API Service...");

    let config = ServerConfig::from_env()
        .map_err(anyhow::Error::msg)
        .context("Failed to load configuration")?;
    let bind_addr = config.bind_addr;

    log::info!("Loaded config: {:?}", config);

    let state = ServerStateFactory::create(config)
        .map_err(anyhow::Error::msg)
        .context("Failed to create server state")?;

    // Build router with CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::router(state).layer(cors);

    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;

    let actual_addr = listener.local_addr()?;
    log::info!("Listening on http://{}", actual_addr);
    log::info!("Lookup endpoint: POST http://{}/api/oldest", actual_addr);
    log::info!("Debug endpoint: GET http://{}/api/debug?q=", actual_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
