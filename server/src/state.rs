use std::sync::Arc;

use oldest_finder_core::{HttpRobloxApi, OldestFinder, RobloxApi};

use crate::config::ServerConfig;

/// Server state shared across all request handlers
#[derive(Clone)]
pub struct ServerState {
    pub finder: OldestFinder,
}

impl ServerState {
    pub fn new(config: &ServerConfig, api: Arc<dyn RobloxApi>) -> Self {
        let finder = OldestFinder::new(api, config.upstream.resolve_concurrency);
        Self { finder }
    }

    /// Get the lookup pipeline
    pub fn finder(&self) -> &OldestFinder {
        &self.finder
    }
}

/// Factory for creating server state with all dependencies
pub struct ServerStateFactory;

impl ServerStateFactory {
    /// Create server state backed by the live Roblox APIs
    pub fn create(config: ServerConfig) -> Result<ServerState, String> {
        let api = HttpRobloxApi::new(config.upstream.clone())
            .map_err(|e| format!("Failed to create Roblox client: {}", e))?;

        log::info!(
            "[ServerState] Upstream timeout {:?}, resolve concurrency {}",
            config.upstream.timeout,
            config.upstream.resolve_concurrency
        );

        Ok(ServerState::new(&config, Arc::new(api)))
    }
}
