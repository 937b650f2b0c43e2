use std::time::Duration;

pub const DEFAULT_SEARCH_URL: &str = "https://apis.roblox.com/search-api/omni-search";
pub const DEFAULT_UNIVERSE_URL: &str = "https://apis.roblox.com/universes/v1/places";
pub const DEFAULT_GAMES_URL: &str = "https://games.roblox.com/v1/games";
pub const DEFAULT_USER_AGENT: &str = "oldest-game-finder/1.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_RESOLVE_CONCURRENCY: usize = 8;

/// Endpoints and limits for the upstream Roblox APIs
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub search_url: String,
    /// Base of the place-to-universe endpoint; `/{placeId}/universe` is appended
    pub universe_url: String,
    pub games_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    /// Maximum universe lookups in flight for one request
    pub resolve_concurrency: usize,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            universe_url: DEFAULT_UNIVERSE_URL.to_string(),
            games_url: DEFAULT_GAMES_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            resolve_concurrency: DEFAULT_RESOLVE_CONCURRENCY,
        }
    }
}

impl UpstreamConfig {
    /// Load overrides from environment variables
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(url) = read("ROBLOX_SEARCH_URL") {
            config.search_url = url;
        }
        if let Some(url) = read("ROBLOX_UNIVERSE_URL") {
            config.universe_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = read("ROBLOX_GAMES_URL") {
            config.games_url = url;
        }
        if let Some(secs) = read("UPSTREAM_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .map_err(|e| format!("Invalid UPSTREAM_TIMEOUT_SECS: {}", e))?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(limit) = read("RESOLVE_CONCURRENCY") {
            let limit: usize = limit
                .parse()
                .map_err(|e| format!("Invalid RESOLVE_CONCURRENCY: {}", e))?;
            config.resolve_concurrency = limit.max(1);
        }

        Ok(config)
    }
}
