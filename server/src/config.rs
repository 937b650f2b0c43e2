use std::net::SocketAddr;

use oldest_finder_core::UpstreamConfig;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
/// Largest accepted request body
pub const MAX_BODY_BYTES: usize = 200 * 1024;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub upstream: UpstreamConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST")
            .filter(|host| !host.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port: u16 = match lookup("PORT").filter(|port| !port.trim().is_empty()) {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|e| format!("Invalid PORT: {}", e))?,
            None => DEFAULT_PORT,
        };

        let bind_addr: SocketAddr = format!("{}:{}", host.trim(), port)
            .parse()
            .map_err(|e| format!("Invalid address: {}", e))?;

        let upstream = UpstreamConfig::from_lookup(&lookup)?;

        Ok(Self {
            bind_addr,
            upstream,
        })
    }
}
