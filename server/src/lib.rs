//! Oldest Game Finder API Server
//!
//! Axum routes and shared state over the core lookup pipeline.

pub mod config;
pub mod routes;
pub mod state;
pub mod types;

pub use config::ServerConfig;
pub use state::{ServerState, ServerStateFactory};
