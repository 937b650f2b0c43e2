use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::config::MAX_BODY_BYTES;
use crate::state::ServerState;

pub mod debug;
pub mod health;
pub mod oldest;

pub fn router(state: ServerState) -> Router {
    Router::new()
        // Health check
        .route("/", get(health::health_check))
        // Lookup
        .route("/api/oldest", post(oldest::find_oldest))
        // Diagnostics
        .route("/api/debug", get(debug::debug_search))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
