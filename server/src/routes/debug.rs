use axum::extract::{Query, State};
use axum::Json;

use crate::state::ServerState;
use crate::types::*;

/// Run only the search step and show what the upstream returned
pub async fn debug_search(
    State(state): State<ServerState>,
    Query(params): Query<DebugQuery>,
) -> Result<Json<DebugResponse>, Json<ErrorResponse>> {
    let query = params.q.unwrap_or_default();

    state
        .finder()
        .debug_search(&query)
        .await
        .map(|report| Json(DebugResponse::from(report)))
        .map_err(|error| {
            log::warn!("[Routes] Debug search failed: {}", error);
            Json(ErrorResponse::from(error))
        })
}
