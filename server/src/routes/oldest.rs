use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::state::ServerState;
use crate::types::*;

/// Find the oldest game whose title contains the query.
///
/// Failures are returned as `{ok: false, ...}` with HTTP 200. A body sent
/// without a JSON content type is ignored, which reads as an empty query.
pub async fn find_oldest(
    State(state): State<ServerState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<OldestResponse>, Json<ErrorResponse>> {
    let request_id = uuid::Uuid::new_v4();

    let payload = match payload {
        Ok(Json(body)) => OldestRequest::from_body(body),
        Err(JsonRejection::MissingJsonContentType(_)) => OldestRequest::default(),
        Err(rejection) => {
            log::info!("[Routes] {} rejected body: {}", request_id, rejection);
            return Err(Json(ErrorResponse::new(rejection.body_text())));
        }
    };

    let query = payload.query_text();
    log::info!("[Routes] {} oldest lookup for {:?}", request_id, query.trim());

    match state.finder().find_oldest(&query).await {
        Ok(game) => {
            log::info!(
                "[Routes] {} found place {} created {}",
                request_id,
                game.place_id,
                game.created
            );
            Ok(Json(OldestResponse::from(game)))
        }
        Err(error) => {
            log::info!("[Routes] {} lookup failed: {}", request_id, error);
            Err(Json(ErrorResponse::from(error)))
        }
    }
}
