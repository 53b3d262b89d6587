//! Request Handlers
//!
//! Thin pass-throughs from the HTTP surface to the round engine.

use super::{errors::ApiError, middleware::RequestId, models::*};
use crate::game::card::card_layout;
use crate::game::engine::{JoinError, RoundEngine};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::Utc;
use std::sync::Arc;

/// Shared application state
pub struct AppState {
    pub engine: Arc<RoundEngine>,
}

/// Health check handler - minimal response time
/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Running".to_string(),
    })
}

/// Round snapshot handler for polling clients
/// GET /api/game/state
pub async fn game_state_handler(State(state): State<Arc<AppState>>) -> Json<RoundSnapshot> {
    let round = state.engine.current_round().await;
    let server_time = Utc::now().timestamp_millis();
    Json(RoundSnapshot::from_round(&round, server_time))
}

/// Join handler, phase-gated by the engine
/// POST /api/game/join
pub async fn join_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<JoinRequest>,
) -> Result<Json<JoinResponse>, ApiError> {
    if request.player_id.is_empty() {
        return Err(ApiError::bad_request(
            request_id.0,
            "playerId must not be empty".to_string(),
        ));
    }

    state
        .engine
        .join(&request.player_id, &request.name, request.card_ids)
        .await
        .map_err(|e| match e {
            JoinError::SelectionClosed { .. } => {
                ApiError::phase_conflict(request_id.0.clone(), e.to_string())
            }
            JoinError::TooManyCards { .. } => {
                ApiError::bad_request(request_id.0.clone(), e.to_string())
            }
        })?;

    Ok(Json(JoinResponse { ok: true }))
}

/// Card catalog lookup. The catalog is public and reproducible, so this
/// is a pure function of the path parameter; out-of-range ids resolve
/// to the fallback layout rather than an error.
/// GET /api/game/card/{id}
pub async fn card_handler(Path(card_id): Path<u32>) -> Json<CardResponse> {
    Json(CardResponse {
        card_id,
        numbers: card_layout(card_id).to_vec(),
    })
}
