//! Route Definitions
//!
//! Maps URLs to handlers with type-safe routing.

use super::handlers::*;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Build the API router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check (high priority)
        .route("/health", get(health_handler))
        // Round snapshot for polling clients
        .route("/api/game/state", get(game_state_handler))
        // Phase-gated join
        .route("/api/game/join", post(join_handler))
        // Public card catalog
        .route("/api/game/card/:card_id", get(card_handler))
        // Attach shared state
        .with_state(state)
}
