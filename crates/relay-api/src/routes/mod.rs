//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{health, messages, reactions};
use crate::state::AppState;

/// Create the main API router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        // API v1 endpoints
        .nest("/api/v1", api_v1_routes())
        // Health probes stay outside the versioned prefix
        .merge(health_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new().merge(message_routes())
}

/// Message routes
fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/messages", get(messages::list_messages))
        .route("/messages", post(messages::create_message))
        .route(
            "/messages/:message_id/reactions",
            post(reactions::create_reaction),
        )
}
