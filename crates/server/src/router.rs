//! HTTP router construction.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api;
use crate::state::AppState;

/// Build the application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/rules", get(api::rules_list))
        .route("/rules/requirements", get(api::rules_requirements))
        .route("/compliance/validate", post(api::compliance_validate))
        .route("/draft/generate", post(api::draft_generate))
        .route("/draft/review", post(api::draft_review))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
