//! HTTP surface
//!
//! Aggregation never fails a request: a degraded cycle returns whatever
//! segments survived, down to an empty array. The only non-200 the service
//! can produce would be a defect in the merge logic itself.

use std::sync::Arc;

use axum::{extract::State, response::Json, routing::get, Router};
use chrono::Utc;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::aggregation::Aggregator;
use crate::models::Instrument;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
}

/// Create the API router
pub fn create_router(aggregator: Arc<Aggregator>) -> Router {
    let state = AppState { aggregator };

    Router::new()
        .route("/health", get(health_check))
        .route("/api/all", get(get_all))
        .route("/api/bist", get(get_bist))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ===== Route Handlers =====

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Full aggregated collection, in the fixed app ordering.
async fn get_all(State(state): State<AppState>) -> Json<Vec<Instrument>> {
    Json(state.aggregator.collect_all().await)
}

/// Domestic equity board only.
async fn get_bist(State(state): State<AppState>) -> Json<Vec<Instrument>> {
    Json(state.aggregator.collect_bist().await)
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    timestamp: String,
}
