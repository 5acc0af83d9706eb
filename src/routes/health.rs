// src/routes/health.rs
//! API health check endpoint for the Equipflow backend.
//!
//! This module defines the `/health` route used by container orchestrators
//! and CI pipelines to verify that the service is running. It is a sibling
//! module in the `routes` directory and follows the Explicit Module Boundary
//! Pattern (EMBP):
//! - Internal to this file: endpoint handler(s) and related types
//! - Exports to the gateway (`mod.rs`): a subrouter containing the `/health` route

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use uuid::Uuid;

use super::AppState;

/// JSON response body for the `/health` endpoint.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    /// Id of the batch currently served, if any.
    batch_id: Option<Uuid>,
}

/// Handle `GET /health`.
///
/// Always `ok` while the process is serving; `batch_id` tells whether a
/// batch has been loaded yet.
async fn health(State((store, _)): State<AppState>) -> Json<HealthResponse> {
    // ---
    let batch_id = store.current().await.map(|a| a.summary().batch_id);
    Json(HealthResponse {
        status: "ok",
        batch_id,
    })
}

/// Create a subrouter containing the `/health` route.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
