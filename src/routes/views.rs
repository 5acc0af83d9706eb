//! Read-only views of the current batch: latest readings, maintenance
//! alerts, chart rows and the list of equipment ids.

use axum::{extract::State, response::IntoResponse, response::Response, routing::get, Json, Router};
use tracing::debug;

use super::{current_batch, AppState};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/readings/latest", get(latest))
        .route("/alerts", get(alerts))
        .route("/chart", get(chart))
        .route("/equipment", get(equipment))
}

async fn latest(State((store, _)): State<AppState>) -> Response {
    // ---
    match current_batch(&store).await {
        Ok(analysis) => {
            debug!("GET /readings/latest - {} ids", analysis.latest().len());
            Json(analysis.latest()).into_response()
        }
        Err(resp) => resp,
    }
}

async fn alerts(State((store, _)): State<AppState>) -> Response {
    // ---
    match current_batch(&store).await {
        Ok(analysis) => {
            debug!("GET /alerts - {} alerts", analysis.alerts().len());
            Json(analysis.alerts()).into_response()
        }
        Err(resp) => resp,
    }
}

async fn chart(State((store, _)): State<AppState>) -> Response {
    // ---
    match current_batch(&store).await {
        Ok(analysis) => Json(analysis.chart()).into_response(),
        Err(resp) => resp,
    }
}

async fn equipment(State((store, _)): State<AppState>) -> Response {
    // ---
    match current_batch(&store).await {
        Ok(analysis) => Json(analysis.equipment_ids()).into_response(),
        Err(resp) => resp,
    }
}
