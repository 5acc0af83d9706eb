//! Per-equipment forecast and risk endpoints.
//!
//! Unknown equipment ids are not errors: the forecast is an empty list and
//! the risk score is 0.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    response::Response,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::debug;

use super::{current_batch, error_response, AppState};
use crate::pipeline::MAX_HORIZON;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/forecast/{equipment_id}", get(forecast))
        .route("/risk", get(risk_all))
        .route("/risk/{equipment_id}", get(risk))
}

/// Query parameters for `GET /forecast/{equipment_id}`.
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    /// Number of hourly steps; the configured default when omitted.
    horizon: Option<usize>,
}

async fn forecast(
    Path(equipment_id): Path<String>,
    Query(params): Query<ForecastQuery>,
    State((store, config)): State<AppState>,
) -> Response {
    // ---
    let horizon = params.horizon.unwrap_or(config.forecast_horizon);
    if horizon == 0 || horizon > MAX_HORIZON {
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("horizon must be between 1 and {MAX_HORIZON}"),
        );
    }

    let analysis = match current_batch(&store).await {
        Ok(analysis) => analysis,
        Err(resp) => return resp,
    };

    let points = analysis.forecast(&equipment_id, horizon);
    debug!(
        "GET /forecast/{} - {} points (horizon {})",
        equipment_id,
        points.len(),
        horizon
    );
    Json(points).into_response()
}

async fn risk(Path(equipment_id): Path<String>, State((store, _)): State<AppState>) -> Response {
    // ---
    match current_batch(&store).await {
        Ok(analysis) => Json(analysis.risk_report(&equipment_id)).into_response(),
        Err(resp) => resp,
    }
}

async fn risk_all(State((store, _)): State<AppState>) -> Response {
    // ---
    match current_batch(&store).await {
        Ok(analysis) => Json(analysis.risk_reports()).into_response(),
        Err(resp) => resp,
    }
}
