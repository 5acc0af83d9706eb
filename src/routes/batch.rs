//! Batch upload and batch summary endpoints.
//!
//! `POST /batch` replaces the served batch with the uploaded delimited text.
//! A batch that cannot be read as a table is refused with 400 and the
//! previous batch keeps being served.

use axum::{
    extract::State, http::StatusCode, response::IntoResponse, response::Response,
    routing::get, Json, Router,
};
use tracing::{debug, info};

use super::{current_batch, error_response, AppState};
use crate::PipelineError;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/batch", get(summary).post(upload))
}

async fn upload(State((store, _)): State<AppState>, body: String) -> Response {
    // ---
    info!("POST /batch - {} bytes", body.len());

    match store.load_text(&body).await {
        Ok(summary) => {
            debug!("POST /batch - Returning OK");
            (StatusCode::OK, Json(summary)).into_response()
        }
        Err(e @ PipelineError::BatchInvalid(_)) => {
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        }
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

async fn summary(State((store, _)): State<AppState>) -> Response {
    // ---
    match current_batch(&store).await {
        Ok(analysis) => Json(analysis.summary().clone()).into_response(),
        Err(resp) => resp,
    }
}
