//! HTTP gateway: merges every sibling subrouter and attaches shared state.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit, http::StatusCode, response::IntoResponse, response::Response,
    Json, Router,
};
use serde::Serialize;

use crate::{Analysis, BatchStore, Config};

mod batch;
mod forecast;
mod health;
mod views;

/// State shared by every handler.
pub type AppState = (BatchStore, Config);

// ---

pub fn router(store: BatchStore, config: Config) -> Router {
    // ---
    let body_limit = config.max_upload_bytes;

    Router::new()
        .merge(batch::router())
        .merge(views::router())
        .merge(forecast::router())
        .merge(health::router())
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state((store, config))
}

// ---

/// JSON body for every non-2xx response.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    // ---
    let body = ErrorBody {
        error: message.into(),
    };
    (status, Json(body)).into_response()
}

/// The current batch's views, or a 404 response when nothing has loaded.
async fn current_batch(store: &BatchStore) -> Result<Arc<Analysis>, Response> {
    // ---
    store
        .current()
        .await
        .ok_or_else(|| error_response(StatusCode::NOT_FOUND, "no batch loaded"))
}
