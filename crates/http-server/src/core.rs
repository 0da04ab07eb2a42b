use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use db::services::error::ServiceError;
use db::store::EmailStore;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::scoring::{ScoringClient, ScoringError};

// Define a struct to hold our application's shared state.
// Both collaborators are trait objects constructed once at startup and
// injected here, so tests can swap in an in-memory store or a stub client.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EmailStore>,
    pub scoring: Arc<dyn ScoringClient>,
}

// Define a custom error type for our API. The variants distinguish where
// the analyze pipeline failed for logging purposes only; the caller always
// receives the same generic failure payload.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("scoring service error: {0}")]
    Scoring(#[from] ScoringError),

    #[error("store error: {0}")]
    Store(#[from] ServiceError),
}

// Implement `IntoResponse` for `ApiError` to convert it into an HTTP response.
// Every failure mode collapses to a 500 with an undifferentiated payload.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("Error in /analyze-email: {}", self);

        let body = Json(json!({ "error": "An error occurred" }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
