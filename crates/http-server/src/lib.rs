use axum::{routing::post, Router};
use tower_http::cors::CorsLayer;

use crate::core::AppState;

pub mod api;
pub mod core;
pub mod scoring;

/// Builds the application router. Kept separate from `main` so tests can
/// drive the full request pipeline with substitute collaborators.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/analyze-email", post(api::email::analyze_email_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
