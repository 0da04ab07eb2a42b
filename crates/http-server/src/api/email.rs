// POST endpoint /analyze-email

use crate::core::{ApiError, AppState};
use axum::{extract::State, Json};
use db::models::email::{AnalyzeEmailResponse, EmailSubmission};
use tracing::info;

/// Handles the request to analyze an email.
/// 1. Forwards the submission to the scoring service.
/// 2. Upserts the returned scores into the record store, keyed by `email_id`.
/// 3. Acknowledges the caller.
/// Any failure along the pipeline is converted into a single generic error
/// response by `ApiError`; no record is written unless scoring succeeded.
#[axum::debug_handler]
pub async fn analyze_email_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<EmailSubmission>,
) -> Result<Json<AnalyzeEmailResponse>, ApiError> {
    info!(
        email_id = %payload.email_id,
        sender = %payload.sender_email,
        "Received request at /analyze-email"
    );

    // The `?` operator converts `ScoringError` and `ServiceError` into our
    // `ApiError` thanks to the `#[from]` attributes on the enum.
    let scores = app_state.scoring.score_email(&payload).await?;

    app_state
        .store
        .upsert_scores(&payload.email_id, &scores)
        .await?;

    Ok(Json(AnalyzeEmailResponse {
        message: "Email analyzed and updated successfully".to_string(),
    }))
}
