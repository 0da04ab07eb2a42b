use crate::models::email::{EmailRecord, EmailScores};
use crate::services::error::ServiceError;
use sqlx::PgPool;
use tracing::debug;

/// Upserts the scores for an email record keyed by `email_id`.
/// If a record with the key already exists its scores are overwritten;
/// otherwise a new record is created. The informational `sender_email`
/// and `body` columns are not touched by this write. Last write wins
/// between concurrent upserts of the same key.
pub async fn upsert_email_scores(
    pool: &PgPool,
    email_id: &str,
    scores: &EmailScores,
) -> Result<EmailRecord, ServiceError> {
    let record = sqlx::query_as::<_, EmailRecord>(
        r#"
        INSERT INTO email_records (email_id, risk_score, spam_score, grammar_score)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (email_id) DO UPDATE
        SET risk_score = EXCLUDED.risk_score,
            spam_score = EXCLUDED.spam_score,
            grammar_score = EXCLUDED.grammar_score
        RETURNING email_id, sender_email, body, risk_score, spam_score, grammar_score
        "#,
    )
    .bind(email_id)
    .bind(scores.risk_score)
    .bind(scores.spam_score)
    .bind(scores.grammar_score)
    .fetch_one(pool)
    .await?;

    debug!(email_id, "Upserted email record scores");
    Ok(record)
}
