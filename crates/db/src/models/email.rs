use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// DTO for the inbound analysis request. Field names follow the external
// JSON contract, hence the `senderEmail` rename. The same payload is
// forwarded verbatim to the scoring service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailSubmission {
    pub email_id: String,
    #[serde(rename = "senderEmail")]
    pub sender_email: String,
    pub body: String,
}

/// Scores computed by the scoring service. All three fields are required:
/// a response missing any of them is treated as malformed and rejected as
/// a whole, so a partial score set is never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmailScores {
    pub risk_score: f64,
    pub spam_score: f64,
    pub grammar_score: f64,
}

/// A persisted email record, keyed by `email_id`. Scores are non-optional
/// because a record is only ever written after a successful scoring call;
/// there is no "pending" state.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct EmailRecord {
    pub email_id: String,
    pub sender_email: Option<String>,
    pub body: Option<String>,
    pub risk_score: f64,
    pub spam_score: f64,
    pub grammar_score: f64,
}

// DTO for the API success response.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeEmailResponse {
    pub message: String,
}
