use std::time::Duration;

use async_trait::async_trait;
use db::models::email::{EmailScores, EmailSubmission};
use reqwest::StatusCode;
use thiserror::Error;
use tracing::info;

// No retry policy is defined for the scoring call; the timeout is a sane
// default so a stalled backend cannot pin request tasks indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("request to scoring service failed: {0}")]
    Request(reqwest::Error),

    #[error("scoring service responded with status {0}")]
    Status(StatusCode),

    #[error("scoring service response could not be decoded: {0}")]
    InvalidResponse(reqwest::Error),
}

/// Computes risk, spam and grammar scores for a submitted email.
#[async_trait]
pub trait ScoringClient: Send + Sync {
    async fn score_email(&self, submission: &EmailSubmission)
        -> Result<EmailScores, ScoringError>;
}

/// Production client calling the remote scoring service over HTTP.
/// Each submission results in exactly one `POST <base>/process-email`
/// attempt; failures are surfaced, never retried.
pub struct HttpScoringClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpScoringClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to construct HTTP client");
        let base_url: String = base_url.into();

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ScoringClient for HttpScoringClient {
    async fn score_email(
        &self,
        submission: &EmailSubmission,
    ) -> Result<EmailScores, ScoringError> {
        let url = format!("{}/process-email", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(submission)
            .send()
            .await
            .map_err(ScoringError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoringError::Status(status));
        }

        // A body missing any of the three score fields fails to decode and
        // is rejected as a whole, so partial scores never reach the store.
        let scores = response
            .json::<EmailScores>()
            .await
            .map_err(ScoringError::InvalidResponse)?;

        info!(email_id = %submission.email_id, ?scores, "Response from scoring service");
        Ok(scores)
    }
}
