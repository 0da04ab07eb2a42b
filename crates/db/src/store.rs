use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::email::{EmailRecord, EmailScores};
use crate::services::email::upsert_email_scores;
use crate::services::error::ServiceError;

/// Keyed persistence for email records. Implementations provide
/// update-if-present, insert-if-absent semantics on `email_id` and return
/// the record as stored, reflecting the new scores.
///
/// The store is handed to the HTTP handler as an injected dependency so
/// tests can substitute [`MemoryEmailStore`] for the database.
#[async_trait]
pub trait EmailStore: Send + Sync {
    async fn upsert_scores(
        &self,
        email_id: &str,
        scores: &EmailScores,
    ) -> Result<EmailRecord, ServiceError>;
}

/// Postgres-backed store used in production. The pool is created once at
/// startup and shared for the life of the process.
pub struct PgEmailStore {
    pool: PgPool,
}

impl PgEmailStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmailStore for PgEmailStore {
    async fn upsert_scores(
        &self,
        email_id: &str,
        scores: &EmailScores,
    ) -> Result<EmailRecord, ServiceError> {
        upsert_email_scores(&self.pool, email_id, scores).await
    }
}

/// In-memory store with the same last-write-wins upsert semantics as the
/// database. Used as the substitute store in tests.
#[derive(Default)]
pub struct MemoryEmailStore {
    records: Mutex<HashMap<String, EmailRecord>>,
}

impl MemoryEmailStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, email_id: &str) -> Option<EmailRecord> {
        self.records
            .lock()
            .expect("store mutex poisoned")
            .get(email_id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().expect("store mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl EmailStore for MemoryEmailStore {
    async fn upsert_scores(
        &self,
        email_id: &str,
        scores: &EmailScores,
    ) -> Result<EmailRecord, ServiceError> {
        let mut records = self.records.lock().expect("store mutex poisoned");
        let record = records
            .entry(email_id.to_string())
            .or_insert_with(|| EmailRecord {
                email_id: email_id.to_string(),
                sender_email: None,
                body: None,
                risk_score: 0.0,
                spam_score: 0.0,
                grammar_score: 0.0,
            });

        record.risk_score = scores.risk_score;
        record.spam_score = scores.spam_score;
        record.grammar_score = scores.grammar_score;

        Ok(record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(risk: f64, spam: f64, grammar: f64) -> EmailScores {
        EmailScores {
            risk_score: risk,
            spam_score: spam,
            grammar_score: grammar,
        }
    }

    #[tokio::test]
    async fn upsert_creates_record_when_absent() {
        let store = MemoryEmailStore::new();

        let record = store
            .upsert_scores("e1", &scores(0.2, 0.1, 0.9))
            .await
            .unwrap();

        assert_eq!(record.email_id, "e1");
        assert_eq!(record.risk_score, 0.2);
        assert_eq!(record.spam_score, 0.1);
        assert_eq!(record.grammar_score, 0.9);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn upsert_overwrites_scores_for_existing_key() {
        let store = MemoryEmailStore::new();

        store
            .upsert_scores("e1", &scores(0.2, 0.1, 0.9))
            .await
            .unwrap();
        let record = store
            .upsert_scores("e1", &scores(0.8, 0.7, 0.3))
            .await
            .unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(record.risk_score, 0.8);
        assert_eq!(record.spam_score, 0.7);
        assert_eq!(record.grammar_score, 0.3);
        assert_eq!(store.get("e1").unwrap(), record);
    }

    #[tokio::test]
    async fn upsert_keeps_distinct_keys_separate() {
        let store = MemoryEmailStore::new();

        store
            .upsert_scores("e1", &scores(0.2, 0.1, 0.9))
            .await
            .unwrap();
        store
            .upsert_scores("e2", &scores(0.5, 0.5, 0.5))
            .await
            .unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("e1").unwrap().risk_score, 0.2);
        assert_eq!(store.get("e2").unwrap().risk_score, 0.5);
    }
}
