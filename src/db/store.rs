use chrono::NaiveDate;
use futures_util::future::BoxFuture;
use uuid::Uuid;

use crate::models::analytics::{Baseline, BurnoutAssessment, PatternKind};
use crate::models::entry::{Entry, NewEntry};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Entry store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Source of truth for journal entries, plus best-effort sinks for derived
/// analytics. Every call is self-contained: implementations acquire and
/// release their connection within the returned future.
pub trait EntryStore: Send + Sync {
    /// Entries for `user_id`, newest first. With `since`, only entries whose
    /// stored timestamp falls on or after that date.
    fn list_entries<'a>(
        &'a self,
        user_id: &'a str,
        since: Option<NaiveDate>,
    ) -> BoxFuture<'a, StoreResult<Vec<Entry>>>;

    fn insert_entry(&self, entry: NewEntry) -> BoxFuture<'_, StoreResult<Entry>>;

    fn set_mood_score(&self, entry_id: Uuid, score: i32) -> BoxFuture<'_, StoreResult<()>>;

    /// One row per user; concurrent writers race and the last one wins.
    fn upsert_baseline<'a>(
        &'a self,
        user_id: &'a str,
        baseline: &'a Baseline,
    ) -> BoxFuture<'a, StoreResult<()>>;

    fn append_pattern<'a>(
        &'a self,
        user_id: &'a str,
        kind: PatternKind,
        data: serde_json::Value,
        confidence: f64,
    ) -> BoxFuture<'a, StoreResult<()>>;

    fn record_burnout<'a>(
        &'a self,
        user_id: &'a str,
        assessment: &'a BurnoutAssessment,
    ) -> BoxFuture<'a, StoreResult<()>>;

    fn ping(&self) -> BoxFuture<'_, StoreResult<()>>;
}
