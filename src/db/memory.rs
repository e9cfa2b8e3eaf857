use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveDate;
use futures_util::future::{BoxFuture, FutureExt};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::db::store::{EntryStore, StoreError, StoreResult};
use crate::models::analytics::{Baseline, BurnoutAssessment, PatternKind};
use crate::models::entry::{Entry, NewEntry};

#[derive(Debug, Clone)]
pub struct StoredPattern {
    pub user_id: String,
    pub kind: PatternKind,
    pub data: serde_json::Value,
    pub confidence: f64,
}

/// In-process store for exercising the analytics against fixed fixtures.
/// `set_failing(true)` makes every call return `StoreError::Unavailable`.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<Entry>>,
    baselines: Mutex<HashMap<String, Baseline>>,
    patterns: Mutex<Vec<StoredPattern>>,
    burnout: Mutex<Vec<(String, BurnoutAssessment)>>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn seed(&self, entries: impl IntoIterator<Item = Entry>) {
        self.entries.lock().await.extend(entries);
    }

    pub async fn baseline_for(&self, user_id: &str) -> Option<Baseline> {
        self.baselines.lock().await.get(user_id).cloned()
    }

    pub async fn patterns(&self) -> Vec<StoredPattern> {
        self.patterns.lock().await.clone()
    }

    pub async fn burnout_records(&self) -> Vec<(String, BurnoutAssessment)> {
        self.burnout.lock().await.clone()
    }

    fn check(&self) -> StoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store set to fail".into()));
        }
        Ok(())
    }
}

impl EntryStore for MemoryStore {
    fn list_entries<'a>(
        &'a self,
        user_id: &'a str,
        since: Option<NaiveDate>,
    ) -> BoxFuture<'a, StoreResult<Vec<Entry>>> {
        async move {
            self.check()?;
            let since = since.map(|d| d.format("%Y-%m-%d").to_string());
            let mut found: Vec<Entry> = self
                .entries
                .lock()
                .await
                .iter()
                .filter(|e| e.user_id == user_id)
                .filter(|e| match &since {
                    Some(cutoff) => e.timestamp.to_string().as_str() >= cutoff.as_str(),
                    None => true,
                })
                .cloned()
                .collect();
            found.sort_by_key(|e| std::cmp::Reverse(e.timestamp.sort_key()));
            Ok(found)
        }
        .boxed()
    }

    fn insert_entry(&self, entry: NewEntry) -> BoxFuture<'_, StoreResult<Entry>> {
        async move {
            self.check()?;
            let entry = Entry::from(entry);
            self.entries.lock().await.push(entry.clone());
            Ok(entry)
        }
        .boxed()
    }

    fn set_mood_score(&self, entry_id: Uuid, score: i32) -> BoxFuture<'_, StoreResult<()>> {
        async move {
            self.check()?;
            if let Some(entry) = self
                .entries
                .lock()
                .await
                .iter_mut()
                .find(|e| e.id == entry_id)
            {
                entry.mood_score = Some(score);
            }
            Ok(())
        }
        .boxed()
    }

    fn upsert_baseline<'a>(
        &'a self,
        user_id: &'a str,
        baseline: &'a Baseline,
    ) -> BoxFuture<'a, StoreResult<()>> {
        async move {
            self.check()?;
            self.baselines
                .lock()
                .await
                .insert(user_id.to_string(), baseline.clone());
            Ok(())
        }
        .boxed()
    }

    fn append_pattern<'a>(
        &'a self,
        user_id: &'a str,
        kind: PatternKind,
        data: serde_json::Value,
        confidence: f64,
    ) -> BoxFuture<'a, StoreResult<()>> {
        async move {
            self.check()?;
            self.patterns.lock().await.push(StoredPattern {
                user_id: user_id.to_string(),
                kind,
                data,
                confidence,
            });
            Ok(())
        }
        .boxed()
    }

    fn record_burnout<'a>(
        &'a self,
        user_id: &'a str,
        assessment: &'a BurnoutAssessment,
    ) -> BoxFuture<'a, StoreResult<()>> {
        async move {
            self.check()?;
            self.burnout
                .lock()
                .await
                .push((user_id.to_string(), assessment.clone()));
            Ok(())
        }
        .boxed()
    }

    fn ping(&self) -> BoxFuture<'_, StoreResult<()>> {
        async move { self.check() }.boxed()
    }
}
