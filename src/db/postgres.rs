use chrono::NaiveDate;
use futures_util::future::{BoxFuture, FutureExt};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::store::{EntryStore, StoreError, StoreResult};
use crate::models::analytics::{Baseline, BurnoutAssessment, PatternKind};
use crate::models::entry::{Entry, EntryRow, NewEntry};

#[derive(Clone)]
pub struct PgEntryStore {
    pool: PgPool,
}

impl PgEntryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl EntryStore for PgEntryStore {
    fn list_entries<'a>(
        &'a self,
        user_id: &'a str,
        since: Option<NaiveDate>,
    ) -> BoxFuture<'a, StoreResult<Vec<Entry>>> {
        async move {
            // Date-prefix comparison works for both stored timestamp forms
            let since = since.map(|d| d.format("%Y-%m-%d").to_string());

            let rows = sqlx::query_as::<_, EntryRow>(
                r#"
                SELECT * FROM mood_entries
                WHERE user_id = $1 AND ($2::text IS NULL OR recorded_at >= $2)
                ORDER BY replace(recorded_at, 'T', ' ') DESC
                "#,
            )
            .bind(user_id)
            .bind(since)
            .fetch_all(&self.pool)
            .await?;

            Ok(rows.into_iter().map(Entry::from).collect())
        }
        .boxed()
    }

    fn insert_entry(&self, entry: NewEntry) -> BoxFuture<'_, StoreResult<Entry>> {
        async move {
            let row = sqlx::query_as::<_, EntryRow>(
                r#"
                INSERT INTO mood_entries (
                    id, user_id, recorded_at, journal_text,
                    text_emotion, text_confidence, audio_emotion, audio_confidence,
                    final_emotion, mood_score
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING *
                "#,
            )
            .bind(entry.id)
            .bind(&entry.user_id)
            .bind(entry.timestamp.to_string())
            .bind(&entry.journal_text)
            .bind(&entry.text_emotion)
            .bind(entry.text_confidence)
            .bind(&entry.audio_emotion)
            .bind(entry.audio_confidence)
            .bind(&entry.final_emotion)
            .bind(entry.mood_score)
            .fetch_one(&self.pool)
            .await?;

            Ok(Entry::from(row))
        }
        .boxed()
    }

    fn set_mood_score(&self, entry_id: Uuid, score: i32) -> BoxFuture<'_, StoreResult<()>> {
        async move {
            sqlx::query("UPDATE mood_entries SET mood_score = $2 WHERE id = $1")
                .bind(entry_id)
                .bind(score)
                .execute(&self.pool)
                .await?;
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
            sqlx::query(
                r#"
                INSERT INTO user_baselines (user_id, avg_mood_score, data_points_used, calculated_at)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (user_id) DO UPDATE SET
                    avg_mood_score = EXCLUDED.avg_mood_score,
                    data_points_used = EXCLUDED.data_points_used,
                    calculated_at = EXCLUDED.calculated_at
                "#,
            )
            .bind(user_id)
            .bind(baseline.avg_mood_score)
            .bind(baseline.data_points_used as i64)
            .bind(baseline.calculation_date)
            .execute(&self.pool)
            .await?;
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
            sqlx::query(
                r#"
                INSERT INTO user_patterns (id, user_id, pattern_type, pattern_data, confidence_score)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(kind.as_str())
            .bind(data)
            .bind(confidence)
            .execute(&self.pool)
            .await?;
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
            sqlx::query(
                r#"
                INSERT INTO burnout_risks (id, user_id, risk_level, risk_score, triggers, entries_analyzed, detected_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(assessment.risk_level.as_str())
            .bind(assessment.risk_score as i32)
            .bind(serde_json::json!(assessment.triggers))
            .bind(assessment.entries_analyzed as i32)
            .bind(assessment.assessment_date)
            .execute(&self.pool)
            .await?;
            Ok(())
        }
        .boxed()
    }

    fn ping(&self) -> BoxFuture<'_, StoreResult<()>> {
        async move {
            if self.pool.is_closed() {
                return Err(StoreError::Unavailable("connection pool closed".into()));
            }
            sqlx::query_scalar::<_, i32>("SELECT 1")
                .fetch_one(&self.pool)
                .await?;
            Ok(())
        }
        .boxed()
    }
}
