use chrono::NaiveDateTime;

use crate::db::store::EntryStore;
use crate::models::analytics::Baseline;
use crate::models::entry::Entry;
use crate::services::stats;

/// Average mood over the user's full history. `None` when there is nothing to
/// average or the store cannot be read.
pub async fn compute_baseline(
    store: &dyn EntryStore,
    user_id: &str,
    now: NaiveDateTime,
) -> Option<Baseline> {
    let entries = match store.list_entries(user_id, None).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(user_id = %user_id, error = %e, "Baseline unavailable: entry store failed");
            return None;
        }
    };

    let baseline = baseline_from_entries(&entries, now);
    match &baseline {
        Some(b) => tracing::debug!(
            user_id = %user_id,
            avg_mood_score = b.avg_mood_score,
            data_points_used = b.data_points_used,
            "Baseline computed"
        ),
        None => tracing::debug!(user_id = %user_id, entries = entries.len(), "Not enough data for baseline"),
    }
    baseline
}

pub fn baseline_from_entries(entries: &[Entry], now: NaiveDateTime) -> Option<Baseline> {
    if entries.is_empty() {
        return None;
    }

    let scores: Vec<f64> = entries
        .iter()
        .filter_map(|e| e.mood_score)
        .map(f64::from)
        .collect();

    Some(Baseline {
        avg_mood_score: stats::mean(&scores)?,
        data_points_used: entries.len(),
        calculation_date: now,
    })
}
