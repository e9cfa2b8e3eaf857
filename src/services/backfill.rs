use crate::db::store::{EntryStore, StoreResult};
use crate::services::mood_score;

/// One-time scoring of legacy entries that were stored without a mood score.
/// Entries without a resolved emotion are left untouched. Returns the number
/// of entries updated.
pub async fn backfill_mood_scores(store: &dyn EntryStore, user_id: &str) -> StoreResult<usize> {
    let entries = store.list_entries(user_id, None).await?;
    let mut updated = 0;

    for entry in entries.iter().filter(|e| e.mood_score.is_none()) {
        let Some(emotion) = entry.final_emotion.as_deref().filter(|e| !e.is_empty()) else {
            continue;
        };

        let confidence =
            mood_score::backfill_confidence(entry.text_confidence, entry.audio_confidence);
        let score = mood_score::score(Some(emotion), confidence);
        store.set_mood_score(entry.id, score).await?;

        tracing::debug!(entry_id = %entry.id, emotion, score, "Backfilled mood score");
        updated += 1;
    }

    tracing::info!(user_id = %user_id, updated, "Mood score backfill complete");
    Ok(updated)
}
