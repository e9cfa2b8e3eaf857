use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::db::store::EntryStore;
use crate::dto::{BackfillResponse, CreateEntryRequest, EntryListResponse, EntryQuery};
use crate::error::{AppError, AppResult};
use crate::models::entry::{Entry, NewEntry, Timestamp};
use crate::services::{backfill, mood_score};
use crate::AppState;

pub async fn create_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateEntryRequest>,
) -> AppResult<Json<Entry>> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    body.validate_has_emotion().map_err(AppError::Validation)?;

    let timestamp = match body.timestamp.as_deref() {
        Some(raw) => Timestamp::parse(raw).map_err(|e| AppError::Validation(e.to_string()))?,
        None => Timestamp::Sql(Utc::now().naive_utc()),
    };

    let final_emotion = body.resolve_final_emotion();
    let confidence = mood_score::ingest_confidence(body.text_confidence, body.audio_confidence);
    let score = mood_score::score(final_emotion.as_deref(), confidence);

    let entry = state
        .store
        .insert_entry(NewEntry {
            id: Uuid::new_v4(),
            user_id: auth_user.id,
            timestamp,
            journal_text: body.journal_text,
            text_emotion: body.text_emotion,
            text_confidence: body.text_confidence,
            audio_emotion: body.audio_emotion,
            audio_confidence: body.audio_confidence,
            final_emotion,
            mood_score: Some(score),
        })
        .await?;

    tracing::info!(
        entry_id = %entry.id,
        user_id = %entry.user_id,
        mood_score = score,
        "Entry recorded"
    );
    Ok(Json(entry))
}

pub async fn list_entries(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<EntryQuery>,
) -> AppResult<Json<EntryListResponse>> {
    let mut entries = state.store.list_entries(&auth_user.id, None).await?;
    let total_count = entries.len();

    if let Some(limit) = query.limit() {
        entries.truncate(limit);
    }

    Ok(Json(EntryListResponse {
        entries,
        total_count,
    }))
}

pub async fn backfill(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<BackfillResponse>> {
    let updated = backfill::backfill_mood_scores(state.store.as_ref(), &auth_user.id).await?;
    Ok(Json(BackfillResponse { updated }))
}
