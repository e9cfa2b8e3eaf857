use axum::{extract::State, Extension, Json};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::db::store::EntryStore;
use crate::dto::{
    AnalyticsResponse, BurnoutResponse, ForecastResponse, SimulateRequest, SimulateResponse,
};
use crate::error::{AppError, AppResult};
use crate::models::analytics::{Baseline, PatternKind, TemporalPatterns};
use crate::services::{baseline, burnout, forecast, insights, patterns, simulation};
use crate::AppState;

pub async fn get_analytics(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<AnalyticsResponse>> {
    let store = state.store.as_ref();
    let now = Utc::now().naive_utc();

    let baseline = baseline::compute_baseline(store, &auth_user.id, now).await;
    let patterns = patterns::detect_patterns(store, &auth_user.id).await;

    persist_analytics(store, &auth_user.id, baseline.as_ref(), patterns.as_ref()).await;

    let insights = insights::format_insights(baseline.as_ref(), patterns.as_ref());

    Ok(Json(AnalyticsResponse {
        baseline,
        patterns,
        insights,
    }))
}

pub async fn get_burnout(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<BurnoutResponse>> {
    let now = Utc::now().naive_utc();
    let assessment = burnout::assess_burnout_risk(
        state.store.as_ref(),
        &auth_user.id,
        now,
        state.config.burnout_window_days,
    )
    .await;

    if let Err(e) = state.store.record_burnout(&auth_user.id, &assessment).await {
        tracing::warn!(user_id = %auth_user.id, error = %e, "Failed to record burnout assessment");
    }

    Ok(Json(BurnoutResponse { assessment }))
}

pub async fn get_forecast(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<ForecastResponse>> {
    let mut rng = match state.config.forecast_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let now = Utc::now().naive_utc();

    let forecast =
        forecast::generate_forecast(state.store.as_ref(), &auth_user.id, now, &mut rng).await;

    Ok(Json(ForecastResponse { forecast }))
}

pub async fn simulate(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<SimulateRequest>,
) -> AppResult<Json<SimulateResponse>> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let now = Utc::now().naive_utc();
    let simulation =
        simulation::simulate_scenario(state.store.as_ref(), &auth_user.id, &body.scenario, now)
            .await;

    Ok(Json(SimulateResponse { simulation }))
}

/// Derived analytics are cached for other consumers. Failures are logged and
/// never fail the request.
async fn persist_analytics(
    store: &dyn EntryStore,
    user_id: &str,
    baseline: Option<&Baseline>,
    patterns: Option<&TemporalPatterns>,
) {
    if let Some(baseline) = baseline {
        if let Err(e) = store.upsert_baseline(user_id, baseline).await {
            tracing::warn!(user_id = %user_id, error = %e, "Failed to store baseline");
        }
    }

    let Some(patterns) = patterns else {
        return;
    };

    let snapshots = [
        (PatternKind::Weekly, !patterns.weekly.is_empty(), serde_json::to_value(&patterns.weekly)),
        (
            PatternKind::TimeOfDay,
            !patterns.time_of_day.is_empty(),
            serde_json::to_value(&patterns.time_of_day),
        ),
    ];

    for (kind, present, data) in snapshots {
        if !present {
            continue;
        }
        let data = match data {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(pattern = kind.as_str(), error = %e, "Failed to encode pattern");
                continue;
            }
        };
        if let Err(e) = store
            .append_pattern(user_id, kind, data, kind.confidence())
            .await
        {
            tracing::warn!(user_id = %user_id, pattern = kind.as_str(), error = %e, "Failed to store pattern");
        }
    }
}
