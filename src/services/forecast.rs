use chrono::{Datelike, NaiveDateTime};
use rand::Rng;

use crate::db::store::EntryStore;
use crate::models::analytics::{
    Baseline, Forecast, ForecastDay, ForecastOutcome, MoodTrend, TemporalPatterns,
};
use crate::services::baseline::compute_baseline;
use crate::services::lexicon::WEEKDAY_NAMES;
use crate::services::patterns::detect_patterns;

pub const FORECAST_DAYS: usize = 3;
const FALLBACK_CONFIDENCE: f64 = 0.5;

/// Project mood for the three days after `now`. Randomness comes from `rng`
/// so a seeded generator gives reproducible output.
pub async fn generate_forecast<R: Rng + Send>(
    store: &dyn EntryStore,
    user_id: &str,
    now: NaiveDateTime,
    rng: &mut R,
) -> ForecastOutcome {
    let baseline = compute_baseline(store, user_id, now).await;
    let patterns = detect_patterns(store, user_id).await;

    match (baseline, patterns) {
        (Some(baseline), Some(patterns)) => {
            ForecastOutcome::Ready(forecast_from(&baseline, &patterns, now, rng))
        }
        _ => {
            tracing::debug!(user_id = %user_id, "Forecast skipped: insufficient data");
            ForecastOutcome::insufficient()
        }
    }
}

pub fn forecast_from<R: Rng + ?Sized>(
    baseline: &Baseline,
    patterns: &TemporalPatterns,
    now: NaiveDateTime,
    rng: &mut R,
) -> Forecast {
    let base_mood = baseline.avg_mood_score;
    let today = now.weekday().num_days_from_monday() as usize;

    let forecast_days = (0..FORECAST_DAYS)
        .map(|i| {
            let weekday = (today + i + 1) % 7;
            let day_name = WEEKDAY_NAMES[weekday];

            // Truncated like the drawn path; the exact average stays in `base_mood`
            if patterns.weekly.is_empty() {
                return ForecastDay {
                    day_name,
                    predicted_mood: base_mood as i32,
                    confidence: FALLBACK_CONFIDENCE,
                    trend: MoodTrend::Stable,
                };
            }

            let historical = patterns.weekly.get(&weekday).copied().unwrap_or(base_mood);
            let variation: i32 = rng.gen_range(-5..=5);
            let predicted_mood = (historical + f64::from(variation)).clamp(0.0, 100.0) as i32;
            let confidence = round2(0.6 + rng.gen::<f64>() * 0.2);

            ForecastDay {
                day_name,
                predicted_mood,
                confidence,
                trend: trend_against(predicted_mood, base_mood),
            }
        })
        .collect();

    Forecast {
        base_mood,
        forecast_days,
        generated_at: now,
    }
}

/// Within 10 points of the baseline is stable.
pub fn trend_against(predicted_mood: i32, base_mood: f64) -> MoodTrend {
    let predicted = f64::from(predicted_mood);
    if (predicted - base_mood).abs() < 10.0 {
        MoodTrend::Stable
    } else if predicted > base_mood {
        MoodTrend::Improving
    } else {
        MoodTrend::Declining
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
