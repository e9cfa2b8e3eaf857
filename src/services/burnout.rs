//! Burnout risk heuristics over the trailing assessment window.
//!
//! Five independent signals each add a fixed weight to the score and explain
//! themselves with a trigger string:
//!
//! | signal                 | weight | fires when                                   |
//! |------------------------|--------|----------------------------------------------|
//! | mood trend             | 25     | slope < -2 and \|slope\|/10 > 0.3            |
//! | negative emotions      | 20     | > 60% of entries carry a negative label      |
//! | journal language       | 15     | mean per-entry sentiment < -0.2              |
//! | engagement drop        | 15     | recent 7 vs previous 7 entries ratio < 0.5   |
//! | irregular posting time | 10     | std-dev of last 10 posting hours > 6         |
//!
//! The assessment never fails: missing data or a store error produce the
//! low-risk default.

use chrono::{Duration, NaiveDateTime};

use crate::db::store::EntryStore;
use crate::models::analytics::{BurnoutAssessment, MoodTrend, RiskLevel};
use crate::models::entry::Entry;
use crate::services::{lexicon, stats};

pub const MIN_ENTRIES: usize = 5;
pub const DEFAULT_RISK_SCORE: u32 = 10;

const TREND_WEIGHT: u32 = 25;
const NEGATIVE_EMOTION_WEIGHT: u32 = 20;
const NEGATIVE_LANGUAGE_WEIGHT: u32 = 15;
const ENGAGEMENT_WEIGHT: u32 = 15;
const IRREGULARITY_WEIGHT: u32 = 10;

const ENGAGEMENT_WINDOW: usize = 7;
const IRREGULARITY_SAMPLE: usize = 10;

pub async fn assess_burnout_risk(
    store: &dyn EntryStore,
    user_id: &str,
    now: NaiveDateTime,
    window_days: i64,
) -> BurnoutAssessment {
    let since = (now - Duration::days(window_days)).date();
    let entries = match store.list_entries(user_id, Some(since)).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(user_id = %user_id, error = %e, "Burnout assessment fell back to default");
            return low_risk_default(&format!("Assessment error: {e}"), now);
        }
    };

    let assessment = assess_entries(&entries, now);
    tracing::debug!(
        user_id = %user_id,
        risk_level = assessment.risk_level.as_str(),
        risk_score = assessment.risk_score,
        entries = assessment.entries_analyzed,
        "Burnout assessment complete"
    );
    assessment
}

/// `entries` must be newest first, already limited to the assessment window.
pub fn assess_entries(entries: &[Entry], now: NaiveDateTime) -> BurnoutAssessment {
    if entries.len() < MIN_ENTRIES {
        return low_risk_default("Not enough data", now);
    }

    let mut risk_score = 0;
    let mut triggers = Vec::new();

    let (trend, strength) = mood_trend(entries);
    if trend == MoodTrend::Declining && strength > 0.3 {
        risk_score += TREND_WEIGHT;
        triggers.push(format!("Mood declining ({:.0}% trend)", strength * 100.0));
    }

    let negative_ratio = negative_emotion_ratio(entries);
    if negative_ratio > 0.6 {
        risk_score += NEGATIVE_EMOTION_WEIGHT;
        triggers.push(format!(
            "High negative emotions ({:.0}%)",
            negative_ratio * 100.0
        ));
    }

    if journal_sentiment(entries) < -0.2 {
        risk_score += NEGATIVE_LANGUAGE_WEIGHT;
        triggers.push("Increasing negative language".to_string());
    }

    if let Some(drop) = engagement_drop(entries) {
        risk_score += ENGAGEMENT_WEIGHT;
        triggers.push(format!("Engagement dropped {:.0}%", drop * 100.0));
    }

    if irregular_posting(entries) {
        risk_score += IRREGULARITY_WEIGHT;
        triggers.push("Irregular activity patterns".to_string());
    }

    let risk_level = RiskLevel::from_score(risk_score);
    BurnoutAssessment {
        risk_level,
        risk_score,
        recommendations: recommendations(risk_level, &triggers),
        triggers,
        entries_analyzed: entries.len(),
        assessment_date: now,
    }
}

pub fn low_risk_default(reason: &str, now: NaiveDateTime) -> BurnoutAssessment {
    BurnoutAssessment {
        risk_level: RiskLevel::Low,
        risk_score: DEFAULT_RISK_SCORE,
        triggers: vec![format!("Insufficient data: {reason}")],
        recommendations: vec!["Continue using MindMirror to unlock insights".to_string()],
        entries_analyzed: 0,
        assessment_date: now,
    }
}

/// Linear trend of mood scores in chronological order, with strength |slope|/10.
/// Zero scores carry no signal and are left out of the fit.
fn mood_trend(entries: &[Entry]) -> (MoodTrend, f64) {
    let scores: Vec<f64> = entries
        .iter()
        .rev()
        .filter_map(|e| e.mood_score)
        .filter(|score| *score != 0)
        .map(f64::from)
        .collect();

    if scores.len() < 3 {
        return (MoodTrend::Stable, 0.0);
    }
    let Some(slope) = stats::linear_slope(&scores) else {
        return (MoodTrend::Stable, 0.0);
    };

    let trend = if slope < -2.0 {
        MoodTrend::Declining
    } else if slope > 2.0 {
        MoodTrend::Improving
    } else {
        MoodTrend::Stable
    };
    (trend, slope.abs() / 10.0)
}

fn negative_emotion_ratio(entries: &[Entry]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }
    let negative = entries
        .iter()
        .filter(|e| {
            e.final_emotion
                .as_deref()
                .is_some_and(lexicon::is_negative_emotion)
        })
        .count();
    negative as f64 / entries.len() as f64
}

/// Mean of per-entry sentiment, each `-(negative hits / min(words, 10))`.
fn journal_sentiment(entries: &[Entry]) -> f64 {
    let per_entry: Vec<f64> = entries
        .iter()
        .filter_map(|e| e.journal_text.as_deref())
        .filter_map(|text| {
            let lowered = text.to_lowercase();
            let words = lowered.split_whitespace().count();
            if words == 0 {
                return None;
            }
            let hits = lexicon::negative_word_hits(&lowered);
            Some(-(hits as f64 / words.min(10) as f64))
        })
        .collect();

    stats::mean(&per_entry).unwrap_or(0.0)
}

/// Fractional drop in entry count between the newest window and the one
/// before it. With fewer than two full windows the older count is taken to
/// equal the recent one.
fn engagement_drop(entries: &[Entry]) -> Option<f64> {
    if entries.len() < ENGAGEMENT_WINDOW {
        return None;
    }

    let recent = entries.iter().take(ENGAGEMENT_WINDOW).count();
    let older = if entries.len() >= ENGAGEMENT_WINDOW * 2 {
        entries
            .iter()
            .skip(ENGAGEMENT_WINDOW)
            .take(ENGAGEMENT_WINDOW)
            .count()
    } else {
        recent
    };

    if older == 0 {
        return None;
    }
    let ratio = recent as f64 / older as f64;
    (ratio < 0.5).then(|| 1.0 - ratio)
}

fn irregular_posting(entries: &[Entry]) -> bool {
    if entries.len() < IRREGULARITY_SAMPLE {
        return false;
    }

    let hours: Vec<f64> = entries
        .iter()
        .take(IRREGULARITY_SAMPLE)
        .filter_map(|e| e.timestamp.hour())
        .map(f64::from)
        .collect();

    hours.len() >= 5 && stats::population_std_dev(&hours).is_some_and(|sd| sd > 6.0)
}

fn recommendations(level: RiskLevel, triggers: &[String]) -> Vec<String> {
    let base: &[&str] = match level {
        RiskLevel::High => &[
            "Consider taking a mental health day",
            "Reach out to friends or family for support",
            "Practice mindfulness or meditation",
            "Consider a digital detox this weekend",
        ],
        RiskLevel::Medium => &[
            "Balance your workload this week",
            "Set clear boundaries for work/life",
            "Make time for physical activity",
            "Ensure 7-8 hours of sleep nightly",
        ],
        RiskLevel::Low => &[
            "Great job maintaining balance!",
            "Continue tracking for early detection",
            "Celebrate your emotional awareness",
        ],
    };

    let mut out: Vec<String> = base.iter().map(|s| s.to_string()).collect();
    if triggers.iter().any(|t| t.contains("negative emotions")) {
        out.push("Try creative expression to process emotions".to_string());
    }
    if triggers.iter().any(|t| t.contains("declining")) {
        out.push("Schedule enjoyable activities to boost mood".to_string());
    }
    out
}
