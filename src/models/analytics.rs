use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Per-user long-run mood snapshot. Recomputed from scratch on every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Baseline {
    pub avg_mood_score: f64,
    /// Total entries considered, including those without a mood score.
    pub data_points_used: usize,
    pub calculation_date: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// morning [5,12), afternoon [12,17), evening [17,22), night otherwise
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=21 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Night => "night",
        }
    }
}

/// Mean mood per weekday (0 = Monday) and per time-of-day slot.
/// Buckets without samples are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TemporalPatterns {
    pub weekly: BTreeMap<usize, f64>,
    pub time_of_day: BTreeMap<TimeOfDay, f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Weekly,
    TimeOfDay,
}

impl PatternKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::Weekly => "weekly",
            PatternKind::TimeOfDay => "time_of_day",
        }
    }

    /// Confidence recorded alongside a persisted pattern.
    pub fn confidence(&self) -> f64 {
        match self {
            PatternKind::Weekly => 0.8,
            PatternKind::TimeOfDay => 0.7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: u32) -> Self {
        if score >= 50 {
            RiskLevel::High
        } else if score >= 30 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BurnoutAssessment {
    pub risk_level: RiskLevel,
    pub risk_score: u32,
    pub triggers: Vec<String>,
    pub recommendations: Vec<String>,
    pub entries_analyzed: usize,
    pub assessment_date: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodTrend {
    Stable,
    Improving,
    Declining,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastDay {
    pub day_name: &'static str,
    pub predicted_mood: i32,
    pub confidence: f64,
    pub trend: MoodTrend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub base_mood: f64,
    pub forecast_days: Vec<ForecastDay>,
    pub generated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ForecastOutcome {
    Ready(Forecast),
    Insufficient { message: String },
}

impl ForecastOutcome {
    pub fn insufficient() -> Self {
        ForecastOutcome::Insufficient {
            message: "insufficient data".into(),
        }
    }
}

/// Outcome of a what-if scenario applied to the user's baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Simulation {
    pub scenario: String,
    pub base_mood: f64,
    pub predicted_mood: f64,
    pub confidence: f64,
    pub factors: Vec<String>,
    pub recommendations: Vec<String>,
}
