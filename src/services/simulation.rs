use chrono::NaiveDateTime;

use crate::db::store::EntryStore;
use crate::models::analytics::{Baseline, Simulation};
use crate::services::baseline::compute_baseline;

const DEFAULT_MOOD: f64 = 50.0;
const DEFAULT_CONFIDENCE: f64 = 0.3;
const MAX_CONFIDENCE: f64 = 0.9;

/// A keyword rule. The scenario matches when it contains `requires` (if set)
/// and any of `any_of`.
struct ScenarioRule {
    requires: Option<&'static str>,
    any_of: &'static [&'static str],
    offset: f64,
    factor: &'static str,
    recommendation: &'static str,
}

/// Checked in order; the first match wins.
const RULES: &[ScenarioRule] = &[
    ScenarioRule {
        requires: None,
        any_of: &["exercise", "workout"],
        offset: 15.0,
        factor: "Exercise typically boosts mood by 15 points",
        recommendation: "Even 20 minutes of exercise can significantly improve mood",
    },
    ScenarioRule {
        requires: Some("sleep"),
        any_of: &["less", "reduce"],
        offset: -20.0,
        factor: "Sleep deprivation reduces mood by 20+ points",
        recommendation: "Prioritize 7+ hours of sleep for optimal mental health",
    },
    ScenarioRule {
        requires: None,
        any_of: &["social", "friends"],
        offset: 12.0,
        factor: "Social connection boosts mood by 12 points",
        recommendation: "Regular social activities maintain emotional well-being",
    },
    ScenarioRule {
        requires: Some("work"),
        any_of: &["more", "extra"],
        offset: -18.0,
        factor: "Overtime work often decreases mood by 18 points",
        recommendation: "Balance work with restorative activities",
    },
    ScenarioRule {
        requires: None,
        any_of: &["meditate", "mindfulness"],
        offset: 10.0,
        factor: "Mindfulness practice increases mood by 10 points",
        recommendation: "Regular practice builds emotional resilience",
    },
];

impl ScenarioRule {
    fn matches(&self, lowered: &str) -> bool {
        self.requires.map_or(true, |word| lowered.contains(word))
            && self.any_of.iter().any(|word| lowered.contains(word))
    }
}

/// Project the user's mood under a what-if scenario such as "exercise more"
/// or "sleep less". Without a baseline a neutral low-confidence default is
/// returned.
pub async fn simulate_scenario(
    store: &dyn EntryStore,
    user_id: &str,
    scenario: &str,
    now: NaiveDateTime,
) -> Simulation {
    match compute_baseline(store, user_id, now).await {
        Some(baseline) => {
            let simulation = simulate_from(&baseline, scenario);
            tracing::debug!(
                user_id = %user_id,
                base_mood = simulation.base_mood,
                predicted_mood = simulation.predicted_mood,
                "Scenario simulated"
            );
            simulation
        }
        None => {
            tracing::debug!(user_id = %user_id, "Simulation skipped: no baseline");
            default_simulation("Need more data to simulate")
        }
    }
}

pub fn simulate_from(baseline: &Baseline, scenario: &str) -> Simulation {
    let base_mood = baseline.avg_mood_score;
    let lowered = scenario.to_lowercase();

    let (predicted_mood, factor, recommendation) =
        match RULES.iter().find(|rule| rule.matches(&lowered)) {
            Some(rule) => (
                (base_mood + rule.offset).clamp(0.0, 100.0),
                rule.factor,
                rule.recommendation,
            ),
            None => (
                base_mood,
                "No specific pattern detected for this scenario",
                "Try scenarios like 'exercise more' or 'sleep less'",
            ),
        };

    let confidence = (0.5 + baseline.data_points_used as f64 / 20.0).min(MAX_CONFIDENCE);

    Simulation {
        scenario: scenario.to_string(),
        base_mood,
        predicted_mood,
        confidence,
        factors: vec![factor.to_string()],
        recommendations: vec![recommendation.to_string()],
    }
}

pub fn default_simulation(reason: &str) -> Simulation {
    Simulation {
        scenario: "unknown".to_string(),
        base_mood: DEFAULT_MOOD,
        predicted_mood: DEFAULT_MOOD,
        confidence: DEFAULT_CONFIDENCE,
        factors: vec![reason.to_string()],
        recommendations: vec!["Continue using MindMirror to improve predictions".to_string()],
    }
}
