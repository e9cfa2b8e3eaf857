use crate::models::analytics::{Baseline, TemporalPatterns};
use crate::services::lexicon::WEEKDAY_NAMES;

const MISSING_DATA: &str = "Keep using MindMirror to unlock personalized insights!";
const NOTHING_FOUND: &str = "Continue tracking to discover more patterns!";

/// Short human-readable remarks for the analytics dashboard.
pub fn format_insights(
    baseline: Option<&Baseline>,
    patterns: Option<&TemporalPatterns>,
) -> Vec<String> {
    let (Some(baseline), Some(patterns)) = (baseline, patterns) else {
        return vec![MISSING_DATA.to_string()];
    };

    let mut insights = Vec::new();

    let best_day = first_extreme(patterns.weekly.iter(), |cand, cur| cand > cur);
    let worst_day = first_extreme(patterns.weekly.iter(), |cand, cur| cand < cur);
    if let (Some(best), Some(worst)) = (best_day, worst_day) {
        insights.push(format!("Your best mood days are {}s", WEEKDAY_NAMES[*best]));
        insights.push(format!("You tend to feel lower on {}s", WEEKDAY_NAMES[*worst]));
    }

    if let Some(slot) = first_extreme(patterns.time_of_day.iter(), |cand, cur| cand > cur) {
        insights.push(format!("You're most positive during the {}", slot.as_str()));
    }

    // A zero average carries no remark
    let avg = baseline.avg_mood_score;
    if avg > 0.0 {
        let remark = if avg > 70.0 {
            "You maintain a generally positive outlook!"
        } else if avg < 40.0 {
            "Remember to be gentle with yourself during tough periods"
        } else {
            "You have a balanced emotional range"
        };
        insights.push(remark.to_string());
    }

    if insights.is_empty() {
        insights.push(NOTHING_FOUND.to_string());
    }
    insights
}

/// Key of the first entry (in iteration order) that no later entry beats.
/// Ties keep the earlier key, so weekdays resolve to the lowest index.
fn first_extreme<'a, K: 'a>(
    values: impl Iterator<Item = (&'a K, &'a f64)>,
    beats: impl Fn(f64, f64) -> bool,
) -> Option<&'a K> {
    values
        .fold(None::<(&'a K, f64)>, |best, (key, &value)| match best {
            Some((_, current)) if !beats(value, current) => best,
            _ => Some((key, value)),
        })
        .map(|(key, _)| key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analytics::TimeOfDay;
    use crate::test_support::at;

    fn baseline(avg: f64) -> Baseline {
        Baseline {
            avg_mood_score: avg,
            data_points_used: 4,
            calculation_date: at("2025-10-29 08:00:00"),
        }
    }

    #[test]
    fn test_missing_inputs() {
        let patterns = TemporalPatterns::default();
        assert_eq!(format_insights(None, Some(&patterns)), vec![MISSING_DATA.to_string()]);
        assert_eq!(format_insights(Some(&baseline(50.0)), None), vec![MISSING_DATA.to_string()]);
    }

    #[test]
    fn test_full_insights() {
        let mut patterns = TemporalPatterns::default();
        patterns.weekly.insert(0, 55.0);
        patterns.weekly.insert(4, 80.0);
        patterns.weekly.insert(6, 30.0);
        patterns.time_of_day.insert(TimeOfDay::Morning, 40.0);
        patterns.time_of_day.insert(TimeOfDay::Evening, 70.0);

        let insights = format_insights(Some(&baseline(75.0)), Some(&patterns));
        assert_eq!(
            insights,
            vec![
                "Your best mood days are Fridays".to_string(),
                "You tend to feel lower on Sundays".to_string(),
                "You're most positive during the evening".to_string(),
                "You maintain a generally positive outlook!".to_string(),
            ]
        );
    }

    #[test]
    fn test_ties_resolve_to_lowest_weekday() {
        let mut patterns = TemporalPatterns::default();
        patterns.weekly.insert(5, 60.0);
        patterns.weekly.insert(2, 60.0);
        patterns.weekly.insert(3, 60.0);
        let insights = format_insights(Some(&baseline(50.0)), Some(&patterns));
        assert_eq!(insights[0], "Your best mood days are Wednesdays");
        assert_eq!(insights[1], "You tend to feel lower on Wednesdays");
    }

    #[test]
    fn test_time_of_day_tie_prefers_earlier_slot() {
        let mut patterns = TemporalPatterns::default();
        patterns.time_of_day.insert(TimeOfDay::Night, 60.0);
        patterns.time_of_day.insert(TimeOfDay::Afternoon, 60.0);
        let insights = format_insights(Some(&baseline(50.0)), Some(&patterns));
        assert_eq!(insights[0], "You're most positive during the afternoon");
    }

    #[test]
    fn test_baseline_remarks() {
        let patterns = TemporalPatterns::default();
        assert_eq!(
            format_insights(Some(&baseline(35.0)), Some(&patterns)),
            vec!["Remember to be gentle with yourself during tough periods".to_string()]
        );
        assert_eq!(
            format_insights(Some(&baseline(70.0)), Some(&patterns)),
            vec!["You have a balanced emotional range".to_string()]
        );
    }

    #[test]
    fn test_nothing_to_say_falls_back() {
        let patterns = TemporalPatterns::default();
        assert_eq!(
            format_insights(Some(&baseline(0.0)), Some(&patterns)),
            vec![NOTHING_FOUND.to_string()]
        );
    }
}
