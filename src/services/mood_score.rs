use crate::services::lexicon;

/// Map an emotion label and classifier confidence to a 0-100 mood score.
///
/// `base * confidence` is truncated toward zero and clamped. Confidence is
/// applied as given, even outside [0,1]; only the result is clamped.
pub fn score(emotion: Option<&str>, confidence: f64) -> i32 {
    let label = match emotion {
        Some(label) if !label.is_empty() => label.to_lowercase(),
        _ => lexicon::UNCERTAIN.to_string(),
    };

    let adjusted = lexicon::base_score(&label) as f64 * confidence;
    // `as` truncates toward zero and maps NaN to 0
    (adjusted as i32).clamp(0, 100)
}

/// Confidence used when an entry is first scored: the stronger modality.
pub fn ingest_confidence(text: Option<f64>, audio: Option<f64>) -> f64 {
    text.unwrap_or(0.0).max(audio.unwrap_or(0.0))
}

/// Confidence used when backfilling a legacy entry: text first, then audio,
/// skipping missing or zero values, else 0.5.
pub fn backfill_confidence(text: Option<f64>, audio: Option<f64>) -> f64 {
    [text, audio]
        .into_iter()
        .flatten()
        .find(|c| *c != 0.0)
        .unwrap_or(0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_scores() {
        assert_eq!(score(Some("joy"), 1.0), 85);
        assert_eq!(score(Some("joy"), 0.5), 42);
        assert_eq!(score(None, 0.9), 45);
        assert_eq!(score(Some(""), 1.0), 50);
        assert_eq!(score(Some("unknown"), 1.0), 50);
    }

    #[test]
    fn test_label_is_case_insensitive() {
        assert_eq!(score(Some("Sadness"), 1.0), 30);
        assert_eq!(score(Some("LOVE"), 0.5), 45);
    }

    #[test]
    fn test_score_stays_in_range_for_unit_confidence() {
        for &(label, _) in lexicon::MOOD_BASE_SCORES {
            for step in 0..=20 {
                let c = step as f64 / 20.0;
                let s = score(Some(label), c);
                assert!((0..=100).contains(&s), "{label} @ {c} -> {s}");
            }
        }
    }

    #[test]
    fn test_out_of_range_confidence_is_clamped_on_output() {
        assert_eq!(score(Some("love"), 2.0), 100);
        assert_eq!(score(Some("joy"), -1.0), 0);
        assert_eq!(score(Some("joy"), f64::NAN), 0);
    }

    #[test]
    fn test_ingest_confidence_takes_max() {
        assert_eq!(ingest_confidence(Some(0.4), Some(0.7)), 0.7);
        assert_eq!(ingest_confidence(Some(0.4), None), 0.4);
        assert_eq!(ingest_confidence(None, None), 0.0);
    }

    #[test]
    fn test_backfill_confidence_order() {
        assert_eq!(backfill_confidence(Some(0.8), Some(0.3)), 0.8);
        assert_eq!(backfill_confidence(None, Some(0.3)), 0.3);
        assert_eq!(backfill_confidence(Some(0.0), Some(0.3)), 0.3);
        assert_eq!(backfill_confidence(Some(0.0), None), 0.5);
        assert_eq!(backfill_confidence(None, None), 0.5);
    }
}
