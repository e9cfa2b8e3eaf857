//! Fixed lookup tables shared by the scorer, the burnout assessor and the
//! insight formatter. Not configurable at runtime.

pub const UNCERTAIN: &str = "uncertain";

pub const DEFAULT_BASE_SCORE: i32 = 50;

pub const MOOD_BASE_SCORES: &[(&str, i32)] = &[
    ("joy", 85),
    ("love", 90),
    ("optimism", 80),
    ("neutral", 50),
    ("uncertain", 50),
    ("sadness", 30),
    ("fear", 25),
    ("anger", 20),
    ("disgust", 15),
    ("anxiety", 20),
];

pub const NEGATIVE_EMOTIONS: &[&str] = &["sadness", "anger", "fear", "anxiety", "disgust"];

pub const NEGATIVE_WORDS: &[&str] = &[
    "tired",
    "exhausted",
    "overwhelmed",
    "stress",
    "burnout",
    "cant",
    "wont",
    "hard",
    "difficult",
    "struggle",
    "anxious",
    "worried",
    "sad",
    "angry",
];

pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Expects an already lower-cased label.
pub fn base_score(label: &str) -> i32 {
    MOOD_BASE_SCORES
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, score)| *score)
        .unwrap_or(DEFAULT_BASE_SCORE)
}

pub fn is_negative_emotion(label: &str) -> bool {
    NEGATIVE_EMOTIONS
        .iter()
        .any(|neg| neg.eq_ignore_ascii_case(label))
}

/// Number of listed words found in `lowered` (each word counts at most once).
pub fn negative_word_hits(lowered: &str) -> usize {
    NEGATIVE_WORDS
        .iter()
        .filter(|word| lowered.contains(*word))
        .count()
}
