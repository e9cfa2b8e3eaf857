use std::collections::BTreeMap;

use crate::db::store::EntryStore;
use crate::models::analytics::{TemporalPatterns, TimeOfDay};
use crate::models::entry::Entry;
use crate::services::stats;

pub const MIN_ENTRIES: usize = 2;

pub async fn detect_patterns(store: &dyn EntryStore, user_id: &str) -> Option<TemporalPatterns> {
    let entries = match store.list_entries(user_id, None).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(user_id = %user_id, error = %e, "Pattern detection unavailable: entry store failed");
            return None;
        }
    };

    let patterns = patterns_from_entries(&entries);
    if let Some(p) = &patterns {
        tracing::debug!(
            user_id = %user_id,
            weekdays = p.weekly.len(),
            slots = p.time_of_day.len(),
            "Temporal patterns detected"
        );
    }
    patterns
}

/// Group scored entries by weekday and by time-of-day slot. Entries with an
/// unparseable timestamp are skipped; fewer than two entries yields `None`.
pub fn patterns_from_entries(entries: &[Entry]) -> Option<TemporalPatterns> {
    if entries.len() < MIN_ENTRIES {
        return None;
    }

    let mut by_weekday: [Vec<f64>; 7] = Default::default();
    let mut by_slot: BTreeMap<TimeOfDay, Vec<f64>> = BTreeMap::new();

    for entry in entries {
        let Some(score) = entry.mood_score else {
            continue;
        };
        let (Some(weekday), Some(hour)) = (entry.timestamp.weekday_index(), entry.timestamp.hour())
        else {
            tracing::warn!(entry_id = %entry.id, timestamp = %entry.timestamp, "Skipping entry with unparseable timestamp");
            continue;
        };

        by_weekday[weekday].push(f64::from(score));
        by_slot
            .entry(TimeOfDay::from_hour(hour))
            .or_default()
            .push(f64::from(score));
    }

    let weekly = by_weekday
        .iter()
        .enumerate()
        .filter_map(|(day, scores)| stats::mean(scores).map(|avg| (day, avg)))
        .collect();
    let time_of_day = by_slot
        .into_iter()
        .filter_map(|(slot, scores)| stats::mean(&scores).map(|avg| (slot, avg)))
        .collect();

    Some(TemporalPatterns {
        weekly,
        time_of_day,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryStore;
    use crate::test_support::entry;

    #[test]
    fn test_weekday_average() {
        // 2025-10-27 is a Monday
        let entries = vec![
            entry("u1", "2025-10-27 09:00:00", Some(50)),
            entry("u1", "2025-10-27T18:30:00", Some(70)),
        ];
        let patterns = patterns_from_entries(&entries).unwrap();
        assert_eq!(patterns.weekly.get(&0), Some(&60.0));
        assert_eq!(patterns.weekly.len(), 1);
    }

    #[test]
    fn test_time_of_day_slots() {
        let entries = vec![
            entry("u1", "2025-10-28 06:00:00", Some(80)),
            entry("u1", "2025-10-28 13:00:00", Some(60)),
            entry("u1", "2025-10-28 19:00:00", Some(40)),
            entry("u1", "2025-10-28 02:00:00", Some(20)),
        ];
        let patterns = patterns_from_entries(&entries).unwrap();
        assert_eq!(patterns.time_of_day.get(&TimeOfDay::Morning), Some(&80.0));
        assert_eq!(patterns.time_of_day.get(&TimeOfDay::Afternoon), Some(&60.0));
        assert_eq!(patterns.time_of_day.get(&TimeOfDay::Evening), Some(&40.0));
        assert_eq!(patterns.time_of_day.get(&TimeOfDay::Night), Some(&20.0));
        // All on a Tuesday
        assert_eq!(patterns.weekly.get(&1), Some(&50.0));
    }

    #[test]
    fn test_fewer_than_two_entries() {
        assert_eq!(patterns_from_entries(&[]), None);
        let one = vec![entry("u1", "2025-10-28 06:00:00", Some(80))];
        assert_eq!(patterns_from_entries(&one), None);
    }

    #[test]
    fn test_unscored_entries_yield_empty_maps_not_none() {
        let entries = vec![
            entry("u1", "2025-10-28 06:00:00", None),
            entry("u1", "2025-10-27 06:00:00", None),
        ];
        let patterns = patterns_from_entries(&entries).unwrap();
        assert!(patterns.weekly.is_empty());
        assert!(patterns.time_of_day.is_empty());
    }

    #[test]
    fn test_malformed_timestamp_skips_only_that_entry() {
        let entries = vec![
            entry("u1", "garbage", Some(10)),
            entry("u1", "2025-10-28 13:00:00", Some(60)),
        ];
        let patterns = patterns_from_entries(&entries).unwrap();
        assert_eq!(patterns.weekly.get(&1), Some(&60.0));
        assert_eq!(patterns.time_of_day.len(), 1);
    }

    #[tokio::test]
    async fn test_detect_patterns_store_failure() {
        let store = MemoryStore::new();
        store
            .seed(vec![
                entry("u1", "2025-10-28 06:00:00", Some(80)),
                entry("u1", "2025-10-27 06:00:00", Some(60)),
            ])
            .await;
        assert!(detect_patterns(&store, "u1").await.is_some());

        store.set_failing(true);
        assert_eq!(detect_patterns(&store, "u1").await, None);
    }
}
