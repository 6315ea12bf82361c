//! Derived snapshot: everything the insights view renders, in one value.

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use serde::Serialize;

use super::frequency::{aggregate_moods, MoodFrequency};
use super::streak::{calculate_streaks, StreakStats};
use super::weekly::{weekly_series, DaySlot, WEEK_DAYS};
use crate::types::{EntryCollections, JournalEntry, Mood, MoodEntry};

/// Immutable analytics over one delivery of a user's entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedSnapshot {
    /// The instant all date-relative values were computed against
    pub computed_at: DateTime<Utc>,
    /// Last seven calendar days, oldest first, ending today
    pub weekly_series: [DaySlot; WEEK_DAYS],
    /// `None` when there are no mood entries
    pub mood_frequency: Option<MoodFrequency>,
    pub streaks: StreakStats,
    pub total_mood_entries: usize,
    pub total_journal_entries: usize,
    /// Mood of the newest check-in
    pub recent_mood: Option<Mood>,
    /// Check-ins logged within the last seven days
    pub entries_this_week: usize,
}

impl DerivedSnapshot {
    /// The most frequently logged mood, if any.
    pub fn most_common_mood(&self) -> Option<Mood> {
        self.mood_frequency.as_ref().map(|f| f.most_common.mood)
    }

    pub fn current_streak(&self) -> u32 {
        self.streaks.current_streak
    }

    pub fn longest_streak(&self) -> u32 {
        self.streaks.longest_streak
    }

    /// True when the user has neither check-ins nor journal entries.
    pub fn is_empty(&self) -> bool {
        self.total_mood_entries == 0 && self.total_journal_entries == 0
    }
}

/// Compute a fresh snapshot.
///
/// Both slices are expected newest-first, as delivered by the store, and
/// are only read. `now` is used for every date-relative value so a single
/// call is internally consistent.
pub fn compute_snapshot<Tz: TimeZone>(
    moods: &[MoodEntry],
    journals: &[JournalEntry],
    now: &DateTime<Tz>,
) -> DerivedSnapshot {
    let computed_at = now.with_timezone(&Utc);
    let week_ago = computed_at - Duration::days(7);

    let snapshot = DerivedSnapshot {
        computed_at,
        weekly_series: weekly_series(moods, now),
        mood_frequency: aggregate_moods(moods),
        streaks: calculate_streaks(moods, now),
        total_mood_entries: moods.len(),
        total_journal_entries: journals.len(),
        recent_mood: moods.first().map(|e| e.mood),
        entries_this_week: moods.iter().filter(|e| e.date >= week_ago).count(),
    };

    tracing::debug!(
        moods = snapshot.total_mood_entries,
        journals = snapshot.total_journal_entries,
        current_streak = snapshot.streaks.current_streak,
        longest_streak = snapshot.streaks.longest_streak,
        "Computed derived snapshot"
    );

    snapshot
}

/// Compute a snapshot for one store delivery.
pub fn snapshot_for<Tz: TimeZone>(collections: &EntryCollections, now: &DateTime<Tz>) -> DerivedSnapshot {
    compute_snapshot(&collections.moods, &collections.journals, now)
}

/// Compute a snapshot against the local clock, read once.
pub fn compute_snapshot_now(moods: &[MoodEntry], journals: &[JournalEntry]) -> DerivedSnapshot {
    let now = Local::now();
    compute_snapshot(moods, journals, &now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EmotionTag, EntryId};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 20, 0, 0).unwrap()
    }

    fn mood(id: &str, date: DateTime<Utc>, mood: Mood) -> MoodEntry {
        MoodEntry {
            id: EntryId::from(id),
            date,
            mood,
            note: None,
        }
    }

    fn journal(id: &str, date: DateTime<Utc>) -> JournalEntry {
        JournalEntry {
            id: EntryId::from(id),
            date,
            title: "Evening".to_string(),
            content: "A calm day".to_string(),
            tags: vec![EmotionTag::Peaceful],
        }
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = compute_snapshot(&[], &[], &now());
        assert_eq!(snapshot.current_streak(), 0);
        assert_eq!(snapshot.longest_streak(), 0);
        assert_eq!(snapshot.most_common_mood(), None);
        assert!(snapshot.mood_frequency.is_none());
        assert!(snapshot.weekly_series.iter().all(DaySlot::is_empty));
        assert_eq!(snapshot.recent_mood, None);
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_snapshot_composes_components() {
        let moods = vec![
            mood("evening", now() - Duration::hours(1), Mood::Happy),
            mood("morning", now() - Duration::hours(12), Mood::Sad),
            mood("yesterday", now() - Duration::days(1), Mood::Happy),
            mood("old", now() - Duration::days(30), Mood::Okay),
        ];
        let journals = vec![journal("j1", now() - Duration::hours(2))];

        let snapshot = compute_snapshot(&moods, &journals, &now());

        assert_eq!(snapshot.total_mood_entries, 4);
        assert_eq!(snapshot.total_journal_entries, 1);
        assert_eq!(snapshot.recent_mood, Some(Mood::Happy));
        assert_eq!(snapshot.most_common_mood(), Some(Mood::Happy));
        assert_eq!(snapshot.entries_this_week, 3);
        assert_eq!(
            snapshot.weekly_series[6].entry.as_ref().unwrap().id.as_str(),
            "evening"
        );
        assert_eq!(snapshot.computed_at, now());
        assert!(!snapshot.is_empty());
    }

    #[test]
    fn test_deleted_entry_disappears() {
        let mut moods = vec![
            mood("keep", now() - Duration::days(1), Mood::Good),
            mood("drop", now() - Duration::hours(1), Mood::Anxious),
        ];
        moods.sort_by(|a, b| b.date.cmp(&a.date));
        let before = compute_snapshot(&moods, &[], &now());
        assert_eq!(before.current_streak(), 2);

        moods.retain(|e| e.id.as_str() != "drop");
        let after = compute_snapshot(&moods, &[], &now());

        assert_eq!(after.total_mood_entries, 1);
        assert_eq!(after.current_streak(), 0);
        assert_eq!(after.mood_frequency.as_ref().unwrap().count_of(Mood::Anxious), 0);
        assert!(after
            .weekly_series
            .iter()
            .filter_map(|s| s.entry.as_ref())
            .all(|e| e.id.as_str() != "drop"));
    }

    #[test]
    fn test_snapshot_now_uses_one_local_instant() {
        let start = Utc::now();
        let moods = vec![
            mood("today", start, Mood::Good),
            mood("yesterday", start - Duration::days(1), Mood::Good),
        ];

        let snapshot = compute_snapshot_now(&moods, &[]);
        let end = Utc::now();

        assert!(start <= snapshot.computed_at && snapshot.computed_at <= end);
        let frozen = snapshot.computed_at.with_timezone(&Local);
        assert_eq!(snapshot, compute_snapshot(&moods, &[], &frozen));
        assert_eq!(snapshot.weekly_series[6].date, frozen.date_naive());
    }

    #[test]
    fn test_journal_only_snapshot_is_not_empty() {
        let snapshot = compute_snapshot(&[], &[journal("j1", now())], &now());
        assert!(!snapshot.is_empty());
        assert!(snapshot.mood_frequency.is_none());
    }
}
