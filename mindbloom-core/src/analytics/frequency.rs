//! Mood frequency aggregation ("Mood Breakdown").

use serde::Serialize;

use crate::types::{Mood, MoodEntry};

/// Occurrences of a single mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodCount {
    pub mood: Mood,
    pub count: usize,
}

/// Per-mood counts over a non-empty collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoodFrequency {
    /// Counts in order of first appearance in the input
    pub counts: Vec<MoodCount>,
    /// Highest count; ties go to the mood seen first
    pub most_common: MoodCount,
    /// Number of entries counted
    pub total: usize,
}

impl MoodFrequency {
    /// Count for one mood (0 if never logged).
    pub fn count_of(&self, mood: Mood) -> usize {
        self.counts
            .iter()
            .find(|c| c.mood == mood)
            .map(|c| c.count)
            .unwrap_or(0)
    }

    /// Share of all entries as an unrounded percentage.
    pub fn share(&self, mood: Mood) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.count_of(mood) as f64 / self.total as f64) * 100.0
    }

    /// Counts sorted by count descending, first-seen order on ties.
    pub fn ranked(&self, limit: usize) -> Vec<MoodCount> {
        let mut ranked = self.counts.clone();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(limit);
        ranked
    }
}

/// Tally check-ins by mood.
///
/// Returns `None` for an empty collection. The leader only changes on a
/// strictly greater count, so the result depends on input order: with
/// newest-first input the more recently logged mood wins a tie.
pub fn aggregate_moods(entries: &[MoodEntry]) -> Option<MoodFrequency> {
    let first = entries.first()?;

    let mut counts: Vec<MoodCount> = Vec::new();
    for entry in entries {
        match counts.iter_mut().find(|c| c.mood == entry.mood) {
            Some(c) => c.count += 1,
            None => counts.push(MoodCount {
                mood: entry.mood,
                count: 1,
            }),
        }
    }

    let mut most_common = MoodCount {
        mood: first.mood,
        count: 0,
    };
    for c in &counts {
        if c.count > most_common.count {
            most_common = *c;
        }
    }

    Some(MoodFrequency {
        counts,
        most_common,
        total: entries.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntryId;
    use chrono::{Duration, TimeZone, Utc};

    fn entries(moods: &[Mood]) -> Vec<MoodEntry> {
        let base = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        moods
            .iter()
            .enumerate()
            .map(|(i, mood)| MoodEntry {
                id: EntryId(format!("e{}", i)),
                date: base - Duration::hours(i as i64),
                mood: *mood,
                note: None,
            })
            .collect()
    }

    #[test]
    fn test_empty_is_no_data() {
        assert_eq!(aggregate_moods(&[]), None);
    }

    #[test]
    fn test_happy_and_sad() {
        let mut moods = vec![Mood::Happy; 5];
        moods.extend([Mood::Sad; 3]);
        let freq = aggregate_moods(&entries(&moods)).unwrap();

        assert_eq!(freq.count_of(Mood::Happy), 5);
        assert_eq!(freq.count_of(Mood::Sad), 3);
        assert_eq!(freq.counts.len(), 2);
        assert_eq!(freq.most_common.mood, Mood::Happy);
        assert_eq!(freq.total, 8);
        assert_eq!(freq.share(Mood::Happy), 62.5);
    }

    #[test]
    fn test_tie_goes_to_first_seen() {
        let freq = aggregate_moods(&entries(&[Mood::Sad, Mood::Happy, Mood::Happy, Mood::Sad]))
            .unwrap();
        assert_eq!(freq.most_common.mood, Mood::Sad);
        assert_eq!(freq.most_common.count, 2);
    }

    #[test]
    fn test_idempotent() {
        let input = entries(&[Mood::Okay, Mood::Meh, Mood::Okay]);
        assert_eq!(aggregate_moods(&input), aggregate_moods(&input));
    }

    #[test]
    fn test_ranked_sorts_and_limits() {
        let freq = aggregate_moods(&entries(&[
            Mood::Meh,
            Mood::Good,
            Mood::Good,
            Mood::Anxious,
            Mood::Good,
            Mood::Anxious,
        ]))
        .unwrap();
        let ranked = freq.ranked(2);
        assert_eq!(
            ranked,
            vec![
                MoodCount {
                    mood: Mood::Good,
                    count: 3
                },
                MoodCount {
                    mood: Mood::Anxious,
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn test_unlogged_mood_has_zero_share() {
        let freq = aggregate_moods(&entries(&[Mood::Happy])).unwrap();
        assert_eq!(freq.count_of(Mood::Blooming), 0);
        assert_eq!(freq.share(Mood::Blooming), 0.0);
    }
}
