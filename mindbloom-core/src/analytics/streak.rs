//! Streak calculation over mood check-ins.
//!
//! Day gaps between neighbouring check-ins are measured on timestamps,
//! rounded up to whole days, so check-ins at the same time of day on
//! consecutive dates are exactly one day apart.

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use super::calendar_day;
use crate::types::MoodEntry;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Current and longest run of consecutive check-in days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreakStats {
    /// Run ending today (0 when there is no check-in today)
    pub current_streak: u32,
    /// Longest run anywhere in the history
    pub longest_streak: u32,
}

/// Whole days between two timestamps, `later - earlier`, rounded up.
fn day_gap(later: &MoodEntry, earlier: &MoodEntry) -> i64 {
    let millis = later
        .date
        .signed_duration_since(earlier.date)
        .num_milliseconds();
    // ceil for non-negative gaps; sorted input never goes negative
    (millis + MILLIS_PER_DAY - 1).div_euclid(MILLIS_PER_DAY)
}

/// Calculate current and longest streaks.
///
/// `entries` may be in any order; a sorted copy is used. `now` decides
/// which calendar day counts as today, in `now`'s timezone.
///
/// Only a gap of exactly one day continues a run. Any other gap ends it,
/// including a gap of zero (two check-ins with the same timestamp).
pub fn calculate_streaks<Tz: TimeZone>(entries: &[MoodEntry], now: &DateTime<Tz>) -> StreakStats {
    if entries.is_empty() {
        return StreakStats::default();
    }

    let mut sorted: Vec<&MoodEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let tz = now.timezone();
    let today = now.date_naive();
    let has_today = sorted.iter().any(|e| calendar_day(&e.date, &tz) == today);

    let mut current_streak = 0u32;
    if has_today {
        current_streak = 1;
        for pair in sorted.windows(2) {
            if day_gap(pair[0], pair[1]) == 1 {
                current_streak += 1;
            } else {
                break;
            }
        }
    }

    let mut longest_streak = 0u32;
    let mut run = 1u32;
    for pair in sorted.windows(2) {
        if day_gap(pair[0], pair[1]) == 1 {
            run += 1;
        } else {
            longest_streak = longest_streak.max(run);
            run = 1;
        }
    }
    longest_streak = longest_streak.max(run);

    tracing::trace!(
        entries = entries.len(),
        current_streak,
        longest_streak,
        "Calculated streaks"
    );

    StreakStats {
        current_streak,
        longest_streak,
    }
}
