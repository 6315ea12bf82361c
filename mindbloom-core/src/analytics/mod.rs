//! Analytics module for mindbloom
//!
//! Derived statistics over a user's mood and journal entries:
//! - Streaks (current and longest run of check-in days)
//! - Weekly series (one slot per day for the last seven days)
//! - Mood frequency (counts, most common mood, shares)
//! - Snapshot (all of the above in one immutable value)
//!
//! Every function here is pure. Inputs are borrowed slices as delivered by
//! the store (newest-first) and "now" is always passed in, so the same
//! inputs always produce the same snapshot.

pub mod frequency;
pub mod snapshot;
pub mod streak;
pub mod weekly;

pub use frequency::{aggregate_moods, MoodCount, MoodFrequency};
pub use snapshot::{compute_snapshot, compute_snapshot_now, snapshot_for, DerivedSnapshot};
pub use streak::{calculate_streaks, StreakStats};
pub use weekly::{weekly_series, DaySlot, WEEK_DAYS};

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Calendar day of a timestamp as seen in `tz`.
pub(crate) fn calendar_day<Tz: TimeZone>(ts: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    ts.with_timezone(tz).date_naive()
}
