//! Seven-day mood series ("This Week's Mood Journey").

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Weekday};
use serde::Serialize;

use super::calendar_day;
use crate::types::MoodEntry;

/// Number of slots in the weekly series.
pub const WEEK_DAYS: usize = 7;

/// One calendar day of the weekly series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySlot {
    pub date: NaiveDate,
    /// The check-in shown for this day, if any
    pub entry: Option<MoodEntry>,
}

impl DaySlot {
    /// Short weekday name for the slot header (e.g., "Mon").
    pub fn weekday_label(&self) -> &'static str {
        match self.date.weekday() {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }
}

/// Map check-ins onto the last seven calendar days.
///
/// Slot 0 is six days ago, slot 6 is today. Each slot takes the first
/// matching entry in input order; with newest-first input that is the
/// latest check-in of the day.
pub fn weekly_series<Tz: TimeZone>(entries: &[MoodEntry], now: &DateTime<Tz>) -> [DaySlot; WEEK_DAYS] {
    let tz = now.timezone();
    let today = now.date_naive();

    std::array::from_fn(|i| {
        let offset = (WEEK_DAYS - 1 - i) as i64;
        let date = today - Duration::days(offset);
        let entry = entries
            .iter()
            .find(|e| calendar_day(&e.date, &tz) == date)
            .cloned();
        DaySlot { date, entry }
    })
}
