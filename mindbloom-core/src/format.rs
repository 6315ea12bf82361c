//! Formatting helpers shared across front ends.

use chrono::{DateTime, Datelike, TimeZone, Utc};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Format a share as a whole percentage, rounding half up (62.5 -> "63%").
pub fn percent(count: usize, total: usize) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    let share = count as f64 / total as f64 * 100.0;
    format!("{}%", share.round() as i64)
}

/// Label an entry date relative to `now` ("Today", "Yesterday", "3 days ago").
///
/// The distance is the absolute gap rounded up to whole days, so anything
/// within the last 24 hours reads as "Today". Older entries fall back to
/// "Jun 3", with the year appended when it differs from `now`'s.
pub fn relative_day<Tz: TimeZone>(ts: DateTime<Utc>, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let millis = now
        .with_timezone(&Utc)
        .signed_duration_since(ts)
        .num_milliseconds()
        .abs();
    let days = (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY;

    match days {
        0 | 1 => "Today".to_string(),
        2 => "Yesterday".to_string(),
        3..=7 => format!("{} days ago", days - 1),
        _ => {
            let local = ts.with_timezone(&now.timezone());
            if local.year() != now.year() {
                local.format("%b %-d, %Y").to_string()
            } else {
                local.format("%b %-d").to_string()
            }
        }
    }
}

/// Format a timestamp as a clock time in `tz` (e.g., "9:05 PM").
pub fn time_of_day<Tz: TimeZone>(ts: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    ts.with_timezone(tz).format("%-I:%M %p").to_string()
}

/// Pluralize a day count ("1 day", "4 days").
pub fn days(count: u32) -> String {
    if count == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_percent_rounds_half_up() {
        assert_eq!(percent(5, 8), "63%");
        assert_eq!(percent(3, 8), "38%");
        assert_eq!(percent(1, 3), "33%");
        assert_eq!(percent(0, 0), "0%");
    }

    #[test]
    fn test_relative_day() {
        assert_eq!(relative_day(now() - Duration::hours(3), &now()), "Today");
        assert_eq!(relative_day(now(), &now()), "Today");
        assert_eq!(relative_day(now() - Duration::hours(30), &now()), "Yesterday");
        assert_eq!(relative_day(now() - Duration::days(4), &now()), "3 days ago");
        assert_eq!(
            relative_day(now() - Duration::days(4) - Duration::hours(1), &now()),
            "4 days ago"
        );
        assert_eq!(relative_day(now() - Duration::days(10), &now()), "Jun 5");
        assert_eq!(
            relative_day(Utc.with_ymd_and_hms(2023, 12, 24, 9, 0, 0).unwrap(), &now()),
            "Dec 24, 2023"
        );
    }

    #[test]
    fn test_time_of_day() {
        let ts = Utc.with_ymd_and_hms(2024, 6, 15, 21, 5, 0).unwrap();
        assert_eq!(time_of_day(ts, &Utc), "9:05 PM");
    }

    #[test]
    fn test_days() {
        assert_eq!(days(1), "1 day");
        assert_eq!(days(0), "0 days");
        assert_eq!(days(4), "4 days");
    }
}
