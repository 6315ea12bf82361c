//! Terminal, markdown and JSON views of entries and insights.

use anyhow::Result;
use chrono::{DateTime, Datelike, Local};
use mindbloom_core::config::AnalyticsConfig;
use mindbloom_core::format;
use mindbloom_core::{Config, DerivedSnapshot, JournalEntry, MoodEntry};

const WIDTH: usize = 60;
const BAR_WIDTH: usize = 20;

const AFFIRMATIONS: [&str; 5] = [
    "You're growing beautifully, one day at a time.",
    "Every feeling you notice is a seed of understanding.",
    "Small check-ins add up to big insights.",
    "Be gentle with yourself today.",
    "Your story is still blooming.",
];

/// Affirmation for the day, stable within one calendar day.
fn affirmation(now: &DateTime<Local>) -> &'static str {
    AFFIRMATIONS[now.ordinal0() as usize % AFFIRMATIONS.len()]
}

fn header(title: &str) {
    println!();
    println!("╭{}╮", "─".repeat(WIDTH));
    println!("│{:^width$}│", title, width = WIDTH);
    println!("╰{}╯", "─".repeat(WIDTH));
    println!();
}

pub fn clear_screen() {
    print!("\x1b[2J\x1b[H");
}

fn bar(count: usize, max: usize) -> String {
    let filled = if max == 0 {
        0
    } else {
        (count * BAR_WIDTH + max - 1) / max
    };
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

pub fn print_terminal(snapshot: &DerivedSnapshot, config: &Config) {
    let now = snapshot.computed_at.with_timezone(&Local);

    header(&format!("🌸 {}'s Insights", config.user.display_name()));
    println!("   \"{}\"", affirmation(&now));
    println!();

    if snapshot.is_empty() {
        println!("  Track your moods and write journal entries to see your");
        println!("  emotional patterns bloom.");
        println!();
        return;
    }

    println!("📊 QUICK STATS");
    println!(
        "   Mood check-ins:    {:>6}    Journal entries:  {:>6}",
        snapshot.total_mood_entries, snapshot.total_journal_entries
    );
    println!(
        "   Current streak:    {:>11}    Longest streak: {:>8}",
        format::days(snapshot.current_streak()),
        format::days(snapshot.longest_streak())
    );
    println!("   This week:         {:>6}", snapshot.entries_this_week);
    if let Some(mood) = snapshot.recent_mood {
        println!("   Latest mood:       {} {}", mood.emoji(), mood.label());
    }
    println!();

    println!("📅 THIS WEEK'S MOOD JOURNEY");
    let labels: Vec<String> = snapshot
        .weekly_series
        .iter()
        .map(|slot| format!("{:^5}", slot.weekday_label()))
        .collect();
    let marks: Vec<String> = snapshot
        .weekly_series
        .iter()
        .map(|slot| match &slot.entry {
            Some(entry) => format!("{:^4}", entry.mood.emoji()),
            None => format!("{:^5}", "·"),
        })
        .collect();
    println!("   {}", labels.join(""));
    println!("   {}", marks.join(""));
    println!();

    if let Some(freq) = &snapshot.mood_frequency {
        println!("🎨 MOOD BREAKDOWN");
        let ranked = freq.ranked(config.analytics.breakdown_limit);
        let max = ranked.first().map(|c| c.count).unwrap_or(0);
        for entry in &ranked {
            println!(
                "   {} {:<9} {} {:>4}  {:>4}",
                entry.mood.emoji(),
                entry.mood.label(),
                bar(entry.count, max),
                entry.count,
                format::percent(entry.count, freq.total)
            );
        }
        println!();

        let top = freq.most_common;
        println!("⭐ MOST COMMON MOOD");
        println!(
            "   {} {} - recorded {} times ({} of check-ins)",
            top.mood.emoji(),
            top.mood.label(),
            top.count,
            format::percent(top.count, freq.total)
        );
        println!();
    }
}

pub fn print_markdown(snapshot: &DerivedSnapshot, analytics: &AnalyticsConfig) {
    let now = snapshot.computed_at.with_timezone(&Local);

    println!("# MindBloom Insights");
    println!();
    println!("*{}*", now.format("%B %-d, %Y"));
    println!();

    if snapshot.is_empty() {
        println!("*No entries yet.*");
        return;
    }

    println!("## Summary");
    println!();
    println!("| Metric | Value |");
    println!("|--------|-------|");
    println!("| Mood check-ins | {} |", snapshot.total_mood_entries);
    println!("| Journal entries | {} |", snapshot.total_journal_entries);
    println!("| Current streak | {} |", format::days(snapshot.current_streak()));
    println!("| Longest streak | {} |", format::days(snapshot.longest_streak()));
    println!("| Entries this week | {} |", snapshot.entries_this_week);
    println!();

    println!("## This Week");
    println!();
    println!(
        "| {} |",
        snapshot
            .weekly_series
            .iter()
            .map(|s| s.weekday_label())
            .collect::<Vec<_>>()
            .join(" | ")
    );
    println!("|{}", "-----|".repeat(snapshot.weekly_series.len()));
    println!(
        "| {} |",
        snapshot
            .weekly_series
            .iter()
            .map(|s| s.entry.as_ref().map(|e| e.mood.emoji()).unwrap_or(" "))
            .collect::<Vec<_>>()
            .join(" | ")
    );
    println!();

    if let Some(freq) = &snapshot.mood_frequency {
        println!("## Mood Breakdown");
        println!();
        for (i, entry) in freq.ranked(analytics.breakdown_limit).iter().enumerate() {
            println!(
                "{}. {} **{}** - {} ({})",
                i + 1,
                entry.mood.emoji(),
                entry.mood.label(),
                entry.count,
                format::percent(entry.count, freq.total)
            );
        }
        println!();
    }

    println!("---");
    println!("*Generated by mindbloom*");
}

pub fn print_json(snapshot: &DerivedSnapshot) -> Result<()> {
    let json = serde_json::json!({
        "computed_at": snapshot.computed_at.to_rfc3339(),
        "totals": {
            "mood_entries": snapshot.total_mood_entries,
            "journal_entries": snapshot.total_journal_entries,
            "this_week": snapshot.entries_this_week,
        },
        "streaks": {
            "current": snapshot.current_streak(),
            "longest": snapshot.longest_streak(),
        },
        "recent_mood": snapshot.recent_mood,
        "most_common_mood": snapshot.most_common_mood(),
        "weekly": snapshot.weekly_series.iter().map(|slot| serde_json::json!({
            "date": slot.date.to_string(),
            "day": slot.weekday_label(),
            "mood": slot.entry.as_ref().map(|e| e.mood),
        })).collect::<Vec<_>>(),
        "breakdown": snapshot.mood_frequency.as_ref().map(|freq| {
            freq.counts.iter().map(|c| serde_json::json!({
                "mood": c.mood,
                "count": c.count,
                "percent": format::percent(c.count, freq.total),
            })).collect::<Vec<_>>()
        }).unwrap_or_default(),
    });

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

pub fn print_mood_list(moods: &[MoodEntry], limit: usize, now: &DateTime<Local>) {
    if moods.is_empty() {
        println!("No mood check-ins yet. Try `mindbloom mood happy`.");
        return;
    }

    println!("RECENT MOODS");
    for entry in moods.iter().take(limit) {
        println!(
            "   {} {:<9} {:<12} {:>8}  {}",
            entry.mood.emoji(),
            entry.mood.label(),
            format::relative_day(entry.date, now),
            format::time_of_day(entry.date, &Local),
            entry.id
        );
        if let Some(note) = &entry.note {
            println!("      \"{}\"", note);
        }
    }
    if moods.len() > limit {
        println!("   ... and {} more", moods.len() - limit);
    }
}

pub fn print_journal_list(journals: &[JournalEntry], limit: usize, now: &DateTime<Local>) {
    if journals.is_empty() {
        println!("No journal entries yet. Try `mindbloom journal --content \"...\"`.");
        return;
    }

    println!("RECENT JOURNAL ENTRIES");
    for entry in journals.iter().take(limit) {
        println!(
            "   {:<30} {:<12} {}",
            entry.title,
            format::relative_day(entry.date, now),
            entry.id
        );
        if !entry.tags.is_empty() {
            let tags: Vec<&str> = entry.tags.iter().map(|t| t.label()).collect();
            println!("      {}", tags.join(", "));
        }
        println!("      {}", preview(&entry.content, 70));
    }
    if journals.len() > limit {
        println!("   ... and {} more", journals.len() - limit);
    }
}

/// First `max` characters of `text` on one line.
fn preview(text: &str, max: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max {
        flat
    } else {
        let cut: String = flat.chars().take(max).collect();
        format!("{}...", cut)
    }
}
