//! mindbloom - mood check-ins, journaling and insights from the terminal
//!
//! Every command acts on the user configured in
//! `~/.config/mindbloom/config.toml`.

mod render;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use mindbloom_core::config::AnalyticsConfig;
use mindbloom_core::{
    Config, Database, EmotionTag, EntryCollections, EntryId, LiveStore, Mood, NewJournalEntry,
    NewMoodEntry, OpResult,
};

#[derive(Parser, Debug)]
#[command(name = "mindbloom")]
#[command(about = "MindBloom - track your moods, journal, and watch your patterns bloom")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record how you feel right now
    Mood {
        /// blooming, amazing, happy, good, okay, meh, sad or anxious
        mood: Mood,

        /// What's on your mind? (optional)
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Write a journal entry
    Journal {
        /// Entry text
        #[arg(short, long)]
        content: String,

        /// Entry title (default: "Untitled Entry")
        #[arg(short, long)]
        title: Option<String>,

        /// Emotion tag; repeat for several (grateful, excited, motivated, peaceful, creative, blooming)
        #[arg(long = "tag")]
        tags: Vec<EmotionTag>,
    },

    /// Permanently delete an entry
    Delete {
        kind: EntryKind,
        id: String,
    },

    /// List recent entries, newest first
    List {
        /// Show the expanded history instead of the most recent few
        #[arg(long)]
        all: bool,

        /// List journal entries instead of mood check-ins
        #[arg(long)]
        journal: bool,
    },

    /// Show streaks, the weekly journey and the mood breakdown
    Insights {
        /// Export format (md = markdown, json = JSON)
        #[arg(long)]
        export: Option<String>,
    },

    /// Keep insights on screen, refreshing whenever entries change
    Watch {
        /// Seconds between store refreshes (default from config)
        #[arg(long)]
        interval: Option<u64>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum EntryKind {
    Mood,
    Journal,
}

fn main() -> Result<()> {
    let args = Args::parse();

    Config::ensure_xdg_env();

    let config = Config::load().context("failed to load configuration")?;
    let _log_guard = mindbloom_core::logging::init(&config.logging).ok();

    let db = Database::open(&Config::database_path()).context("failed to open database")?;
    db.migrate().context("failed to run database migrations")?;

    let store =
        LiveStore::open(db, config.user.user_id()).context("failed to load entries")?;

    match args.command {
        Command::Mood { mood, note } => {
            let entry = NewMoodEntry::new(mood, note.as_deref());
            check(store.add_mood_entry(&entry))?;
            println!("{} Mood saved: {}", mood.emoji(), mood.label());
        }
        Command::Journal {
            content,
            title,
            tags,
        } => {
            let entry = NewJournalEntry::new(title.as_deref(), &content, &tags)
                .context("journal entry not saved")?;
            check(store.add_journal_entry(&entry))?;
            println!("Journal entry saved: {}", entry.title);
        }
        Command::Delete { kind, id } => {
            let id = EntryId(id);
            let result = match kind {
                EntryKind::Mood => store.delete_mood_entry(&id),
                EntryKind::Journal => store.delete_journal_entry(&id),
            };
            check(result)?;
            println!("Deleted {}", id);
        }
        Command::List { all, journal } => {
            let limit = list_limit(&config.analytics, all);
            let collections = store.collections();
            let now = Local::now();
            if journal {
                render::print_journal_list(&collections.journals, limit, &now);
            } else {
                render::print_mood_list(&collections.moods, limit, &now);
            }
        }
        Command::Insights { export } => {
            let snapshot = store.snapshot(&Local::now());
            match export.as_deref() {
                Some("json") => render::print_json(&snapshot)?,
                Some("md") => render::print_markdown(&snapshot, &config.analytics),
                Some(other) => {
                    anyhow::bail!("Unknown export format: {}. Use 'md' or 'json'", other)
                }
                None => render::print_terminal(&snapshot, &config),
            }
        }
        Command::Watch { interval } => {
            let secs = interval.unwrap_or(config.watch.poll_interval_secs).max(1);
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("failed to start runtime")?;
            runtime.block_on(watch(&store, &config, Duration::from_secs(secs)))?;
        }
    }

    Ok(())
}

/// Turn a store outcome into a CLI error.
fn check(result: OpResult) -> Result<()> {
    if result.success {
        return Ok(());
    }
    let message = result
        .error
        .unwrap_or_else(|| "unknown store error".to_string());
    anyhow::bail!(message)
}

fn list_limit(config: &AnalyticsConfig, all: bool) -> usize {
    if all {
        config.history_limit
    } else {
        config.recent_limit
    }
}

/// What the watch screen last drew, and for which local day.
struct WatchScreen {
    collections: Arc<EntryCollections>,
    day: NaiveDate,
}

impl WatchScreen {
    fn draw(collections: Arc<EntryCollections>, now: &DateTime<Local>, config: &Config) -> Self {
        let snapshot = mindbloom_core::analytics::snapshot_for(&collections, now);
        render::clear_screen();
        render::print_terminal(&snapshot, config);
        println!("   (watching - press Ctrl-C to stop)");
        Self {
            collections,
            day: now.date_naive(),
        }
    }

    /// True once the local date has moved past the drawn day, which shifts
    /// the weekly series and the current streak without any new entries.
    fn is_stale(&self, now: &DateTime<Local>) -> bool {
        now.date_naive() != self.day
    }
}

/// Re-render insights on every delivery, and at day rollover, until Ctrl-C.
async fn watch(store: &LiveStore<Database>, config: &Config, interval: Duration) -> Result<()> {
    let mut feed = store.subscribe();
    let mut ticker = tokio::time::interval(interval);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut screen: Option<WatchScreen> = None;

    tracing::info!(interval_secs = interval.as_secs(), "Watching for entry changes");

    loop {
        tokio::select! {
            delivery = feed.next() => {
                let Some(collections) = delivery else { break };
                screen = Some(WatchScreen::draw(collections, &Local::now(), config));
            }
            _ = ticker.tick() => {
                if let Err(e) = store.refresh() {
                    tracing::warn!(error = %e, "Refresh failed");
                }
                let now = Local::now();
                let stale = screen
                    .as_ref()
                    .filter(|s| s.is_stale(&now))
                    .map(|s| s.collections.clone());
                if let Some(collections) = stale {
                    tracing::debug!(day = %now.date_naive(), "Day rolled over, redrawing");
                    screen = Some(WatchScreen::draw(collections, &now, config));
                }
            }
            _ = &mut ctrl_c => break,
        }
    }

    tracing::info!("Stopped watching");
    Ok(())
}
