//! # mindbloom-core
//!
//! Core library for MindBloom - mood check-ins, journaling and insights.
//!
//! This library provides:
//! - Domain types for mood and journal entries
//! - The analytics engine (streaks, weekly series, mood frequency)
//! - A data-access layer with a live entry feed, backed by SQLite
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! Data flows through three layers:
//! - **Store:** per-user entry collections, delivered newest-first
//! - **Engine:** pure functions from collections (plus "now") to a [`DerivedSnapshot`]
//! - **View:** whatever renders the snapshot (the `mindbloom` CLI)
//!
//! ## Example
//!
//! ```rust,no_run
//! use mindbloom_core::{Config, Database, LiveStore};
//!
//! let config = Config::load().expect("failed to load config");
//!
//! let db = Database::open(&Config::database_path()).expect("failed to open database");
//! db.migrate().expect("failed to run migrations");
//!
//! let store = LiveStore::open(db, config.user.user_id()).expect("failed to open store");
//! let snapshot = store.snapshot(&chrono::Local::now());
//! println!("current streak: {}", snapshot.current_streak());
//! ```

// Re-export commonly used items at the crate root
pub use analytics::{compute_snapshot, DerivedSnapshot};
pub use config::Config;
pub use db::Database;
pub use error::{Error, Result};
pub use store::{EntryBackend, LiveStore, OpResult, Subscription};
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod logging;
pub mod store;
pub mod types;
