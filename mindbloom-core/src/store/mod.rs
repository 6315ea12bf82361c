//! Data access for entry collections
//!
//! The store sits between the persistence backend and everything that
//! renders. It owns the only asynchronous piece of the system: a live feed
//! of full collections that subscribers turn into snapshots.
//!
//! ```text
//! EntryBackend ──load──▶ LiveStore ──watch──▶ Subscription ──▶ compute_snapshot
//!       ▲                    │
//!       └──create / delete───┘
//! ```
//!
//! Writes never return errors to the caller; they report an [`OpResult`]
//! so a failed write cannot take the view down with it.

pub mod live;

pub use live::{LiveStore, Subscription};

use serde::Serialize;

use crate::db::Database;
use crate::error::{Error, Result};
use crate::types::{
    EntryCollections, EntryId, JournalEntry, MoodEntry, NewJournalEntry, NewMoodEntry, UserId,
};

/// Outcome of a store write, as reported to the view layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpResult {
    pub success: bool,
    /// Human-readable failure message
    pub error: Option<String>,
}

impl OpResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

impl<T> From<Result<T>> for OpResult {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(_) => OpResult::ok(),
            Err(e) => OpResult::failed(e.to_string()),
        }
    }
}

/// A persistence backend holding per-user entry collections.
///
/// Implementations must return collections newest-first and must skip
/// records they cannot decode rather than fail the whole load.
pub trait EntryBackend: Send + Sync {
    /// Load both collections for `user`
    fn load(&self, user: &UserId) -> Result<EntryCollections>;

    fn create_mood(&self, user: &UserId, entry: &NewMoodEntry) -> Result<MoodEntry>;

    fn delete_mood(&self, user: &UserId, id: &EntryId) -> Result<()>;

    fn create_journal(&self, user: &UserId, entry: &NewJournalEntry) -> Result<JournalEntry>;

    fn delete_journal(&self, user: &UserId, id: &EntryId) -> Result<()>;
}

impl EntryBackend for Database {
    fn load(&self, user: &UserId) -> Result<EntryCollections> {
        self.load_collections(user)
    }

    fn create_mood(&self, user: &UserId, entry: &NewMoodEntry) -> Result<MoodEntry> {
        self.insert_mood_entry(user, entry)
    }

    fn delete_mood(&self, user: &UserId, id: &EntryId) -> Result<()> {
        self.delete_mood_entry(user, id)
    }

    fn create_journal(&self, user: &UserId, entry: &NewJournalEntry) -> Result<JournalEntry> {
        self.insert_journal_entry(user, entry)
    }

    fn delete_journal(&self, user: &UserId, id: &EntryId) -> Result<()> {
        self.delete_journal_entry(user, id)
    }
}

/// Resolve the signed-in user or fail with [`Error::NotAuthenticated`].
pub(crate) fn require_user(user: Option<&UserId>) -> Result<&UserId> {
    user.ok_or(Error::NotAuthenticated)
}
