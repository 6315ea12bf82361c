//! Live entry feed
//!
//! [`LiveStore`] keeps the latest collections for one user in a
//! `tokio::sync::watch` channel. Every successful write, and every
//! [`LiveStore::refresh`] that finds a difference, publishes the full
//! collections again. Subscribers only ever see whole deliveries.

use std::sync::Arc;

use chrono::{DateTime, TimeZone};
use tokio::sync::watch;

use super::{require_user, EntryBackend, OpResult};
use crate::analytics::{compute_snapshot, DerivedSnapshot};
use crate::error::Result;
use crate::types::{EntryCollections, EntryId, NewJournalEntry, NewMoodEntry, UserId};

/// Store handle for one (possibly signed-out) user.
pub struct LiveStore<B: EntryBackend> {
    backend: B,
    user: Option<UserId>,
    tx: watch::Sender<Arc<EntryCollections>>,
}

impl<B: EntryBackend> LiveStore<B> {
    /// Open the feed, loading the user's current collections.
    ///
    /// Without a user the feed starts, and stays, empty.
    pub fn open(backend: B, user: Option<UserId>) -> Result<Self> {
        let initial = match &user {
            Some(user) => backend.load(user)?,
            None => EntryCollections::default(),
        };
        tracing::info!(
            user = user.as_ref().map(UserId::as_str).unwrap_or("<none>"),
            moods = initial.moods.len(),
            journals = initial.journals.len(),
            "Opened entry feed"
        );

        let (tx, _rx) = watch::channel(Arc::new(initial));
        Ok(Self { backend, user, tx })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Latest published collections.
    pub fn collections(&self) -> Arc<EntryCollections> {
        self.tx.borrow().clone()
    }

    /// Snapshot of the latest collections.
    pub fn snapshot<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DerivedSnapshot {
        let collections = self.collections();
        compute_snapshot(&collections.moods, &collections.journals, now)
    }

    /// Subscribe to collection changes.
    ///
    /// The subscription yields the current collections first, then each
    /// later change. Dropping it unsubscribes.
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            rx: self.tx.subscribe(),
            primed: false,
        }
    }

    /// Re-read the backend and publish if anything changed.
    ///
    /// Returns whether a new delivery was published.
    pub fn refresh(&self) -> Result<bool> {
        let Some(user) = &self.user else {
            return Ok(false);
        };
        let latest = self.backend.load(user)?;
        let changed = self.tx.send_if_modified(|current| {
            if **current == latest {
                false
            } else {
                *current = Arc::new(latest);
                true
            }
        });
        if changed {
            tracing::debug!("Published refreshed entry collections");
        }
        Ok(changed)
    }

    pub fn add_mood_entry(&self, entry: &NewMoodEntry) -> OpResult {
        self.write("add mood entry", |backend, user| {
            backend.create_mood(user, entry).map(|_| ())
        })
    }

    pub fn delete_mood_entry(&self, id: &EntryId) -> OpResult {
        self.write("delete mood entry", |backend, user| {
            backend.delete_mood(user, id)
        })
    }

    pub fn add_journal_entry(&self, entry: &NewJournalEntry) -> OpResult {
        self.write("add journal entry", |backend, user| {
            backend.create_journal(user, entry).map(|_| ())
        })
    }

    pub fn delete_journal_entry(&self, id: &EntryId) -> OpResult {
        self.write("delete journal entry", |backend, user| {
            backend.delete_journal(user, id)
        })
    }

    fn write<F>(&self, action: &str, op: F) -> OpResult
    where
        F: FnOnce(&B, &UserId) -> Result<()>,
    {
        let result = require_user(self.user.as_ref()).and_then(|user| op(&self.backend, user));

        match &result {
            Ok(()) => {
                // The write is stored; a failed reload only delays the feed
                if let Err(e) = self.refresh() {
                    tracing::warn!(action, error = %e, "Refresh after write failed");
                }
            }
            Err(e) => tracing::error!(action, error = %e, "Store write failed"),
        }
        result.into()
    }
}

/// A restartable stream of full-collection deliveries.
pub struct Subscription {
    rx: watch::Receiver<Arc<EntryCollections>>,
    primed: bool,
}

impl Subscription {
    /// Wait for the next delivery.
    ///
    /// The first call returns immediately with the current collections.
    /// Returns `None` once the store has been dropped.
    pub async fn next(&mut self) -> Option<Arc<EntryCollections>> {
        if self.primed {
            self.rx.changed().await.ok()?;
        }
        self.primed = true;
        Some(self.rx.borrow_and_update().clone())
    }

    /// The latest delivery without waiting.
    pub fn current(&self) -> Arc<EntryCollections> {
        self.rx.borrow().clone()
    }
}
