//! Database repository layer
//!
//! Create, list and delete operations for both entry collections. Every
//! query is scoped to a single user and returns entries newest-first.

use crate::error::{Error, Result};
use crate::types::*;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, Row};
use std::path::PathBuf;
use std::sync::Mutex;

/// Database handle (single connection)
pub struct Database {
    conn: Mutex<Connection>,
}

/// Fixed-width RFC 3339 so stored timestamps sort lexically.
fn encode_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn decode_ts(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Read a column as text, whatever storage class SQLite chose for it.
///
/// Returns `None` for NULL, numbers and blobs, and for text that is not
/// valid UTF-8.
fn text_column(row: &Row, column: &str) -> rusqlite::Result<Option<String>> {
    Ok(match row.get_ref(column)? {
        ValueRef::Text(bytes) => std::str::from_utf8(bytes).ok().map(str::to_string),
        _ => None,
    })
}

impl Database {
    /// Open or create a database at the given path
    pub fn open(path: &PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        // WAL lets `watch` read while another process writes
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run migrations on this database
    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        super::schema::run_migrations(&conn)
    }

    // ============================================
    // Mood entries
    // ============================================

    /// Store a new mood check-in and return it with its assigned id
    pub fn insert_mood_entry(&self, user: &UserId, entry: &NewMoodEntry) -> Result<MoodEntry> {
        let id = EntryId::generate();
        let date = encode_ts(&entry.date);

        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO moods (id, user_id, date, mood, note, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                id.as_str(),
                user.as_str(),
                date,
                entry.mood.as_str(),
                entry.note,
                date,
            ],
        )?;

        tracing::debug!(%user, %id, mood = entry.mood.as_str(), "Inserted mood entry");

        Ok(MoodEntry {
            id,
            date: entry.date,
            mood: entry.mood,
            note: entry.note.clone(),
        })
    }

    /// Hard-delete a mood check-in owned by `user`
    pub fn delete_mood_entry(&self, user: &UserId, id: &EntryId) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute(
            "DELETE FROM moods WHERE id = ?1 AND user_id = ?2",
            params![id.as_str(), user.as_str()],
        )?;
        if deleted == 0 {
            return Err(Error::EntryNotFound(id.to_string()));
        }
        tracing::debug!(%user, %id, "Deleted mood entry");
        Ok(())
    }

    /// List a user's mood check-ins, newest first.
    ///
    /// Rows that no longer decode (unknown mood, bad timestamp) are skipped.
    pub fn list_mood_entries(&self, user: &UserId) -> Result<Vec<MoodEntry>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT id, date, mood, note
            FROM moods
            WHERE user_id = ?1
            ORDER BY created_at DESC, rowid DESC
            "#,
        )?;

        let rows = stmt.query_map([user.as_str()], Self::row_to_mood_entry)?;
        let mut entries = Vec::new();
        for row in rows {
            if let Some(entry) = row? {
                entries.push(entry);
            }
        }
        Ok(entries)
    }

    fn row_to_mood_entry(row: &Row) -> rusqlite::Result<Option<MoodEntry>> {
        let Some(id) = text_column(row, "id")? else {
            tracing::warn!("Skipping mood entry without a text id");
            return Ok(None);
        };

        let Some(date) = text_column(row, "date")?.as_deref().and_then(decode_ts) else {
            tracing::warn!(id = %id, "Skipping mood entry with invalid date");
            return Ok(None);
        };
        let Some(mood_str) = text_column(row, "mood")? else {
            tracing::warn!(id = %id, "Skipping mood entry without a mood");
            return Ok(None);
        };
        let mood = match mood_str.parse::<Mood>() {
            Ok(mood) => mood,
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "Skipping mood entry with unknown mood");
                return Ok(None);
            }
        };

        Ok(Some(MoodEntry {
            id: EntryId(id),
            date,
            mood,
            note: text_column(row, "note")?,
        }))
    }

    // ============================================
    // Journal entries
    // ============================================

    /// Store a new journal entry and return it with its assigned id
    pub fn insert_journal_entry(
        &self,
        user: &UserId,
        entry: &NewJournalEntry,
    ) -> Result<JournalEntry> {
        let id = EntryId::generate();
        let date = encode_ts(&entry.date);
        let tags = serde_json::to_string(&entry.tags)?;

        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO journals (id, user_id, date, title, content, tags, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                id.as_str(),
                user.as_str(),
                date,
                entry.title,
                entry.content,
                tags,
                date,
            ],
        )?;

        tracing::debug!(%user, %id, tags = entry.tags.len(), "Inserted journal entry");

        Ok(JournalEntry {
            id,
            date: entry.date,
            title: entry.title.clone(),
            content: entry.content.clone(),
            tags: entry.tags.clone(),
        })
    }

    /// Hard-delete a journal entry owned by `user`
    pub fn delete_journal_entry(&self, user: &UserId, id: &EntryId) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute(
            "DELETE FROM journals WHERE id = ?1 AND user_id = ?2",
            params![id.as_str(), user.as_str()],
        )?;
        if deleted == 0 {
            return Err(Error::EntryNotFound(id.to_string()));
        }
        tracing::debug!(%user, %id, "Deleted journal entry");
        Ok(())
    }

    /// List a user's journal entries, newest first.
    ///
    /// Rows with a bad timestamp are skipped; unknown tags are dropped from
    /// the entry rather than dropping the entry.
    pub fn list_journal_entries(&self, user: &UserId) -> Result<Vec<JournalEntry>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT id, date, title, content, tags
            FROM journals
            WHERE user_id = ?1
            ORDER BY created_at DESC, rowid DESC
            "#,
        )?;

        let rows = stmt.query_map([user.as_str()], Self::row_to_journal_entry)?;
        let mut entries = Vec::new();
        for row in rows {
            if let Some(entry) = row? {
                entries.push(entry);
            }
        }
        Ok(entries)
    }

    fn row_to_journal_entry(row: &Row) -> rusqlite::Result<Option<JournalEntry>> {
        let Some(id) = text_column(row, "id")? else {
            tracing::warn!("Skipping journal entry without a text id");
            return Ok(None);
        };

        let Some(date) = text_column(row, "date")?.as_deref().and_then(decode_ts) else {
            tracing::warn!(id = %id, "Skipping journal entry with invalid date");
            return Ok(None);
        };
        let (Some(title), Some(content)) = (text_column(row, "title")?, text_column(row, "content")?)
        else {
            tracing::warn!(id = %id, "Skipping journal entry without text title or content");
            return Ok(None);
        };

        let raw_tags: Vec<String> = match text_column(row, "tags")? {
            Some(tags_str) => serde_json::from_str(&tags_str).unwrap_or_else(|e| {
                tracing::warn!(id = %id, error = %e, "Ignoring unreadable journal tags");
                Vec::new()
            }),
            None => {
                tracing::warn!(id = %id, "Ignoring non-text journal tags");
                Vec::new()
            }
        };
        let tags = raw_tags
            .iter()
            .filter_map(|t| match t.parse::<EmotionTag>() {
                Ok(tag) => Some(tag),
                Err(e) => {
                    tracing::warn!(id = %id, error = %e, "Dropping unknown journal tag");
                    None
                }
            })
            .collect();

        Ok(Some(JournalEntry {
            id: EntryId(id),
            date,
            title,
            content,
            tags,
        }))
    }

    // ============================================
    // Collections
    // ============================================

    /// Load both collections for a user in one call
    pub fn load_collections(&self, user: &UserId) -> Result<EntryCollections> {
        Ok(EntryCollections {
            moods: self.list_mood_entries(user)?,
            journals: self.list_journal_entries(user)?,
        })
    }
}
