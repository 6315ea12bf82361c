//! Core domain types for mindbloom
//!
//! These types are the shapes the external store hands back to us. The
//! analytics layer only ever reads them.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Mood entry** | A single check-in: fixed-vocabulary [`Mood`], timestamp, optional note |
//! | **Journal entry** | A free-text reflection with a title and zero or more [`EmotionTag`]s |
//! | **User** | The signed-in owner of entries, identified by [`UserId`] |
//!
//! Entries are never edited in place. They are created, and later hard-deleted.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Title given to journal entries written without one.
pub const UNTITLED_ENTRY: &str = "Untitled Entry";

// ============================================
// Identifiers
// ============================================

/// Opaque per-entry identifier assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub String);

impl EntryId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        EntryId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        EntryId(s.to_string())
    }
}

/// Identity-provider user id used to scope every store query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        UserId(s.to_string())
    }
}

// ============================================
// Mood
// ============================================

/// The fixed mood vocabulary, ordered from brightest to heaviest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Blooming,
    Amazing,
    Happy,
    Good,
    Okay,
    Meh,
    Sad,
    Anxious,
}

impl Mood {
    /// Every mood, in picker order.
    pub const ALL: [Mood; 8] = [
        Mood::Blooming,
        Mood::Amazing,
        Mood::Happy,
        Mood::Good,
        Mood::Okay,
        Mood::Meh,
        Mood::Sad,
        Mood::Anxious,
    ];

    /// Stable identifier, as persisted.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Blooming => "blooming",
            Mood::Amazing => "amazing",
            Mood::Happy => "happy",
            Mood::Good => "good",
            Mood::Okay => "okay",
            Mood::Meh => "meh",
            Mood::Sad => "sad",
            Mood::Anxious => "anxious",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Blooming => "Blooming",
            Mood::Amazing => "Amazing",
            Mood::Happy => "Happy",
            Mood::Good => "Good",
            Mood::Okay => "Okay",
            Mood::Meh => "Meh",
            Mood::Sad => "Sad",
            Mood::Anxious => "Anxious",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Blooming => "🌸",
            Mood::Amazing => "🤩",
            Mood::Happy => "😊",
            Mood::Good => "😌",
            Mood::Okay => "😐",
            Mood::Meh => "😕",
            Mood::Sad => "😢",
            Mood::Anxious => "😰",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts either the stable id or the display label, case-insensitively.
impl std::str::FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let needle = s.trim();
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("unknown mood: {}", s))
    }
}

// ============================================
// Emotion tags
// ============================================

/// Emotion tags that can be attached to a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionTag {
    Grateful,
    Excited,
    Motivated,
    Peaceful,
    Creative,
    Blooming,
}

impl EmotionTag {
    pub const ALL: [EmotionTag; 6] = [
        EmotionTag::Grateful,
        EmotionTag::Excited,
        EmotionTag::Motivated,
        EmotionTag::Peaceful,
        EmotionTag::Creative,
        EmotionTag::Blooming,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionTag::Grateful => "grateful",
            EmotionTag::Excited => "excited",
            EmotionTag::Motivated => "motivated",
            EmotionTag::Peaceful => "peaceful",
            EmotionTag::Creative => "creative",
            EmotionTag::Blooming => "blooming",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EmotionTag::Grateful => "Grateful",
            EmotionTag::Excited => "Excited",
            EmotionTag::Motivated => "Motivated",
            EmotionTag::Peaceful => "Peaceful",
            EmotionTag::Creative => "Creative",
            EmotionTag::Blooming => "Blooming",
        }
    }
}

impl fmt::Display for EmotionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for EmotionTag {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let needle = s.trim();
        EmotionTag::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("unknown emotion tag: {}", s))
    }
}

// ============================================
// Entries
// ============================================

/// A mood check-in as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: EntryId,
    /// When the mood was logged
    pub date: DateTime<Utc>,
    pub mood: Mood,
    pub note: Option<String>,
}

/// A journal entry as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: EntryId,
    pub date: DateTime<Utc>,
    pub title: String,
    pub content: String,
    pub tags: Vec<EmotionTag>,
}

/// A mood check-in that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMoodEntry {
    pub date: DateTime<Utc>,
    pub mood: Mood,
    pub note: Option<String>,
}

impl NewMoodEntry {
    /// Build a check-in stamped with the current time.
    ///
    /// Blank notes are dropped.
    pub fn new(mood: Mood, note: Option<&str>) -> Self {
        Self::at(Utc::now(), mood, note)
    }

    /// Build a check-in with an explicit timestamp.
    ///
    /// The timestamp is truncated to whole milliseconds, the precision
    /// entries are stored at.
    pub fn at(date: DateTime<Utc>, mood: Mood, note: Option<&str>) -> Self {
        let note = note
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        Self {
            date: date.trunc_subsecs(3),
            mood,
            note,
        }
    }
}

/// A journal entry that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJournalEntry {
    pub date: DateTime<Utc>,
    pub title: String,
    pub content: String,
    pub tags: Vec<EmotionTag>,
}

impl NewJournalEntry {
    /// Validate and normalize a journal entry stamped with the current time.
    pub fn new(title: Option<&str>, content: &str, tags: &[EmotionTag]) -> Result<Self> {
        Self::at(Utc::now(), title, content, tags)
    }

    /// Like [`NewJournalEntry::new`] with an explicit timestamp.
    ///
    /// Content must be non-empty after trimming. A blank title becomes
    /// [`UNTITLED_ENTRY`]. Repeated tags are collapsed. The timestamp is
    /// truncated to whole milliseconds.
    pub fn at(
        date: DateTime<Utc>,
        title: Option<&str>,
        content: &str,
        tags: &[EmotionTag],
    ) -> Result<Self> {
        let content = content.trim();
        if content.is_empty() {
            return Err(Error::Validation(
                "journal content must not be empty".to_string(),
            ));
        }

        let title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(UNTITLED_ENTRY)
            .to_string();

        let mut unique = Vec::with_capacity(tags.len());
        for tag in tags {
            if !unique.contains(tag) {
                unique.push(*tag);
            }
        }

        Ok(Self {
            date: date.trunc_subsecs(3),
            title,
            content: content.to_string(),
            tags: unique,
        })
    }
}

/// Both of a user's collections as one store delivery, newest-first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryCollections {
    pub moods: Vec<MoodEntry>,
    pub journals: Vec<JournalEntry>,
}

impl EntryCollections {
    pub fn is_empty(&self) -> bool {
        self.moods.is_empty() && self.journals.is_empty()
    }
}
