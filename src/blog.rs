//! Blog entries and the published/hidden partition shown on the home page.
//!
//! DESIGN
//! ======
//! `BlogLists` keeps three views in step: every loaded entry, the approved
//! ones, and the ones awaiting approval. Every mutation goes through a
//! method here so an entry never sits in both visible lists at once.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "blog_test.rs"]
mod tests;

/// Title given to freshly created entries.
pub const DEFAULT_ENTRY_TITLE: &str = "Empty Entry";

/// Category given to freshly created entries.
pub const DEFAULT_ENTRY_CATEGORY: &str = "Tournament Report";

// =============================================================================
// BLOG ENTRY
// =============================================================================

/// A community blog post. Mirrors the record stored in the backing database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogEntry {
    pub uid: String,
    /// Last edit time, unix milliseconds.
    pub date: i64,
    pub title: String,
    /// Rich-text delta ops as produced by the editor.
    #[serde(default)]
    pub text: Vec<serde_json::Value>,
    #[serde(default)]
    pub approved: bool,
    pub author: String,
    pub author_id: String,
    pub category: String,
}

/// Current wall-clock time in unix milliseconds.
#[must_use]
pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
}

// =============================================================================
// LISTS
// =============================================================================

/// Entries as partitioned for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlogLists {
    all: Vec<BlogEntry>,
    published: Vec<BlogEntry>,
    hidden: Vec<BlogEntry>,
}

impl BlogLists {
    /// Split `entries` into approved and not-yet-approved lists.
    #[must_use]
    pub fn partition(entries: Vec<BlogEntry>) -> Self {
        let (published, hidden) = entries.iter().cloned().partition(|entry| entry.approved);
        Self { all: entries, published, hidden }
    }

    #[must_use]
    pub fn all(&self) -> &[BlogEntry] {
        &self.all
    }

    #[must_use]
    pub fn published(&self) -> &[BlogEntry] {
        &self.published
    }

    #[must_use]
    pub fn hidden(&self) -> &[BlogEntry] {
        &self.hidden
    }

    /// Whether `user_id` authored any loaded entry.
    #[must_use]
    pub fn has_entry_by(&self, user_id: &str) -> bool {
        self.all.iter().any(|entry| entry.author_id == user_id)
    }

    /// Add a new, unapproved entry.
    pub fn insert_hidden(&mut self, entry: BlogEntry) {
        self.all.push(entry.clone());
        self.hidden.push(entry);
    }

    /// Mark `entry` approved and move it to the end of the published list.
    /// Returns the updated entry.
    pub fn approve(&mut self, entry: &BlogEntry) -> BlogEntry {
        self.set_approved(entry, true)
    }

    /// Mark `entry` unapproved and move it to the end of the hidden list.
    /// Returns the updated entry.
    pub fn hide(&mut self, entry: &BlogEntry) -> BlogEntry {
        self.set_approved(entry, false)
    }

    /// Replace the stored copy of `entry` (matched by uid) in every list
    /// that holds it.
    pub fn replace(&mut self, entry: &BlogEntry) {
        for list in [&mut self.all, &mut self.published, &mut self.hidden] {
            if let Some(slot) = list.iter_mut().find(|e| e.uid == entry.uid) {
                slot.clone_from(entry);
            }
        }
    }

    /// Drop the entry with `uid` from every list. Returns whether anything was removed.
    pub fn remove(&mut self, uid: &str) -> bool {
        let before = self.all.len() + self.published.len() + self.hidden.len();
        self.all.retain(|e| e.uid != uid);
        self.published.retain(|e| e.uid != uid);
        self.hidden.retain(|e| e.uid != uid);
        before != self.all.len() + self.published.len() + self.hidden.len()
    }

    fn set_approved(&mut self, entry: &BlogEntry, approved: bool) -> BlogEntry {
        let mut updated = entry.clone();
        updated.approved = approved;

        self.published.retain(|e| e.uid != updated.uid);
        self.hidden.retain(|e| e.uid != updated.uid);
        if approved {
            self.published.push(updated.clone());
        } else {
            self.hidden.push(updated.clone());
        }

        match self.all.iter_mut().find(|e| e.uid == updated.uid) {
            Some(slot) => slot.clone_from(&updated),
            None => self.all.push(updated.clone()),
        }
        updated
    }
}
