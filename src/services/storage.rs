//! Storage collaborators for blog entries and decks.
//!
//! The backing store owns retries, batching, and consistency; callers see
//! single-value completions only.

use crate::blog::BlogEntry;
use crate::deck::Deck;

/// Failures reported by a storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait::async_trait]
pub trait BlogStore: Send + Sync {
    /// One-shot snapshot of every entry. `None` when the collection does not exist.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the snapshot cannot be read.
    async fn load_entries(&self) -> Result<Option<Vec<BlogEntry>>, StoreError>;

    /// Insert or overwrite an entry keyed by its uid.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the write fails.
    async fn save_entry(&self, entry: &BlogEntry) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns a [`StoreError`] if the delete fails.
    async fn delete_entry(&self, uid: &str) -> Result<(), StoreError>;
}

#[async_trait::async_trait]
pub trait DeckStore: Send + Sync {
    /// Fetch a single deck by its external id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for unknown ids, or another
    /// [`StoreError`] if the read fails.
    async fn load_deck(&self, id: &str) -> Result<Deck, StoreError>;
}
