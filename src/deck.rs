//! Deck records and the load-then-publish bridge.
//!
//! DESIGN
//! ======
//! A shared deck is fetched by its external id, re-identified with a fresh
//! UUID and stripped of ratings, then published into app state as the
//! working copy. Fields this crate does not model ride along untouched in
//! `extra` so the copy stays faithful to the source record.
//!
//! ERROR HANDLING
//! ==============
//! Fetch failures are returned to the caller; nothing is dispatched.

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::services::storage::{DeckStore, StoreError};
use crate::services::store::{AppAction, AppStore};

#[cfg(test)]
#[path = "deck_test.rs"]
mod tests;

// =============================================================================
// DECK
// =============================================================================

/// A deck record as stored by the backing database.
///
/// Only the fields the bridge rewrites are typed. Everything else (title,
/// card list, tags, author, ...) stays in `extra` exactly as fetched, so a
/// working copy never gains or loses keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating_count: u32,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Deck {
    /// A non-modeled field of the source record.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }

    /// Turn a fetched record into a fresh working copy: new id, no ratings.
    #[must_use]
    pub fn into_working_copy(self) -> Self {
        Self { id: Uuid::new_v4().to_string(), rating: 0.0, rating_count: 0, ..self }
    }
}

// =============================================================================
// BRIDGE
// =============================================================================

/// Connects the deck store to shared app state.
#[derive(Clone)]
pub struct DeckLoadBridge {
    decks: Arc<dyn DeckStore>,
    app: Arc<dyn AppStore>,
}

impl DeckLoadBridge {
    #[must_use]
    pub fn new(decks: Arc<dyn DeckStore>, app: Arc<dyn AppStore>) -> Self {
        Self { decks, app }
    }

    /// Load the deck named by a route parameter and publish a working copy.
    ///
    /// Returns `Ok(None)` without touching any collaborator when `id` is
    /// absent or empty.
    ///
    /// # Errors
    ///
    /// Returns the store error if the fetch fails.
    pub async fn load_deck(&self, id: Option<&str>) -> Result<Option<Deck>, StoreError> {
        let Some(id) = id.filter(|id| !id.is_empty()) else {
            debug!("no deck id in route; skipping load");
            return Ok(None);
        };

        let record = self.decks.load_deck(id).await?;
        let deck = record.into_working_copy();
        info!(source_id = %id, deck_id = %deck.id, "publishing loaded deck");
        self.app.dispatch(AppAction::SetDeck(deck.clone())).await;
        Ok(Some(deck))
    }
}
