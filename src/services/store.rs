//! Shared application state store: one action in, one selector out.

use tokio::sync::watch;

use crate::deck::Deck;

/// Actions the pages dispatch into shared state.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Replace the deck currently being edited.
    SetDeck(Deck),
}

#[async_trait::async_trait]
pub trait AppStore: Send + Sync {
    async fn dispatch(&self, action: AppAction);

    /// Whether the deck builder should present in mobile, collection-focused mode.
    fn mobile_collection_view(&self) -> watch::Receiver<bool>;
}
