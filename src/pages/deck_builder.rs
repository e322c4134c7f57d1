//! Deck-builder page — responsive panel layout plus shared-deck loading.
//!
//! DESIGN
//! ======
//! Layout and deck loading are independent: resize and toggle events only
//! touch the panel controller, while route changes only run the load
//! bridge. The mobile-mode selector from the app store is mirrored into an
//! atomic by a scoped subscription.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::deck::{Deck, DeckLoadBridge};
use crate::panels::{PanelState, PanelTarget, PanelVisibilityController};
use crate::scope::SubscriptionScope;
use crate::services::storage::{DeckStore, StoreError};
use crate::services::store::AppStore;
use crate::viewport::LayoutTier;

#[cfg(test)]
#[path = "deck_builder_test.rs"]
mod tests;

pub struct DeckBuilderPage {
    app: Arc<dyn AppStore>,
    bridge: DeckLoadBridge,
    panels: PanelVisibilityController,
    mobile_collection_view: Arc<AtomicBool>,
    subscribed: bool,
    scope: SubscriptionScope,
}

impl DeckBuilderPage {
    /// Build the page for the current viewport width. Nothing is subscribed
    /// or loaded until [`DeckBuilderPage::mount`].
    #[must_use]
    pub fn new(decks: Arc<dyn DeckStore>, app: Arc<dyn AppStore>, width: u32) -> Self {
        Self {
            bridge: DeckLoadBridge::new(decks, app.clone()),
            app,
            panels: PanelVisibilityController::new(width),
            mobile_collection_view: Arc::new(AtomicBool::new(false)),
            subscribed: false,
            scope: SubscriptionScope::new("deck_builder"),
        }
    }

    /// Subscribe to shared state and load the deck named by the route.
    ///
    /// Must be called from within a tokio runtime. Mounting again only
    /// reloads the deck; the selector subscription is registered once.
    ///
    /// # Errors
    ///
    /// Returns the store error if the deck fetch fails. The selector
    /// subscription stays registered; teardown still releases it.
    pub async fn mount(&mut self, deck_id: Option<&str>) -> Result<Option<Deck>, StoreError> {
        if !self.subscribed {
            self.subscribe_mobile_view();
        }
        self.bridge.load_deck(deck_id).await
    }

    fn subscribe_mobile_view(&mut self) {
        let mut rx = self.app.mobile_collection_view();
        let mirror = self.mobile_collection_view.clone();
        let token = self.scope.token();
        mirror.store(*rx.borrow_and_update(), Ordering::SeqCst);
        self.subscribed = true;

        self.scope.spawn("mobile_collection_view", async move {
            while rx.changed().await.is_ok() {
                if token.is_cancelled() {
                    break;
                }
                mirror.store(*rx.borrow_and_update(), Ordering::SeqCst);
            }
        });
    }

    /// Release every subscription. Safe to call more than once.
    pub fn teardown(&mut self) {
        self.scope.cancel();
    }

    pub fn on_resize(&mut self, width: u32) -> PanelState {
        self.panels.on_resize(width)
    }

    pub fn change_view(&mut self, target: PanelTarget) -> PanelState {
        self.panels.change_view(target)
    }

    /// # Errors
    ///
    /// Returns the store error if the deck fetch fails.
    pub async fn on_route_change(&self, deck_id: Option<&str>) -> Result<Option<Deck>, StoreError> {
        self.bridge.load_deck(deck_id).await
    }

    #[must_use]
    pub fn panels(&self) -> PanelState {
        self.panels.state()
    }

    #[must_use]
    pub fn tier(&self) -> LayoutTier {
        self.panels.tier()
    }

    #[must_use]
    pub fn mobile_collection_view(&self) -> bool {
        self.mobile_collection_view.load(Ordering::SeqCst)
    }
}
