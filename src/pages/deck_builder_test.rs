use std::time::Duration;

use serde_json::json;

use super::*;
use crate::services::memory::{MemoryAppStore, MemoryDeckStore};
use crate::services::store::AppAction;

struct Fixture {
    decks: Arc<MemoryDeckStore>,
    app: Arc<MemoryAppStore>,
    page: DeckBuilderPage,
}

fn shared_deck(id: &str) -> Deck {
    serde_json::from_value(json!({
        "id": id,
        "title": "Blue Flare",
        "rating": 4.5,
        "ratingCount": 12
    }))
    .unwrap()
}

async fn fixture(width: u32) -> Fixture {
    let decks = Arc::new(MemoryDeckStore::new());
    decks.insert(shared_deck("shared-1")).await;
    let app = Arc::new(MemoryAppStore::new());
    let page = DeckBuilderPage::new(decks.clone(), app.clone(), width);
    Fixture { decks, app, page }
}

async fn wait_for_mobile(page: &DeckBuilderPage, expected: bool) {
    tokio::time::timeout(Duration::from_secs(1), async {
        while page.mobile_collection_view() != expected {
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
    })
    .await
    .expect("mobile view mirror did not update");
}

#[tokio::test]
async fn new_page_uses_tier_for_width() {
    let fx = fixture(900).await;
    assert_eq!(fx.page.tier(), LayoutTier::Medium);
    assert_eq!(fx.page.panels(), PanelState::for_tier(LayoutTier::Medium));
}

#[tokio::test]
async fn mount_with_deck_id_publishes_working_copy() {
    let mut fx = fixture(1280).await;

    let deck = fx.page.mount(Some("shared-1")).await.unwrap().unwrap();

    assert_ne!(deck.id, "shared-1");
    assert_eq!(deck.field("title"), Some(&json!("Blue Flare")));
    assert_eq!(deck.rating_count, 0);
    assert_eq!(fx.app.deck().await, Some(deck));
}

#[tokio::test]
async fn mount_without_deck_id_loads_nothing() {
    let mut fx = fixture(1280).await;
    assert_eq!(fx.page.mount(None).await.unwrap(), None);
    assert!(fx.app.actions().await.is_empty());
}

#[tokio::test]
async fn mount_propagates_fetch_failure() {
    let mut fx = fixture(1280).await;
    fx.decks.set_failure(Some(StoreError::Unavailable("offline".into()))).await;
    let err = fx.page.mount(Some("shared-1")).await.unwrap_err();
    assert!(matches!(err, StoreError::Unavailable(_)));
}

#[tokio::test]
async fn route_change_loads_new_deck() {
    let mut fx = fixture(1280).await;
    fx.decks.insert(shared_deck("shared-2")).await;
    fx.page.mount(Some("shared-1")).await.unwrap();

    let second = fx.page.on_route_change(Some("shared-2")).await.unwrap().unwrap();

    let actions = fx.app.actions().await;
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[1], AppAction::SetDeck(second));
}

#[tokio::test]
async fn resize_and_toggle_delegate_to_controller() {
    let mut fx = fixture(1280).await;
    fx.page.mount(None).await.unwrap();

    let state = fx.page.on_resize(800);
    assert_eq!(state, PanelState::for_tier(LayoutTier::Medium));

    let state = fx.page.change_view(PanelTarget::Deck);
    assert!(state.deck_visible);
    assert!(!state.collection_visible);
    assert!(state.stats_visible);
    assert_eq!(fx.page.panels(), state);
}

#[tokio::test]
async fn mount_mirrors_initial_selector_value() {
    let mut fx = fixture(1280).await;
    fx.app.set_mobile_collection_view(true);
    fx.page.mount(None).await.unwrap();
    assert!(fx.page.mobile_collection_view());
}

#[tokio::test]
async fn selector_changes_mirror_until_teardown() {
    let mut fx = fixture(1280).await;
    fx.page.mount(None).await.unwrap();
    assert!(!fx.page.mobile_collection_view());

    fx.app.set_mobile_collection_view(true);
    wait_for_mobile(&fx.page, true).await;

    fx.page.teardown();
    fx.app.set_mobile_collection_view(false);
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert!(fx.page.mobile_collection_view());
}

#[tokio::test]
async fn remount_registers_selector_once() {
    let mut fx = fixture(1280).await;
    fx.page.mount(None).await.unwrap();
    fx.page.mount(Some("shared-1")).await.unwrap();

    assert_eq!(fx.page.scope.active(), 1);
    assert_eq!(fx.app.actions().await.len(), 1);
}
