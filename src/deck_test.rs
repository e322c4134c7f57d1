use serde_json::json;

use super::*;
use crate::services::memory::{MemoryAppStore, MemoryDeckStore};

fn source_deck() -> Deck {
    serde_json::from_value(json!({
        "id": "X",
        "name": "Foo",
        "title": "Red Hybrid",
        "cards": [{ "id": "BT1-010", "count": 4 }],
        "tags": ["Hybrid"],
        "rating": 7,
        "ratingCount": 3,
        "color": { "name": "Red" }
    }))
    .unwrap()
}

async fn bridge_with(deck: Option<Deck>) -> (DeckLoadBridge, Arc<MemoryDeckStore>, Arc<MemoryAppStore>) {
    let decks = Arc::new(MemoryDeckStore::new());
    if let Some(deck) = deck {
        decks.insert(deck).await;
    }
    let app = Arc::new(MemoryAppStore::new());
    (DeckLoadBridge::new(decks.clone(), app.clone()), decks, app)
}

// =============================================================
// into_working_copy
// =============================================================

#[test]
fn working_copy_gets_fresh_id_and_zero_ratings() {
    let copy = source_deck().into_working_copy();
    assert_ne!(copy.id, "X");
    assert!(Uuid::parse_str(&copy.id).is_ok());
    assert_eq!(copy.rating, 0.0);
    assert_eq!(copy.rating_count, 0);
}

#[test]
fn working_copy_preserves_other_fields() {
    let source = source_deck();
    let copy = source.clone().into_working_copy();
    assert_eq!(copy.extra, source.extra);
    assert_eq!(copy.field("title"), Some(&json!("Red Hybrid")));
    assert_eq!(copy.field("cards"), Some(&json!([{ "id": "BT1-010", "count": 4 }])));

    let wire = serde_json::to_value(&copy).unwrap();
    assert_eq!(wire["name"], "Foo");
    assert_eq!(wire["color"]["name"], "Red");
    assert_eq!(wire["ratingCount"], 0);
}

fn wire_keys(value: &serde_json::Value) -> Vec<String> {
    let mut keys: Vec<String> = value.as_object().unwrap().keys().cloned().collect();
    keys.sort();
    keys
}

#[test]
fn working_copy_has_exactly_the_source_keys() {
    let source = json!({ "id": "X", "name": "Foo", "rating": 7, "ratingCount": 3 });
    let deck: Deck = serde_json::from_value(source.clone()).unwrap();

    let wire = serde_json::to_value(deck.into_working_copy()).unwrap();

    assert_eq!(wire_keys(&wire), wire_keys(&source));
    assert_eq!(wire["name"], "Foo");
}

#[test]
fn null_fields_survive_the_round_trip() {
    let source = json!({ "id": "X", "title": null, "cards": null, "rating": null, "ratingCount": null });
    let deck: Deck = serde_json::from_value(source.clone()).unwrap();

    let wire = serde_json::to_value(deck.into_working_copy()).unwrap();

    assert_eq!(wire_keys(&wire), wire_keys(&source));
    assert!(wire["title"].is_null());
    assert!(wire["cards"].is_null());
    assert_eq!(wire["ratingCount"], 0);
}

#[test]
fn working_copies_get_distinct_ids() {
    let a = source_deck().into_working_copy();
    let b = source_deck().into_working_copy();
    assert_ne!(a.id, b.id);
}

// =============================================================
// load_deck
// =============================================================

#[tokio::test]
async fn load_deck_publishes_working_copy() {
    let (bridge, _, app) = bridge_with(Some(source_deck())).await;

    let published = bridge.load_deck(Some("X")).await.unwrap().unwrap();

    assert_ne!(published.id, "X");
    assert_eq!(published.rating, 0.0);
    assert_eq!(published.rating_count, 0);
    assert_eq!(published.extra.get("name"), Some(&json!("Foo")));
    assert_eq!(app.deck().await, Some(published.clone()));
    assert_eq!(app.actions().await, vec![AppAction::SetDeck(published)]);
}

#[tokio::test]
async fn load_deck_without_id_is_noop() {
    let (bridge, _, app) = bridge_with(Some(source_deck())).await;

    assert_eq!(bridge.load_deck(None).await.unwrap(), None);
    assert_eq!(bridge.load_deck(Some("")).await.unwrap(), None);
    assert!(app.actions().await.is_empty());
}

#[tokio::test]
async fn load_deck_unknown_id_propagates_not_found() {
    let (bridge, _, app) = bridge_with(None).await;

    let err = bridge.load_deck(Some("missing")).await.unwrap_err();

    assert_eq!(err, StoreError::NotFound("missing".into()));
    assert!(app.deck().await.is_none());
}

#[tokio::test]
async fn load_deck_store_failure_propagates() {
    let (bridge, decks, app) = bridge_with(Some(source_deck())).await;
    decks.set_failure(Some(StoreError::Unavailable("offline".into()))).await;

    let err = bridge.load_deck(Some("X")).await.unwrap_err();

    assert!(matches!(err, StoreError::Unavailable(_)));
    assert!(app.actions().await.is_empty());
}
