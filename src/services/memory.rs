//! In-process collaborator implementations.
//!
//! DESIGN
//! ======
//! Each type records what the pages asked of it (saves, deletes, toasts,
//! navigations, dispatched actions) so callers can inspect the effects.
//! Storage types can be told to fail to exercise error feedback paths.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::{RwLock, broadcast, watch};
use tracing::debug;

use super::auth::{AuthSource, AuthUser};
use super::feedback::{ConfirmRequest, Confirmation, Confirmer, Notifier, Toast};
use super::router::Navigator;
use super::storage::{BlogStore, DeckStore, StoreError};
use super::store::{AppAction, AppStore};
use crate::blog::BlogEntry;
use crate::deck::Deck;

const AUTH_CHANNEL_CAPACITY: usize = 16;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// AUTH
// =============================================================================

/// Auth provider whose user is set directly.
pub struct MemoryAuth {
    user: watch::Sender<Option<AuthUser>>,
    changes: broadcast::Sender<()>,
}

impl MemoryAuth {
    #[must_use]
    pub fn new(user: Option<AuthUser>) -> Self {
        let (changes, _) = broadcast::channel(AUTH_CHANNEL_CAPACITY);
        Self { user: watch::Sender::new(user), changes }
    }

    /// Replace the current user and notify subscribers.
    pub fn set_user(&self, user: Option<AuthUser>) {
        self.user.send_replace(user);
        // No receivers is fine: nobody is mounted.
        let _ = self.changes.send(());
    }
}

impl AuthSource for MemoryAuth {
    fn current_user(&self) -> Option<AuthUser> {
        self.user.borrow().clone()
    }

    fn changes(&self) -> broadcast::Receiver<()> {
        self.changes.subscribe()
    }
}

// =============================================================================
// BLOG STORE
// =============================================================================

/// Blog entries keyed by uid. The collection is absent until seeded or
/// first written, matching a database path that does not exist yet.
#[derive(Default)]
pub struct MemoryBlogStore {
    entries: RwLock<Option<BTreeMap<String, BlogEntry>>>,
    failure: RwLock<Option<StoreError>>,
}

impl MemoryBlogStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entries(entries: Vec<BlogEntry>) -> Self {
        let map: BTreeMap<String, BlogEntry> = entries.into_iter().map(|e| (e.uid.clone(), e)).collect();
        Self { entries: RwLock::new(Some(map)), failure: RwLock::new(None) }
    }

    /// Make every following call fail with `error` (or succeed again with `None`).
    pub async fn set_failure(&self, error: Option<StoreError>) {
        *self.failure.write().await = error;
    }

    pub async fn get(&self, uid: &str) -> Option<BlogEntry> {
        self.entries.read().await.as_ref().and_then(|m| m.get(uid).cloned())
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.as_ref().map_or(0, BTreeMap::len)
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn check(&self) -> Result<(), StoreError> {
        match self.failure.read().await.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl BlogStore for MemoryBlogStore {
    async fn load_entries(&self) -> Result<Option<Vec<BlogEntry>>, StoreError> {
        self.check().await?;
        Ok(self.entries.read().await.as_ref().map(|m| m.values().cloned().collect()))
    }

    async fn save_entry(&self, entry: &BlogEntry) -> Result<(), StoreError> {
        self.check().await?;
        debug!(uid = %entry.uid, "memory store: save blog entry");
        self.entries
            .write()
            .await
            .get_or_insert_with(BTreeMap::new)
            .insert(entry.uid.clone(), entry.clone());
        Ok(())
    }

    async fn delete_entry(&self, uid: &str) -> Result<(), StoreError> {
        self.check().await?;
        debug!(%uid, "memory store: delete blog entry");
        if let Some(map) = self.entries.write().await.as_mut() {
            map.remove(uid);
        }
        Ok(())
    }
}

// =============================================================================
// DECK STORE
// =============================================================================

#[derive(Default)]
pub struct MemoryDeckStore {
    decks: RwLock<HashMap<String, Deck>>,
    failure: RwLock<Option<StoreError>>,
}

impl MemoryDeckStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, deck: Deck) {
        self.decks.write().await.insert(deck.id.clone(), deck);
    }

    pub async fn set_failure(&self, error: Option<StoreError>) {
        *self.failure.write().await = error;
    }
}

#[async_trait::async_trait]
impl DeckStore for MemoryDeckStore {
    async fn load_deck(&self, id: &str) -> Result<Deck, StoreError> {
        if let Some(err) = self.failure.read().await.clone() {
            return Err(err);
        }
        self.decks
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

// =============================================================================
// APP STORE
// =============================================================================

/// Shared state holding the deck under edit and the mobile-layout flag.
pub struct MemoryAppStore {
    deck: RwLock<Option<Deck>>,
    actions: RwLock<Vec<AppAction>>,
    mobile_collection_view: watch::Sender<bool>,
}

impl Default for MemoryAppStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAppStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            deck: RwLock::new(None),
            actions: RwLock::new(Vec::new()),
            mobile_collection_view: watch::Sender::new(false),
        }
    }

    pub async fn deck(&self) -> Option<Deck> {
        self.deck.read().await.clone()
    }

    pub async fn actions(&self) -> Vec<AppAction> {
        self.actions.read().await.clone()
    }

    pub fn set_mobile_collection_view(&self, enabled: bool) {
        self.mobile_collection_view.send_replace(enabled);
    }
}

#[async_trait::async_trait]
impl AppStore for MemoryAppStore {
    async fn dispatch(&self, action: AppAction) {
        match &action {
            AppAction::SetDeck(deck) => {
                *self.deck.write().await = Some(deck.clone());
            }
        }
        self.actions.write().await.push(action);
    }

    fn mobile_collection_view(&self) -> watch::Receiver<bool> {
        self.mobile_collection_view.subscribe()
    }
}

// =============================================================================
// FEEDBACK / ROUTER
// =============================================================================

/// Confirmer that answers every request the same way.
pub struct MemoryConfirmer {
    answer: Mutex<Confirmation>,
    requests: Mutex<Vec<ConfirmRequest>>,
}

impl MemoryConfirmer {
    #[must_use]
    pub fn new(answer: Confirmation) -> Self {
        Self { answer: Mutex::new(answer), requests: Mutex::new(Vec::new()) }
    }

    pub fn set_answer(&self, answer: Confirmation) {
        *lock(&self.answer) = answer;
    }

    #[must_use]
    pub fn requests(&self) -> Vec<ConfirmRequest> {
        lock(&self.requests).clone()
    }
}

#[async_trait::async_trait]
impl Confirmer for MemoryConfirmer {
    async fn confirm(&self, request: ConfirmRequest) -> Confirmation {
        lock(&self.requests).push(request);
        *lock(&self.answer)
    }
}

#[derive(Default)]
pub struct MemoryNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl MemoryNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn toasts(&self) -> Vec<Toast> {
        lock(&self.toasts).clone()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, toast: Toast) {
        lock(&self.toasts).push(toast);
    }
}

#[derive(Default)]
pub struct MemoryNavigator {
    history: Mutex<Vec<String>>,
}

impl MemoryNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn history(&self) -> Vec<String> {
        lock(&self.history).clone()
    }
}

impl Navigator for MemoryNavigator {
    fn navigate(&self, url: &str) {
        lock(&self.history).push(url.to_string());
    }
}
