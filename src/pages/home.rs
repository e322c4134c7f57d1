//! Home page — community blog listing, moderation, and editing.
//!
//! DESIGN
//! ======
//! The page keeps the published/hidden partition locally and writes every
//! change through to the blog store. The signed-in user is mirrored from
//! the auth source by a scoped subscription; role checks read that mirror
//! and the shared `RightsRegistry`.
//!
//! ERROR HANDLING
//! ==============
//! Store writes report both ways: a success toast on completion, an error
//! toast plus a `warn!` on failure. The error is also returned so callers
//! can react. Local lists are updated before the write and are not rolled
//! back on failure.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use uuid::Uuid;

use crate::blog::{BlogEntry, BlogLists, DEFAULT_ENTRY_CATEGORY, DEFAULT_ENTRY_TITLE, now_ms};
use crate::rights::RightsRegistry;
use crate::scope::SubscriptionScope;
use crate::services::auth::{AuthSource, AuthUser};
use crate::services::feedback::{ConfirmRequest, Confirmation, Confirmer, Notifier, Toast};
use crate::services::router::{Navigator, blog_entry_url};
use crate::services::storage::{BlogStore, StoreError};

#[cfg(test)]
#[path = "home_test.rs"]
mod tests;

const DELETE_CONFIRM_MESSAGE: &str = "You are about to permanently delete this Blog-Entry. Are you sure?";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum BlogError {
    #[error("no user is signed in")]
    NotSignedIn,
    #[error("blog store error: {0}")]
    Store(#[from] StoreError),
}

/// Collaborators the home page talks to.
#[derive(Clone)]
pub struct HomeServices {
    pub auth: Arc<dyn AuthSource>,
    pub blog: Arc<dyn BlogStore>,
    pub confirmer: Arc<dyn Confirmer>,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
}

/// Entry currently open in the editor.
#[derive(Debug, Clone, PartialEq)]
pub struct BlogDraft {
    pub entry: BlogEntry,
    pub title: String,
    pub text: Vec<serde_json::Value>,
}

/// Outcome of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
}

// =============================================================================
// PAGE
// =============================================================================

pub struct HomePage {
    services: HomeServices,
    rights: Arc<RightsRegistry>,
    user: Arc<Mutex<Option<AuthUser>>>,
    lists: BlogLists,
    draft: Option<BlogDraft>,
    subscribed: bool,
    scope: SubscriptionScope,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl HomePage {
    #[must_use]
    pub fn new(services: HomeServices, rights: Arc<RightsRegistry>) -> Self {
        Self {
            services,
            rights,
            user: Arc::new(Mutex::new(None)),
            lists: BlogLists::default(),
            draft: None,
            subscribed: false,
            scope: SubscriptionScope::new("home"),
        }
    }

    // -------------------------------------------------------------------------
    // LIFECYCLE
    // -------------------------------------------------------------------------

    /// Mirror the auth state and load the blog entries.
    ///
    /// Must be called from within a tokio runtime. Mounting again reloads
    /// the entries but keeps the existing auth subscription.
    ///
    /// # Errors
    ///
    /// Returns the store error if the entries cannot be loaded. The auth
    /// subscription stays registered; teardown still releases it.
    pub async fn mount(&mut self) -> Result<(), BlogError> {
        if !self.subscribed {
            self.subscribe_auth();
        }

        let Some(entries) = self.services.blog.load_entries().await? else {
            info!("no blog collection yet");
            return Ok(());
        };
        self.lists = BlogLists::partition(entries);
        info!(
            published = self.lists.published().len(),
            hidden = self.lists.hidden().len(),
            "blog entries loaded"
        );
        Ok(())
    }

    fn subscribe_auth(&mut self) {
        let auth = self.services.auth.clone();
        let user = self.user.clone();
        let token = self.scope.token();
        // Subscribe before reading the snapshot so a change in between is not lost.
        let mut changes = auth.changes();
        *lock(&user) = auth.current_user();
        self.subscribed = true;

        self.scope.spawn("auth", async move {
            loop {
                match changes.recv().await {
                    Ok(()) | Err(RecvError::Lagged(_)) => {
                        if token.is_cancelled() {
                            break;
                        }
                        *lock(&user) = auth.current_user();
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
    }

    /// Release every subscription. Safe to call more than once.
    pub fn teardown(&mut self) {
        self.scope.cancel();
    }

    // -------------------------------------------------------------------------
    // VIEW STATE
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn user(&self) -> Option<AuthUser> {
        lock(&self.user).clone()
    }

    #[must_use]
    pub fn all_entries(&self) -> &[BlogEntry] {
        self.lists.all()
    }

    #[must_use]
    pub fn blog_entries(&self) -> &[BlogEntry] {
        self.lists.published()
    }

    #[must_use]
    pub fn blog_entries_hidden(&self) -> &[BlogEntry] {
        self.lists.hidden()
    }

    #[must_use]
    pub fn draft(&self) -> Option<&BlogDraft> {
        self.draft.as_ref()
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    // -------------------------------------------------------------------------
    // ROLE CHECKS
    // -------------------------------------------------------------------------

    fn user_id(&self) -> Option<String> {
        lock(&self.user).as_ref().map(|u| u.uid.clone())
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.rights.is_admin(self.user_id().as_deref())
    }

    #[must_use]
    pub fn show_write(&self) -> bool {
        self.rights.can_write(self.user_id().as_deref())
    }

    #[must_use]
    pub fn show_buttons(&self) -> bool {
        self.rights.show_buttons(self.user_id().as_deref(), self.lists.all())
    }

    #[must_use]
    pub fn show_edit(&self, entry: &BlogEntry) -> bool {
        self.rights.show_edit(self.user_id().as_deref(), entry)
    }

    // -------------------------------------------------------------------------
    // ACTIONS
    // -------------------------------------------------------------------------

    /// Create an empty, unapproved entry authored by the current user.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::NotSignedIn`] without a user, or the store error
    /// if the save fails.
    pub async fn new_entry(&mut self) -> Result<BlogEntry, BlogError> {
        let user = self.user().ok_or(BlogError::NotSignedIn)?;
        let entry = BlogEntry {
            uid: Uuid::new_v4().to_string(),
            date: now_ms(),
            title: DEFAULT_ENTRY_TITLE.to_string(),
            text: Vec::new(),
            approved: false,
            author: user.display_name,
            author_id: user.uid,
            category: DEFAULT_ENTRY_CATEGORY.to_string(),
        };
        self.lists.insert_hidden(entry.clone());
        self.write_entry(
            &entry,
            Toast::success("Blog-Entry created!", "New Blog-Entry was created successfully!"),
            "Blog-Entry could not be created!",
        )
        .await?;
        Ok(entry)
    }

    pub fn open(&self, entry: &BlogEntry) {
        self.services.navigator.navigate(&blog_entry_url(&entry.uid));
    }

    /// # Errors
    ///
    /// Returns the store error if the save fails.
    pub async fn approve(&mut self, entry: &BlogEntry) -> Result<BlogEntry, BlogError> {
        let updated = self.lists.approve(entry);
        info!(uid = %updated.uid, "blog entry approved");
        self.save_quietly(&updated).await?;
        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns the store error if the save fails.
    pub async fn hide(&mut self, entry: &BlogEntry) -> Result<BlogEntry, BlogError> {
        let updated = self.lists.hide(entry);
        info!(uid = %updated.uid, "blog entry hidden");
        self.save_quietly(&updated).await?;
        Ok(updated)
    }

    /// Open `entry` in the editor.
    pub fn edit(&mut self, entry: &BlogEntry) {
        self.draft = Some(BlogDraft { entry: entry.clone(), title: entry.title.clone(), text: entry.text.clone() });
    }

    /// Update the open draft's title and body.
    pub fn update_draft(&mut self, title: impl Into<String>, text: Vec<serde_json::Value>) {
        if let Some(draft) = self.draft.as_mut() {
            draft.title = title.into();
            draft.text = text;
        }
    }

    /// Leave the editor without saving.
    pub fn cancel_edit(&mut self) {
        self.draft = None;
    }

    /// Write the open draft back and close the editor. `Ok(None)` if nothing
    /// is open.
    ///
    /// # Errors
    ///
    /// Returns the store error if the save fails; the editor stays open.
    pub async fn save(&mut self) -> Result<Option<BlogEntry>, BlogError> {
        let Some(draft) = self.draft.as_ref() else {
            return Ok(None);
        };
        let mut entry = draft.entry.clone();
        entry.title.clone_from(&draft.title);
        entry.text.clone_from(&draft.text);
        entry.date = now_ms();

        self.lists.replace(&entry);
        self.write_entry(
            &entry,
            Toast::success("Blog-Entry saved!", "The Blog-Entry was saved successfully!"),
            "Blog-Entry could not be saved!",
        )
        .await?;
        self.draft = None;
        Ok(Some(entry))
    }

    /// Ask for confirmation, then delete `entry` everywhere.
    ///
    /// # Errors
    ///
    /// Returns the store error if the delete fails.
    pub async fn delete(&mut self, entry: &BlogEntry) -> Result<DeleteOutcome, BlogError> {
        let request = ConfirmRequest { message: DELETE_CONFIRM_MESSAGE.to_string() };
        if self.services.confirmer.confirm(request).await == Confirmation::Reject {
            return Ok(DeleteOutcome::Cancelled);
        }

        self.lists.remove(&entry.uid);
        match self.services.blog.delete_entry(&entry.uid).await {
            Ok(()) => {
                info!(uid = %entry.uid, "blog entry deleted");
                self.services
                    .notifier
                    .notify(Toast::success("Blog-Entry deleted!", "The Blog-Entry was deleted successfully!"));
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) => {
                warn!(error = %e, uid = %entry.uid, "blog entry delete failed");
                self.services
                    .notifier
                    .notify(Toast::error("Blog-Entry could not be deleted!", e.to_string()));
                Err(e.into())
            }
        }
    }

    async fn write_entry(&self, entry: &BlogEntry, success: Toast, failure_summary: &str) -> Result<(), BlogError> {
        match self.services.blog.save_entry(entry).await {
            Ok(()) => {
                self.services.notifier.notify(success);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, uid = %entry.uid, "blog entry save failed");
                self.services
                    .notifier
                    .notify(Toast::error(failure_summary, e.to_string()));
                Err(e.into())
            }
        }
    }

    /// Approve/hide give no success toast, only failure feedback.
    async fn save_quietly(&self, entry: &BlogEntry) -> Result<(), BlogError> {
        self.services.blog.save_entry(entry).await.map_err(|e| {
            warn!(error = %e, uid = %entry.uid, "blog entry save failed");
            self.services
                .notifier
                .notify(Toast::error("Blog-Entry could not be saved!", e.to_string()));
            BlogError::from(e)
        })
    }
}
