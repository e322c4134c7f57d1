//! Authentication collaborator: current-user snapshot plus change stream.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// The signed-in user as exposed by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub uid: String,
    pub display_name: String,
}

/// Read-only view of the auth provider.
pub trait AuthSource: Send + Sync {
    /// Current user, if anyone is signed in.
    fn current_user(&self) -> Option<AuthUser>;

    /// Fires once per auth change. Receivers re-read [`AuthSource::current_user`].
    fn changes(&self) -> broadcast::Receiver<()>;
}
