//! Per-user blog capabilities.
//!
//! DESIGN
//! ======
//! The rights list is process-wide configuration: it is read once at
//! startup, indexed by user id, and shared read-only behind an `Arc`.
//! Anonymous users and unknown ids get no capabilities.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::blog::BlogEntry;
use crate::config::ConfigError;

#[cfg(test)]
#[path = "rights_test.rs"]
mod tests;

/// One row of the rights file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RightsEntry {
    pub id: String,
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub write_blog: bool,
}

/// What a user may do on the blog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub is_admin: bool,
    pub can_write_blog: bool,
}

/// Immutable user-id to capabilities lookup.
#[derive(Debug, Clone, Default)]
pub struct RightsRegistry {
    by_user: HashMap<String, Capabilities>,
}

impl RightsRegistry {
    /// Index `entries` by id. Rows repeating an id are merged: a capability
    /// granted by any row is granted.
    #[must_use]
    pub fn new(entries: Vec<RightsEntry>) -> Self {
        let mut by_user: HashMap<String, Capabilities> = HashMap::new();
        for entry in entries {
            let caps = by_user.entry(entry.id).or_default();
            caps.is_admin |= entry.admin;
            caps.can_write_blog |= entry.write_blog;
        }
        Self { by_user }
    }

    /// Parse a YAML list of [`RightsEntry`] rows.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the document is not a list of rows.
    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        let entries: Vec<RightsEntry> = serde_yaml::from_str(raw).map_err(|e| ConfigError::Parse {
            what: "rights".into(),
            message: e.to_string(),
        })?;
        Ok(Self::new(entries))
    }

    /// Read and parse the rights file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if it is malformed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let registry = Self::from_yaml(&raw)?;
        info!(path = %path.display(), users = registry.len(), "rights loaded");
        Ok(registry)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_user.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_user.is_empty()
    }

    #[must_use]
    pub fn capabilities(&self, user_id: Option<&str>) -> Capabilities {
        user_id
            .and_then(|id| self.by_user.get(id))
            .copied()
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_admin(&self, user_id: Option<&str>) -> bool {
        self.capabilities(user_id).is_admin
    }

    /// Admins can always write; others need the blog-writer right.
    #[must_use]
    pub fn can_write(&self, user_id: Option<&str>) -> bool {
        let caps = self.capabilities(user_id);
        caps.is_admin || caps.can_write_blog
    }

    /// Whether to show per-entry action buttons at all: admins always,
    /// writers only once they have authored something.
    #[must_use]
    pub fn show_buttons(&self, user_id: Option<&str>, entries: &[BlogEntry]) -> bool {
        let caps = self.capabilities(user_id);
        if caps.is_admin {
            return true;
        }
        caps.can_write_blog && user_id.is_some_and(|id| entries.iter().any(|e| e.author_id == id))
    }

    /// Whether the user may edit `entry`: admins always, writers their own.
    #[must_use]
    pub fn show_edit(&self, user_id: Option<&str>, entry: &BlogEntry) -> bool {
        let caps = self.capabilities(user_id);
        if caps.is_admin {
            return true;
        }
        caps.can_write_blog && user_id.is_some_and(|id| entry.author_id == id)
    }
}
