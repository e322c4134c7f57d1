//! Runtime configuration parsed from environment variables.
//!
//! Optional:
//! - `RIGHTS_PATH`: YAML list of `{id, admin, writeBlog}` rows; no rights when absent
//! - `BLOG_SEED_PATH`: JSON array of blog entries to seed the in-memory store
//! - `VIEWPORT_WIDTH`: initial deck-builder width in px, default 1280
//! - `DECK_ID`: deck to load into the deck builder on mount

use std::path::{Path, PathBuf};

use crate::blog::BlogEntry;
use crate::rights::RightsRegistry;

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },
    #[error("failed to parse {what}: {message}")]
    Parse { what: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub rights_path: Option<PathBuf>,
    pub blog_seed_path: Option<PathBuf>,
    pub viewport_width: u32,
    pub deck_id: Option<String>,
}

impl AppConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            rights_path: env_path("RIGHTS_PATH"),
            blog_seed_path: env_path("BLOG_SEED_PATH"),
            viewport_width: env_parse("VIEWPORT_WIDTH", DEFAULT_VIEWPORT_WIDTH),
            deck_id: std::env::var("DECK_ID").ok().filter(|v| !v.is_empty()),
        }
    }

    /// Load the rights registry, or an empty one if no file is configured.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configured file is unreadable or malformed.
    pub fn load_rights(&self) -> Result<RightsRegistry, ConfigError> {
        match &self.rights_path {
            Some(path) => RightsRegistry::load(path),
            None => Ok(RightsRegistry::default()),
        }
    }

    /// Load the seed entries, or none if no file is configured.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configured file is unreadable or malformed.
    pub fn load_blog_seed(&self) -> Result<Vec<BlogEntry>, ConfigError> {
        match &self.blog_seed_path {
            Some(path) => load_blog_seed(path),
            None => Ok(Vec::new()),
        }
    }
}

fn load_blog_seed(path: &Path) -> Result<Vec<BlogEntry>, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Read { path: path.display().to_string(), message: e.to_string() })?;
    serde_json::from_str(&raw).map_err(|e| ConfigError::Parse { what: "blog seed".into(), message: e.to_string() })
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key).filter(|v| !v.is_empty()).map(PathBuf::from)
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
