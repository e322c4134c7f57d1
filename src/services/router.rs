//! Routing collaborator.

/// Issues navigation commands to the host router.
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &str);
}

/// Route of a single blog entry.
#[must_use]
pub fn blog_entry_url(uid: &str) -> String {
    format!("blog/{uid}")
}
