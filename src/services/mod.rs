//! External collaborators consumed by the page components.
//!
//! ARCHITECTURE
//! ============
//! Each collaborator is a narrow `async_trait` seam so pages depend on
//! behavior, not on a concrete database, router, or UI toolkit. The
//! `memory` module provides in-process implementations used by the binary
//! and by tests.

pub mod auth;
pub mod feedback;
pub mod memory;
pub mod router;
pub mod storage;
pub mod store;
