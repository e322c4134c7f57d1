//! deckhub — view-layer logic for a card-game companion app.
//!
//! ARCHITECTURE
//! ============
//! - `viewport` / `panels`: responsive deck-builder layout state machine.
//! - `deck`: load a shared deck and publish a working copy to app state.
//! - `blog` / `rights`: blog entry partitioning and role checks.
//! - `scope`: structured cancellation for page subscriptions.
//! - `pages`: the home (blog) and deck-builder components.
//! - `services`: collaborator seams plus in-memory implementations.

pub mod blog;
pub mod config;
pub mod deck;
pub mod pages;
pub mod panels;
pub mod rights;
pub mod scope;
pub mod services;
pub mod viewport;
