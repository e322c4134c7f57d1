//! Page components: lifecycle (mount/teardown) plus user actions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages own their view state exclusively and reach the outside world only
//! through the collaborators in `services`. Each page's subscriptions live
//! in a `SubscriptionScope` that dies with the page.

pub mod deck_builder;
pub mod home;
