//! Structured cancellation for component subscriptions.
//!
//! DESIGN
//! ======
//! A component registers every long-lived subscription with its own
//! `SubscriptionScope`. Teardown cancels the scope once: the shared flag
//! flips, every task is aborted, and later `spawn` calls are ignored.
//! `Drop` cancels too, so abandoned components (failed mounts, abnormal
//! navigation) never leave callbacks running.
//!
//! Tasks race their work against the cancellation flag with a biased
//! `select!`, and callbacks that mutate component state re-check
//! [`ScopeToken::is_cancelled`] first.

use std::future::Future;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

#[cfg(test)]
#[path = "scope_test.rs"]
mod tests;

/// Read side of a scope's cancellation flag.
#[derive(Clone, Debug)]
pub struct ScopeToken {
    rx: watch::Receiver<bool>,
}

impl ScopeToken {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once the scope is cancelled or dropped.
    pub async fn cancelled(&mut self) {
        // A closed channel means the scope is gone, which counts as cancelled.
        let _ = self.rx.wait_for(|cancelled| *cancelled).await;
    }
}

/// Owns the subscription tasks of one component instance.
pub struct SubscriptionScope {
    name: &'static str,
    cancel: watch::Sender<bool>,
    tasks: Vec<JoinHandle<()>>,
}

impl SubscriptionScope {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self { name, cancel: watch::Sender::new(false), tasks: Vec::new() }
    }

    #[must_use]
    pub fn token(&self) -> ScopeToken {
        ScopeToken { rx: self.cancel.subscribe() }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.cancel.borrow()
    }

    /// Number of registered tasks that are still running.
    #[must_use]
    pub fn active(&self) -> usize {
        self.tasks.iter().filter(|t| !t.is_finished()).count()
    }

    /// Run `fut` until it completes or the scope is cancelled.
    ///
    /// Must be called from within a tokio runtime. Ignored after cancellation.
    pub fn spawn<F>(&mut self, label: &'static str, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.is_cancelled() {
            debug!(scope = self.name, label, "scope already cancelled; subscription not started");
            return;
        }

        let mut token = self.token();
        let scope = self.name;
        let handle = tokio::spawn(async move {
            tokio::select! {
                biased;
                () = token.cancelled() => {
                    debug!(scope, label, "subscription cancelled");
                }
                () = fut => {
                    debug!(scope, label, "subscription stream ended");
                }
            }
        });
        self.tasks.retain(|t| !t.is_finished());
        self.tasks.push(handle);
    }

    /// Cancel every subscription. Returns `false` if already cancelled.
    pub fn cancel(&mut self) -> bool {
        if self.cancel.send_replace(true) {
            return false;
        }
        let count = self.tasks.len();
        for task in self.tasks.drain(..) {
            task.abort();
        }
        info!(scope = self.name, count, "subscription scope cancelled");
        true
    }
}

impl Drop for SubscriptionScope {
    fn drop(&mut self) {
        self.cancel();
    }
}
