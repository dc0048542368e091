//! Cancellation scope for in-flight acquisitions.

use tokio::sync::watch;

/// A cancellation handle tied to the lifetime of a view.
///
/// The presentation layer creates one scope per mounted view and cancels
/// it on teardown. An evaluation running under the scope abandons its
/// in-flight signal fetches instead of resolving into a disposed view.
///
/// Cancellation is one-way and idempotent: once cancelled, a scope stays
/// cancelled.
///
/// # Example
///
/// ```
/// use aegis_core::score::ViewScope;
///
/// let scope = ViewScope::new();
/// assert!(!scope.is_cancelled());
/// scope.cancel();
/// assert!(scope.is_cancelled());
/// ```
#[derive(Debug)]
pub struct ViewScope {
    cancelled: watch::Sender<bool>,
}

impl ViewScope {
    /// Creates a live scope.
    #[must_use]
    pub fn new() -> Self {
        let (cancelled, _) = watch::channel(false);
        Self { cancelled }
    }

    /// Cancels the scope. Safe to call more than once.
    pub fn cancel(&self) {
        self.cancelled.send_replace(true);
    }

    /// Returns whether the scope has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.cancelled.borrow()
    }

    /// Resolves once the scope is cancelled.
    ///
    /// Resolves immediately if the scope was already cancelled.
    pub async fn cancelled(&self) {
        let mut rx = self.cancelled.subscribe();
        // wait_for checks the current value before waiting, so a scope
        // cancelled before this call resolves immediately. The sender
        // lives in self, so the channel cannot close while we borrow it.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}
