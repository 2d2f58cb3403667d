//! Cooperative cancellation for the bootstrap loops.
//!
//! Every acquisition loop in the orchestrator is unbounded, so the
//! only way out is an explicit signal.  [`CancelToken`] is that signal.
//! `main` cancels it on Ctrl-C / SIGTERM and tests cancel it directly.  The
//! orchestrator polls it ([`CancelToken::is_cancelled`]) before each
//! iteration and races every wait against [`CancelToken::cancelled`].
//!
//! # How the wake-up works (for beginners)
//!
//! The flag is an `AtomicBool` so any clone can read it without locking.
//! Waiting tasks additionally park on a `tokio::sync::Notify`.  The waiter
//! creates its `Notified` future *before* re-checking the flag, and
//! `notify_waiters` wakes every future created up to that point, so a cancel
//! that lands between the check and the await is never missed.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tokio::sync::Notify;

/// A clonable, one-way cancellation signal.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    notify: Notify,
}

impl CancelToken {
    /// Creates a token that is not yet cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the token and wakes every task waiting on it.
    ///
    /// Cancelling twice is harmless.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Completes once the token is cancelled.  Returns immediately if it
    /// already is.
    pub async fn cancelled(&self) {
        loop {
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_new_token_is_not_cancelled() {
        assert!(!CancelToken::new().is_cancelled());
    }

    #[test]
    fn test_cancel_is_visible_through_clones() {
        // Arrange
        let token = CancelToken::new();
        let clone = token.clone();

        // Act
        clone.cancel();

        // Assert
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn test_cancelled_returns_immediately_when_already_cancelled() {
        let token = CancelToken::new();
        token.cancel();

        tokio::time::timeout(Duration::from_secs(1), token.cancelled())
            .await
            .expect("must not block");
    }

    #[tokio::test]
    async fn test_cancelled_wakes_waiting_task() {
        // Arrange
        let token = CancelToken::new();
        let waiter = {
            let token = token.clone();
            tokio::spawn(async move { token.cancelled().await })
        };
        tokio::task::yield_now().await;

        // Act
        token.cancel();

        // Assert
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter must wake")
            .expect("waiter must not panic");
    }
}
