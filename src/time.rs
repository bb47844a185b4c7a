//! Time abstraction for testability.
//!
//! This module provides a [`Sleeper`] trait so the poll loop can wait between
//! attempts with real `tokio` timers in production and without delay in tests.

use std::time::Duration;

/// Abstraction over asynchronous sleeping.
///
/// Sleeping must be cancellable: dropping the returned future stops the wait.
/// Implementations must never busy-spin.
///
/// # Example
///
/// ```
/// use n8n_webhook::time::{InstantSleeper, Sleeper};
/// use std::time::Duration;
///
/// # async fn example() {
/// InstantSleeper.sleep(Duration::from_secs(60)).await; // returns immediately
/// # }
/// ```
pub trait Sleeper: Send + Sync {
    /// Waits for the given duration.
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;
}

/// Production sleeper backed by [`tokio::time::sleep`].
///
/// Under a paused tokio runtime (`start_paused = true`), time auto-advances,
/// which lets tests observe exact poll spacing without waiting.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Sleeper that returns immediately.
///
/// Intended for tests that only care about attempt counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantSleeper;

impl Sleeper for InstantSleeper {
    async fn sleep(&self, _duration: Duration) {}
}
