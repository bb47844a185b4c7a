//! Completion policy for webhook invocations.

use std::time::Duration;

/// Decides whether and how long an invocation waits for a terminal response.
///
/// With `wait = false` the request is fired once and its body is never read.
/// With `wait = true` the first `200 OK` response is terminal; any other
/// status causes the identical request to be re-sent every `poll_interval`
/// until a `200 OK` arrives or `overall_timeout` is used up.
///
/// # Defaults
///
/// - `wait`: true
/// - `poll_interval`: 2 seconds
/// - `overall_timeout`: 5 minutes
///
/// # Example
///
/// ```
/// use n8n_webhook::webhook::CompletionPolicy;
/// use std::time::Duration;
///
/// let policy = CompletionPolicy::new()
///     .with_poll_interval(Duration::from_secs(5))
///     .with_overall_timeout(Duration::from_secs(60));
///
/// assert_eq!(policy.max_polls(), 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionPolicy {
    /// Whether to wait for a terminal response.
    pub wait: bool,

    /// Delay between two polls of the same endpoint.
    pub poll_interval: Duration,

    /// Budget for polling, measured from the first dispatch.
    pub overall_timeout: Duration,
}

impl CompletionPolicy {
    /// Default poll interval (2 seconds).
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

    /// Default overall timeout (5 minutes).
    pub const DEFAULT_OVERALL_TIMEOUT: Duration = Duration::from_secs(300);

    /// Creates a waiting policy with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            wait: true,
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            overall_timeout: Self::DEFAULT_OVERALL_TIMEOUT,
        }
    }

    /// Creates a policy that returns right after dispatch.
    #[must_use]
    pub const fn fire_and_forget() -> Self {
        Self::new().with_wait(false)
    }

    /// Sets whether to wait for a terminal response.
    #[must_use]
    pub const fn with_wait(mut self, wait: bool) -> Self {
        self.wait = wait;
        self
    }

    /// Sets the poll interval.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is zero.
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        assert!(!interval.is_zero(), "poll_interval must be greater than zero");
        self.poll_interval = interval;
        self
    }

    /// Sets the overall timeout.
    #[must_use]
    pub const fn with_overall_timeout(mut self, timeout: Duration) -> Self {
        self.overall_timeout = timeout;
        self
    }

    /// Maximum number of polls after the initial dispatch:
    /// `floor(overall_timeout / poll_interval)`.
    #[must_use]
    pub fn max_polls(&self) -> u32 {
        let polls = self.overall_timeout.as_nanos() / self.poll_interval.as_nanos().max(1);
        u32::try_from(polls).unwrap_or(u32::MAX)
    }

    /// Returns true if another poll still fits in the budget.
    ///
    /// `polls` is the number of polls already made and `elapsed` the
    /// monotonic time since the first dispatch.
    #[must_use]
    pub fn allows_poll(&self, polls: u32, elapsed: Duration) -> bool {
        polls < self.max_polls() && elapsed.saturating_add(self.poll_interval) <= self.overall_timeout
    }
}

impl Default for CompletionPolicy {
    fn default() -> Self {
        Self::new()
    }
}
