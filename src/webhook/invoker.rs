//! Webhook dispatch with completion handling.

use std::time::Duration;

use tokio::time::Instant;

use crate::error::Error;
use crate::time::{Sleeper, TokioSleeper};

use super::{CompletionPolicy, HttpClient, HttpRequest, HttpResponse};

/// Returns true if `status` marks the workflow run as finished.
///
/// Only `200 OK` is terminal; `202 Accepted`, redirects and error codes all
/// mean "not done yet" while polling.
#[must_use]
pub fn is_terminal(status: http::StatusCode) -> bool {
    status == http::StatusCode::OK
}

/// Raw outcome of one invocation.
///
/// `body` is `None` when the response body was never read
/// (fire-and-forget) or cannot exist (`HEAD`), and `Some` otherwise,
/// possibly empty.
#[derive(Debug, Clone)]
pub struct InvocationResult {
    /// Status of the last response
    pub status: http::StatusCode,
    /// Headers of the last response
    pub headers: http::HeaderMap,
    /// Body of the last response, if it was read
    pub body: Option<Vec<u8>>,
    /// Number of requests sent, including the initial one
    pub attempts: u32,
    /// Monotonic time from the first dispatch to the last response
    pub elapsed: Duration,
}

impl InvocationResult {
    /// Creates a result for a single exchange.
    #[must_use]
    pub const fn new(
        status: http::StatusCode,
        headers: http::HeaderMap,
        body: Option<Vec<u8>>,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            attempts: 1,
            elapsed: Duration::ZERO,
        }
    }

    /// Returns the declared `Content-Type`, if present and readable.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }

    fn from_response(response: HttpResponse, body_read: bool, attempts: u32, elapsed: Duration) -> Self {
        Self {
            status: response.status,
            headers: response.headers,
            body: body_read.then_some(response.body),
            attempts,
            elapsed,
        }
    }
}

/// Sends an assembled request and applies a [`CompletionPolicy`].
///
/// # State machine
///
/// ```text
/// Dispatching ──wait=false──▶ FireAndForget ──▶ Done
///      │
///      └──wait=true──▶ AwaitingTerminal ──200──▶ Done
///                        │        ▲
///                  non-200│        │ re-send after poll_interval
///                        └────────┘ (until the budget is spent: Timeout)
/// ```
///
/// Transport errors end the invocation immediately, whether they happen on
/// the initial dispatch or on a poll.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
/// - `S`: The sleeper used between polls (defaults to [`TokioSleeper`])
///
/// # Example
///
/// ```no_run
/// use n8n_webhook::webhook::{CompletionPolicy, HttpRequest, ReqwestClient, WebhookInvoker};
/// use url::Url;
///
/// # async fn example() -> Result<(), n8n_webhook::Error> {
/// let invoker = WebhookInvoker::new(ReqwestClient::new());
/// let request = HttpRequest::new(
///     http::Method::POST,
///     Url::parse("https://n8n.example.com/webhook/my-path").unwrap(),
/// );
///
/// let result = invoker.invoke(&request, &CompletionPolicy::new()).await?;
/// println!("finished after {} requests", result.attempts);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct WebhookInvoker<H, S = TokioSleeper> {
    client: H,
    sleeper: S,
}

impl<H> WebhookInvoker<H, TokioSleeper> {
    /// Creates an invoker sleeping with [`TokioSleeper`] between polls.
    #[must_use]
    pub const fn new(client: H) -> Self {
        Self {
            client,
            sleeper: TokioSleeper,
        }
    }
}

impl<H, S> WebhookInvoker<H, S> {
    /// Sets a custom sleeper for poll delays.
    ///
    /// This is primarily useful for testing to avoid actual delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> WebhookInvoker<H, S2> {
        WebhookInvoker {
            client: self.client,
            sleeper,
        }
    }
}

impl<H: HttpClient, S: Sleeper> WebhookInvoker<H, S> {
    /// Dispatches `request` and waits according to `policy`.
    ///
    /// # Errors
    ///
    /// - [`Error::Transport`] if any dispatch fails
    /// - [`Error::Timeout`] if polling never sees `200 OK` within the budget
    pub async fn invoke(
        &self,
        request: &HttpRequest,
        policy: &CompletionPolicy,
    ) -> Result<InvocationResult, Error> {
        let started = Instant::now();

        if !policy.wait {
            let response = self.client.request_discarding_body(request.clone()).await?;
            tracing::debug!(status = %response.status, url = %request.url, "Webhook fired without waiting");
            return Ok(InvocationResult::from_response(
                response,
                false,
                1,
                started.elapsed(),
            ));
        }

        self.await_terminal(request, policy, started).await
    }

    async fn await_terminal(
        &self,
        request: &HttpRequest,
        policy: &CompletionPolicy,
        started: Instant,
    ) -> Result<InvocationResult, Error> {
        let mut attempts: u32 = 1;
        let mut polls: u32 = 0;
        let mut response = self.client.request(request.clone()).await?;

        while !is_terminal(response.status) {
            if !policy.allows_poll(polls, started.elapsed()) {
                tracing::warn!(
                    attempts,
                    last_status = %response.status,
                    "Workflow did not complete within {}s",
                    policy.overall_timeout.as_secs_f64()
                );
                return Err(Error::Timeout {
                    attempts,
                    timeout: policy.overall_timeout,
                });
            }

            tracing::debug!(
                status = %response.status,
                attempt = attempts,
                "Workflow not complete, polling again in {:?}",
                policy.poll_interval
            );

            self.sleeper.sleep(policy.poll_interval).await;
            polls += 1;
            attempts += 1;
            response = self.client.request(request.clone()).await?;
        }

        tracing::info!(attempts, "Workflow completed");
        // HEAD replies never carry a body, whatever their Content-Type says
        let body_read = request.method != http::Method::HEAD;
        Ok(InvocationResult::from_response(
            response,
            body_read,
            attempts,
            started.elapsed(),
        ))
    }
}
