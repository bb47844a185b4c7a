//! End-to-end workflow trigger: assemble, invoke, decode.

use crate::auth::AuthSpec;
use crate::error::Error;
use crate::request::{RequestAssembler, RequestSpec};
use crate::storage::ContentStore;
use crate::time::{Sleeper, TokioSleeper};
use crate::webhook::{CompletionPolicy, HttpClient, Output, WebhookInvoker, decode};

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;

/// Triggers one webhook-exposed workflow per call.
///
/// Holds no per-invocation state, so a single instance can serve any number
/// of sequential or concurrent calls.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
/// - `C`: The content store resolving external body references
/// - `S`: The sleeper used between polls (defaults to [`TokioSleeper`])
///
/// # Example
///
/// ```no_run
/// use n8n_webhook::TriggerWorkflow;
/// use n8n_webhook::auth::AuthSpec;
/// use n8n_webhook::request::{ContentType, HttpMethodKind, RequestSpec};
/// use n8n_webhook::storage::FileContentStore;
/// use n8n_webhook::webhook::{CompletionPolicy, ReqwestClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let trigger = TriggerWorkflow::new(ReqwestClient::new(), FileContentStore::new());
/// let spec = RequestSpec::builder()
///     .uri("https://n8n.example.com/webhook/invoice")
///     .method(HttpMethodKind::Post)
///     .from("/tmp/invoice.xml")
///     .content_type(ContentType::Xml)
///     .build()?;
///
/// let output = trigger
///     .run(&spec, &AuthSpec::basic("user", "secret"), &CompletionPolicy::new())
///     .await?;
/// println!("{}", output.status_code);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TriggerWorkflow<H, C, S = TokioSleeper> {
    assembler: RequestAssembler<C>,
    invoker: WebhookInvoker<H, S>,
}

impl<H, C> TriggerWorkflow<H, C, TokioSleeper> {
    /// Creates a trigger with the default sleeper.
    #[must_use]
    pub const fn new(client: H, store: C) -> Self {
        Self {
            assembler: RequestAssembler::new(store),
            invoker: WebhookInvoker::new(client),
        }
    }
}

impl<H, C, S> TriggerWorkflow<H, C, S> {
    /// Sets a custom sleeper for poll delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> TriggerWorkflow<H, C, S2> {
        TriggerWorkflow {
            assembler: self.assembler,
            invoker: self.invoker.with_sleeper(sleeper),
        }
    }
}

impl<H, C, S> TriggerWorkflow<H, C, S>
where
    H: HttpClient,
    C: ContentStore,
    S: Sleeper,
{
    /// Runs one invocation and returns its normalized output.
    ///
    /// # Errors
    ///
    /// - [`Error::Configuration`] for invalid headers or credentials
    /// - [`Error::Storage`] if the external body cannot be read
    /// - [`Error::Transport`] if a dispatch fails
    /// - [`Error::Timeout`] if polling exhausts its budget
    /// - [`Error::Decoding`] if a declared JSON body does not parse
    pub async fn run(
        &self,
        spec: &RequestSpec,
        auth: &AuthSpec,
        policy: &CompletionPolicy,
    ) -> Result<Output, Error> {
        let request = self.assembler.assemble(spec, auth)?;
        tracing::debug!(
            method = %request.method,
            url = %request.url,
            auth = auth.kind(),
            wait = policy.wait,
            "Triggering workflow"
        );

        let result = self.invoker.invoke(&request, policy).await?;

        let mut output = decode(result)?;
        output.uri = Some(request.url.into());
        Ok(output)
    }
}
