//! Application execution logic.
//!
//! Builds the HTTP client and the workflow trigger from the validated
//! configuration, runs one invocation and renders its output.

use thiserror::Error;

use n8n_webhook::TriggerWorkflow;
use n8n_webhook::config::ValidatedConfig;
use n8n_webhook::storage::{ContentStore, FileContentStore};
use n8n_webhook::time::Sleeper;
use n8n_webhook::webhook::{HttpClient, HttpError, Output, ReqwestClient};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The HTTP client could not be built.
    #[error("Failed to create HTTP client: {0}")]
    ClientSetup(#[source] HttpError),

    /// The invocation failed.
    #[error(transparent)]
    Invocation(#[from] n8n_webhook::Error),

    /// The output could not be rendered as JSON.
    #[error("Failed to render output: {0}")]
    Render(#[source] serde_json::Error),
}

impl RunError {
    /// Returns true if the failure stems from invalid configuration
    /// detected while assembling the request.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Invocation(e) if e.is_configuration())
    }
}

/// Executes one webhook invocation and prints its output to stdout.
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP client cannot be created
/// - The invocation fails (see [`n8n_webhook::Error`])
///
/// # Coverage Note
///
/// Excluded from coverage because it performs real network I/O.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let client = ReqwestClient::with_timeouts(config.connect_timeout, config.http_timeout)
        .map_err(RunError::ClientSetup)?;
    let trigger = TriggerWorkflow::new(client, FileContentStore::new());

    let rendered = trigger_and_render(&trigger, &config).await?;
    println!("{rendered}");

    Ok(())
}

/// Runs the trigger with the configured request and renders the output.
async fn trigger_and_render<H, C, S>(
    trigger: &TriggerWorkflow<H, C, S>,
    config: &ValidatedConfig,
) -> Result<String, RunError>
where
    H: HttpClient,
    C: ContentStore,
    S: Sleeper,
{
    let output = trigger
        .run(&config.request, &config.auth, &config.completion)
        .await?;

    log_outcome(&output);

    serde_json::to_string_pretty(&output).map_err(RunError::Render)
}

fn log_outcome(output: &Output) {
    if output.body.is_none() {
        tracing::info!(
            "Webhook answered {} (not waiting for completion)",
            output.status_code
        );
    } else {
        tracing::info!(
            "Workflow answered {} after {} request(s) in {}ms",
            output.status_code,
            output.attempts,
            output.duration.as_millis()
        );
    }
}
