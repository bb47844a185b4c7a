//! Process-level plumbing for the binary: exit codes, logging and
//! remediation hints printed after a configuration failure.

use n8n_webhook::config::{ConfigError, field};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::run::RunError;

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;

/// Exit codes reported by `n8n-webhook`.
pub mod exit_code {
    use std::process::ExitCode;

    /// The webhook answered (or the template was written).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Exit code 1: the request could not be built from the given settings.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Exit code 2: transport failure, completion timeout or an undecodable reply.
    ///
    /// `ExitCode::from` is not `const`, hence the function.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Maps a failed run to its exit code.
///
/// Problems found while assembling the request (bad header names, missing
/// credentials) are configuration errors even though they surface at runtime.
pub fn exit_code_for(error: &RunError) -> std::process::ExitCode {
    if error.is_configuration() {
        exit_code::CONFIG_ERROR
    } else {
        exit_code::runtime_error()
    }
}

/// Returns a remediation hint for configuration errors that have an obvious fix.
pub fn config_hint(error: &ConfigError) -> Option<&'static str> {
    const INIT: &str = "Run 'n8n-webhook init' to generate a configuration template.";

    match error {
        ConfigError::MissingRequired { field: f, .. } if *f == field::URI => Some(INIT),
        ConfigError::FileRead { .. } => Some(INIT),
        ConfigError::InvalidBasicCredentials => {
            Some("Pass basic credentials as --basic <username>:<password>.")
        }
        ConfigError::InvalidPair { field: f, .. } if *f == field::QUERY => {
            Some("Query parameters are written as --query <name>=<value>.")
        }
        ConfigError::InvalidPair { field: f, .. } if *f == field::AUTH_HEADER => {
            Some("Header authentication is written as --auth-header <name>=<value>.")
        }
        ConfigError::InvalidPair { .. } => {
            Some("Headers are written as --header <name>=<value> or <name>:<value>.")
        }
        _ => None,
    }
}

/// Prints the hint for `error`, if any, to stderr.
pub fn print_config_hint(error: &ConfigError) {
    if let Some(hint) = config_hint(error) {
        eprintln!("\n{hint}");
    }
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` overrides the level chosen by `--verbose`. Output goes to stderr;
/// stdout is reserved for the JSON outcome.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
