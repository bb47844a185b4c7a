//! `n8n-webhook`: trigger an n8n workflow through its webhook and print the
//! normalized outcome as JSON on stdout.

use std::path::Path;
use std::process::ExitCode;

use n8n_webhook::config::{Cli, Command, ValidatedConfig, write_default_config};

mod app;
mod run;

use app::{exit_code, exit_code_for, print_config_hint, setup_tracing};

#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match &cli.command {
        Some(Command::Init { output }) => init(output),
        None => match ValidatedConfig::load(&cli) {
            Ok(config) => trigger(config),
            Err(e) => {
                eprintln!("Configuration error: {e}");
                print_config_hint(&e);
                exit_code::CONFIG_ERROR
            }
        },
    }
}

/// Writes the commented configuration template to `output`.
fn init(output: &Path) -> ExitCode {
    if let Err(e) = write_default_config(output) {
        eprintln!("Error: {e}");
        return exit_code::CONFIG_ERROR;
    }
    println!("Configuration template written to: {}", output.display());
    exit_code::SUCCESS
}

/// Sends the configured request on a fresh runtime and reports the outcome.
#[cfg(not(tarpaulin_include))]
fn trigger(config: ValidatedConfig) -> ExitCode {
    setup_tracing(config.verbose);
    tracing::info!("{config}");

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start async runtime: {e}");
            return exit_code::runtime_error();
        }
    };

    runtime
        .block_on(run::execute(config))
        .map_or_else(
            |e| {
                tracing::error!("Invocation failed: {e}");
                exit_code_for(&e)
            },
            |()| exit_code::SUCCESS,
        )
}
