//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// n8n-webhook: trigger an n8n workflow through its webhook
///
/// Sends one request to a webhook URL, optionally waits for the workflow
/// to finish, and prints the normalized response as JSON on stdout.
#[derive(Debug, Parser)]
#[command(name = "n8n-webhook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Webhook URL (required unless set in the config file)
    #[arg(long)]
    pub uri: Option<String>,

    /// HTTP method (GET, POST, PUT, PATCH, DELETE, HEAD)
    #[arg(long)]
    pub method: Option<String>,

    /// Content type of a file-backed body (JSON, XML, TEXT, BINARY)
    #[arg(long = "content-type")]
    pub content_type: Option<String>,

    /// Inline JSON object sent as the request body
    #[arg(long, value_name = "JSON", conflicts_with = "from")]
    pub body: Option<String>,

    /// File whose content is sent as the request body
    #[arg(long, value_name = "PATH")]
    pub from: Option<String>,

    /// Query parameter in 'Key=Value' format (can be specified multiple times)
    #[arg(long = "query", value_name = "K=V")]
    pub query: Vec<String>,

    /// HTTP header in 'Key=Value' or 'Key: Value' format (can be specified multiple times)
    #[arg(long = "header", value_name = "K=V")]
    pub headers: Vec<String>,

    /// Wait for the workflow to answer with 200 OK
    #[arg(long, value_name = "BOOL")]
    pub wait: Option<bool>,

    /// Seconds between two polls while waiting
    #[arg(long = "poll-frequency", value_name = "SECS")]
    pub poll_frequency: Option<u64>,

    /// Seconds to keep polling before giving up
    #[arg(long = "request-timeout", value_name = "SECS")]
    pub request_timeout: Option<u64>,

    /// Connect timeout of the HTTP client in seconds
    #[arg(long = "connect-timeout", value_name = "SECS")]
    pub connect_timeout: Option<u64>,

    /// Bearer token (JWT authentication)
    #[arg(long, value_name = "TOKEN", conflicts_with_all = ["basic", "auth_header"])]
    pub bearer: Option<String>,

    /// Basic authentication credentials
    #[arg(long, value_name = "USER:PASS", conflicts_with = "auth_header")]
    pub basic: Option<String>,

    /// Header authentication in 'Name=Value' format
    #[arg(long = "auth-header", value_name = "NAME=VALUE")]
    pub auth_header: Option<String>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for n8n-webhook
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "n8n-webhook.toml")]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if any authentication flag was given.
    #[must_use]
    pub const fn has_auth(&self) -> bool {
        self.bearer.is_some() || self.basic.is_some() || self.auth_header.is_some()
    }
}
