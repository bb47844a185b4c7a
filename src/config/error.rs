//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

use crate::error::ConfigurationError;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Missing required field that must be provided by CLI or config file.
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired {
        /// Name of the missing field
        field: &'static str,
        /// Hint for how to provide the value
        hint: &'static str,
    },

    /// Invalid duration value (zero or too large).
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// A `Key=Value` argument could not be split.
    #[error("Invalid {field} '{value}': expected 'Key=Value'")]
    InvalidPair {
        /// Name of the option
        field: &'static str,
        /// The raw argument
        value: String,
    },

    /// `--basic` was not in `USER:PASS` form.
    #[error("Invalid basic credentials: expected 'USER:PASS'")]
    InvalidBasicCredentials,

    /// The inline body is not a JSON object.
    #[error("Invalid body: {reason}")]
    InvalidBody {
        /// Reason for invalidity
        reason: String,
    },

    /// The values parsed but do not describe a valid invocation.
    #[error(transparent)]
    Invalid(#[from] ConfigurationError),
}

/// Well-known field names for `MissingRequired` errors.
///
/// Use these constants for compile-time safety when matching field names.
pub mod field {
    /// The webhook URI field.
    pub const URI: &str = "uri";
    /// The poll frequency field.
    pub const POLL_FREQUENCY: &str = "poll_frequency";
    /// The request timeout field.
    pub const REQUEST_TIMEOUT: &str = "request_timeout";
    /// The connect timeout field.
    pub const CONNECT_TIMEOUT: &str = "connect_timeout";
    /// The per-request HTTP timeout field.
    pub const HTTP_TIMEOUT: &str = "http.timeout";
    /// The query parameter option.
    pub const QUERY: &str = "query parameter";
    /// The header option.
    pub const HEADER: &str = "header";
    /// The header authentication option.
    pub const AUTH_HEADER: &str = "auth header";
}

impl ConfigError {
    /// Creates a `MissingRequired` error for a required field.
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}
