//! Error taxonomy for a webhook invocation.
//!
//! Every failure of [`TriggerWorkflow::run`](crate::TriggerWorkflow::run) is one
//! of the [`Error`] variants. None of them are retried inside the crate.

use std::time::Duration;

use thiserror::Error;

use crate::storage::StorageError;
use crate::webhook::{DecodeError, HttpError};

/// Invalid invocation input, detected before any network or storage I/O.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// An inline body and an external content reference were both supplied.
    #[error("cannot set both a structured body and a file reference")]
    ConflictingBodySources,

    /// A required field is missing or empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// An authentication variant is missing one of its fields.
    #[error("authentication type '{auth_type}' requires field '{field}'")]
    MissingAuthField {
        /// Discriminator of the selected variant
        auth_type: &'static str,
        /// Name of the missing field
        field: &'static str,
    },

    /// An authentication field has the wrong shape (e.g. a number where a string is expected).
    #[error("authentication field '{field}' must be {expected}")]
    InvalidAuthField {
        /// Name of the offending field
        field: String,
        /// Description of the expected shape
        expected: &'static str,
    },

    /// The authentication discriminator names no known strategy.
    #[error("unknown authentication type '{0}': expected BasicAuth, HeaderAuth or JWTAuth, or omit 'type' and give a 'headers' table")]
    UnknownAuthType(String),

    /// The target URI could not be parsed.
    #[error("invalid URI '{uri}': {reason}")]
    InvalidUri {
        /// The URI as supplied
        uri: String,
        /// Parser message
        reason: String,
    },

    /// The HTTP method is not one of the supported kinds.
    #[error("unsupported HTTP method '{0}': expected GET, POST, PUT, PATCH, DELETE or HEAD")]
    InvalidMethod(String),

    /// The content type is not one of the supported kinds.
    #[error("unsupported content type '{0}': expected JSON, XML, TEXT or BINARY")]
    InvalidContentType(String),

    /// A header name is not a valid HTTP token.
    #[error("invalid header name '{name}': {reason}")]
    InvalidHeaderName {
        /// The header name as supplied
        name: String,
        /// Parser message
        reason: String,
    },

    /// A header value contains characters not allowed on the wire.
    #[error("invalid value for header '{name}': {reason}")]
    InvalidHeaderValue {
        /// The header the value belongs to
        name: String,
        /// Parser message
        reason: String,
    },

    /// A query parameter value is not a scalar.
    #[error("query parameter '{0}' must be a string, number or boolean")]
    NonScalarQueryParameter(String),

    /// The inline payload could not be serialized as JSON.
    #[error("failed to serialize request body: {0}")]
    BodySerialization(#[source] serde_json::Error),
}

/// Terminal error of one webhook invocation.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid input; nothing was sent.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// The transport failed (connection, DNS, TLS or request timeout).
    #[error("Transport error: {0}")]
    Transport(#[from] HttpError),

    /// The workflow never answered with a terminal status while polling.
    #[error(
        "Workflow did not complete within {}s ({attempts} requests sent)",
        timeout.as_secs_f64()
    )]
    Timeout {
        /// Number of requests dispatched, including the initial one
        attempts: u32,
        /// The overall timeout budget
        timeout: Duration,
    },

    /// The response declared JSON but its body is not valid JSON.
    #[error("Decoding error: {0}")]
    Decoding(#[from] DecodeError),

    /// The external content reference could not be read.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl Error {
    /// Returns true if the error was raised before any I/O took place.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
