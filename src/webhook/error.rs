//! Error types for HTTP operations and response decoding.

use thiserror::Error;

/// Error type for HTTP operations.
///
/// Describes what went wrong at the transport level. The invoker never
/// retries these; a retry policy, if any, belongs to the client.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// TLS handshake failures and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// The server did not respond within the client's configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built from the given URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Error type for response decoding.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The response declared a JSON content type but the body does not parse.
    #[error("response declared JSON but the body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
