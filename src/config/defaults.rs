//! Default values for configuration options.

use crate::request::ContentType;

/// Default HTTP method for webhook requests.
pub const METHOD: &str = "POST";

/// Default content type of a file-backed body.
pub const CONTENT_TYPE: ContentType = ContentType::Binary;

/// Whether to wait for the workflow to finish by default.
pub const WAIT: bool = true;

/// Default delay between two polls in seconds.
pub const POLL_FREQUENCY_SECS: u64 = 2;

/// Default polling budget in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 300;

/// Default connect timeout of the HTTP client in seconds.
pub const CONNECT_TIMEOUT_SECS: u64 = 30;
