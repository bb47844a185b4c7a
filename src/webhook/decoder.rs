//! Content-negotiated response decoding.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Serialize, Serializer};

use super::{DecodeError, InvocationResult};

const JSON_MEDIA_TYPE: &str = "application/json";

/// Decoded response body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    /// Body decoded as UTF-8 text.
    Text(String),
    /// Body parsed as JSON because the response declared `application/json`.
    Json(serde_json::Value),
}

/// Normalized outcome of a webhook invocation.
///
/// Serializes as `{statusCode, body, headers, uri, attempts, durationMs}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Output {
    /// Raw status code of the last response, whatever its class.
    pub status_code: u16,
    /// `None` when the body was never read.
    pub body: Option<ResponseBody>,
    /// Response headers, each name mapped to its values in arrival order.
    pub headers: BTreeMap<String, Vec<String>>,
    /// Final request URI, query included. Filled in by the caller that
    /// knows which request was sent.
    pub uri: Option<String>,
    /// Number of requests sent.
    pub attempts: u32,
    /// Monotonic time from the first dispatch to the last response.
    #[serde(rename = "durationMs", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl Output {
    /// Returns the body as text, if it was decoded as text.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            Some(ResponseBody::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Returns the body as JSON, if it was decoded as JSON.
    #[must_use]
    pub const fn json(&self) -> Option<&serde_json::Value> {
        match &self.body {
            Some(ResponseBody::Json(value)) => Some(value),
            _ => None,
        }
    }
}

/// Decodes a raw invocation result into an [`Output`].
///
/// - no body read → `body: None`
/// - declared type contains `application/json` (any case) → parsed JSON
/// - anything else → UTF-8 text, invalid sequences replaced
///
/// The status code never causes a failure.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidJson`] if the response declared JSON but
/// the body does not parse.
pub fn decode(result: InvocationResult) -> Result<Output, DecodeError> {
    let body = match result.body.as_deref() {
        None => None,
        Some(raw) if declares_json(result.content_type()) => {
            Some(ResponseBody::Json(serde_json::from_slice(raw)?))
        }
        Some(raw) => Some(ResponseBody::Text(String::from_utf8_lossy(raw).into_owned())),
    };

    Ok(Output {
        status_code: result.status.as_u16(),
        body,
        headers: header_values(&result.headers),
        uri: None,
        attempts: result.attempts,
        duration: result.elapsed,
    })
}

fn declares_json(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|value| value.to_ascii_lowercase().contains(JSON_MEDIA_TYPE))
}

fn header_values(headers: &http::HeaderMap) -> BTreeMap<String, Vec<String>> {
    let mut values: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in headers {
        values
            .entry(name.as_str().to_owned())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    values
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}
