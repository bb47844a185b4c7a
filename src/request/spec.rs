//! Caller-facing request description.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};
use url::Url;

use crate::error::ConfigurationError;
use crate::storage::ContentRef;

/// HTTP methods accepted by n8n webhook nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethodKind {
    /// GET
    Get,
    /// POST
    #[default]
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
    /// HEAD
    Head,
}

impl HttpMethodKind {
    /// Returns the wire method.
    #[must_use]
    pub const fn as_method(self) -> http::Method {
        match self {
            Self::Get => http::Method::GET,
            Self::Post => http::Method::POST,
            Self::Put => http::Method::PUT,
            Self::Patch => http::Method::PATCH,
            Self::Delete => http::Method::DELETE,
            Self::Head => http::Method::HEAD,
        }
    }

    /// Returns the upper-case method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
        }
    }
}

impl fmt::Display for HttpMethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethodKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            "HEAD" => Ok(Self::Head),
            _ => Err(ConfigurationError::InvalidMethod(s.to_string())),
        }
    }
}

/// How a file-backed body is read and labelled.
///
/// Has no effect on inline payloads, which are always sent as JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentType {
    /// JSON document, sent as text
    Json,
    /// XML document, sent as text
    Xml,
    /// Plain text
    Text,
    /// Raw bytes, sent unchanged
    #[default]
    Binary,
}

impl ContentType {
    /// MIME type sent in the `Content-Type` header.
    #[must_use]
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Xml => "application/xml",
            Self::Text => "text/plain",
            Self::Binary => "application/octet-stream",
        }
    }

    /// Returns true if the content is read as text rather than raw bytes.
    #[must_use]
    pub const fn is_text(self) -> bool {
        !matches!(self, Self::Binary)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Json => "JSON",
            Self::Xml => "XML",
            Self::Text => "TEXT",
            Self::Binary => "BINARY",
        };
        f.write_str(name)
    }
}

impl FromStr for ContentType {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "JSON" => Ok(Self::Json),
            "XML" => Ok(Self::Xml),
            "TEXT" => Ok(Self::Text),
            "BINARY" => Ok(Self::Binary),
            _ => Err(ConfigurationError::InvalidContentType(s.to_string())),
        }
    }
}

/// Where the request body comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BodySource {
    /// No body.
    #[default]
    Absent,
    /// Structured payload, serialized as JSON.
    Inline(Map<String, Value>),
    /// Content read from the storage collaborator.
    External(ContentRef),
}

/// Immutable description of one webhook request.
///
/// Built through [`RequestSpec::builder`], which rejects a missing URI or
/// method and an inline body combined with an external reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    uri: Url,
    method: HttpMethodKind,
    query_parameters: Vec<(String, String)>,
    headers: BTreeMap<String, String>,
    body: BodySource,
    content_type: ContentType,
}

impl RequestSpec {
    /// Starts building a request description.
    #[must_use]
    pub fn builder() -> RequestSpecBuilder {
        RequestSpecBuilder::default()
    }

    /// Base URI, without the query parameters.
    #[must_use]
    pub const fn uri(&self) -> &Url {
        &self.uri
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> HttpMethodKind {
        self.method
    }

    /// Query parameters in insertion order, already rendered as text.
    #[must_use]
    pub fn query_parameters(&self) -> &[(String, String)] {
        &self.query_parameters
    }

    /// Caller-supplied headers.
    #[must_use]
    pub const fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Body source.
    #[must_use]
    pub const fn body(&self) -> &BodySource {
        &self.body
    }

    /// Content type used for file-backed bodies.
    #[must_use]
    pub const fn content_type(&self) -> ContentType {
        self.content_type
    }
}

/// Builder for [`RequestSpec`].
#[derive(Debug, Clone, Default)]
pub struct RequestSpecBuilder {
    uri: Option<String>,
    method: Option<HttpMethodKind>,
    query_parameters: Map<String, Value>,
    headers: BTreeMap<String, String>,
    body: Option<Map<String, Value>>,
    from: Option<ContentRef>,
    content_type: ContentType,
}

impl RequestSpecBuilder {
    /// Sets the webhook URI.
    #[must_use]
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Sets the HTTP method.
    #[must_use]
    pub const fn method(mut self, method: HttpMethodKind) -> Self {
        self.method = Some(method);
        self
    }

    /// Sets the query parameters. Values must be scalars.
    #[must_use]
    pub fn query_parameters(mut self, parameters: Map<String, Value>) -> Self {
        self.query_parameters = parameters;
        self
    }

    /// Adds one query parameter after the existing ones.
    #[must_use]
    pub fn query_parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query_parameters.insert(name.into(), value.into());
        self
    }

    /// Sets the caller headers.
    #[must_use]
    pub fn headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    /// Adds one caller header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets the inline JSON payload. An empty map means no payload.
    #[must_use]
    pub fn body(mut self, body: Map<String, Value>) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the external content reference.
    #[must_use]
    pub fn from(mut self, reference: impl Into<ContentRef>) -> Self {
        self.from = Some(reference.into());
        self
    }

    /// Sets the content type of a file-backed body.
    #[must_use]
    pub const fn content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    /// Validates and builds the request description.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] when:
    /// - the URI or method is missing, or the URI does not parse
    /// - both an inline payload and an external reference are set
    /// - a query parameter value is not a scalar
    pub fn build(self) -> Result<RequestSpec, ConfigurationError> {
        let raw_uri = self
            .uri
            .filter(|uri| !uri.trim().is_empty())
            .ok_or(ConfigurationError::MissingField("uri"))?;
        let method = self
            .method
            .ok_or(ConfigurationError::MissingField("method"))?;

        let body = match (self.body.filter(|b| !b.is_empty()), self.from) {
            (Some(_), Some(_)) => return Err(ConfigurationError::ConflictingBodySources),
            (Some(payload), None) => BodySource::Inline(payload),
            (None, Some(reference)) => BodySource::External(reference),
            (None, None) => BodySource::Absent,
        };

        let uri = Url::parse(raw_uri.trim()).map_err(|e| ConfigurationError::InvalidUri {
            uri: raw_uri.clone(),
            reason: e.to_string(),
        })?;

        let query_parameters = self
            .query_parameters
            .into_iter()
            .map(|(name, value)| match scalar_text(&value) {
                Some(text) => Ok((name, text)),
                None => Err(ConfigurationError::NonScalarQueryParameter(name)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RequestSpec {
            uri,
            method,
            query_parameters,
            headers: self.headers,
            body,
            content_type: self.content_type,
        })
    }
}

/// Renders a scalar JSON value as text; `None` for null, arrays and objects.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
