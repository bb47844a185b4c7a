//! Assembly of a [`RequestSpec`] and an [`AuthSpec`] into an [`HttpRequest`].

use http::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use http::HeaderMap;
use url::Url;

use crate::auth::AuthSpec;
use crate::error::{ConfigurationError, Error};
use crate::storage::ContentStore;
use crate::webhook::HttpRequest;

use super::{BodySource, RequestSpec, encode};

const JSON_MIME: &str = "application/json";

/// Turns request descriptions into dispatchable requests.
///
/// Assembly performs no network call. The only I/O is a single
/// [`ContentStore::read`] when the body comes from an external reference, and
/// it happens after every header and credential has been validated.
///
/// Header precedence, lowest to highest:
/// 1. `Content-Type` derived from the body
/// 2. caller headers
/// 3. authentication headers
///
/// # Example
///
/// ```
/// use n8n_webhook::auth::AuthSpec;
/// use n8n_webhook::request::{HttpMethodKind, RequestAssembler, RequestSpec};
/// use n8n_webhook::storage::FileContentStore;
///
/// let spec = RequestSpec::builder()
///     .uri("https://n8n.example.com/webhook/test")
///     .method(HttpMethodKind::Post)
///     .query_parameter("source", "docs")
///     .build()?;
///
/// let assembler = RequestAssembler::new(FileContentStore::new());
/// let request = assembler.assemble(&spec, &AuthSpec::jwt("token"))?;
///
/// assert_eq!(request.url.as_str(), "https://n8n.example.com/webhook/test?source=docs");
/// assert_eq!(request.headers["authorization"], "Bearer token");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct RequestAssembler<S> {
    store: S,
}

impl<S> RequestAssembler<S> {
    /// Creates an assembler reading external content from `store`.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the content store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }
}

impl<S: ContentStore> RequestAssembler<S> {
    /// Assembles one request.
    ///
    /// The inputs are only read; a fresh header map and URL are built.
    ///
    /// # Errors
    ///
    /// - [`Error::Configuration`] for incomplete credentials, invalid header
    ///   names or values, or an unserializable payload
    /// - [`Error::Storage`] when the external reference cannot be read
    pub fn assemble(&self, spec: &RequestSpec, auth: &AuthSpec) -> Result<HttpRequest, Error> {
        auth.validate()?;

        let url = build_url(spec);
        let mut headers = build_headers(spec, auth)?;
        let body = self.build_body(spec)?;

        let mut request = HttpRequest::new(spec.method().as_method(), url);

        if let Some((content_type, bytes)) = body {
            headers
                .entry(CONTENT_TYPE)
                .or_insert(HeaderValue::from_static(content_type));
            request = request.with_body(bytes);
        }

        request.headers = headers;
        Ok(request)
    }

    fn build_body(&self, spec: &RequestSpec) -> Result<Option<(&'static str, Vec<u8>)>, Error> {
        match spec.body() {
            BodySource::Absent => Ok(None),
            BodySource::Inline(payload) => {
                let bytes =
                    serde_json::to_vec(payload).map_err(ConfigurationError::BodySerialization)?;
                Ok(Some((JSON_MIME, bytes)))
            }
            BodySource::External(reference) => {
                let source = self.store.read(reference)?;
                let encoded = encode(spec.content_type(), source);
                Ok(Some((encoded.content_type, encoded.into_bytes())))
            }
        }
    }
}

fn build_url(spec: &RequestSpec) -> Url {
    let mut url = spec.uri().clone();

    if !spec.query_parameters().is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (name, value) in spec.query_parameters() {
            pairs.append_pair(name, value);
        }
    }

    url
}

fn build_headers(spec: &RequestSpec, auth: &AuthSpec) -> Result<HeaderMap, ConfigurationError> {
    let mut headers = HeaderMap::new();

    for (name, value) in spec.headers() {
        headers.insert(parse_header_name(name)?, parse_header_value(name, value)?);
    }

    // Inserted last so credentials replace caller headers of the same name
    for (name, value) in &auth.resolve() {
        headers.insert(parse_header_name(name)?, parse_header_value(name, value)?);
    }

    Ok(headers)
}

fn parse_header_name(name: &str) -> Result<HeaderName, ConfigurationError> {
    name.parse::<HeaderName>()
        .map_err(|e| ConfigurationError::InvalidHeaderName {
            name: name.to_string(),
            reason: e.to_string(),
        })
}

fn parse_header_value(name: &str, value: &str) -> Result<HeaderValue, ConfigurationError> {
    HeaderValue::from_str(value).map_err(|e| ConfigurationError::InvalidHeaderValue {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
