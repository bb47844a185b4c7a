//! Production HTTP client implementation using reqwest.

use std::time::Duration;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Production HTTP client using reqwest.
///
/// This is a thin wrapper around `reqwest::Client` that implements
/// the [`HttpClient`] trait. It inherits reqwest's connection pooling and
/// TLS configuration.
///
/// # Example
///
/// ```no_run
/// use n8n_webhook::webhook::{ReqwestClient, HttpClient, HttpRequest};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestClient::new();
/// let url = Url::parse("https://n8n.example.com/webhook/my-path")?;
/// let request = HttpRequest::new(http::Method::POST, url).with_body(b"hello".to_vec());
/// let response = client.request(request).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a new HTTP client with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
        }
    }

    /// Creates an HTTP client with a connect timeout and an optional
    /// per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Connection`] if the TLS backend cannot be initialized.
    pub fn with_timeouts(
        connect_timeout: Duration,
        request_timeout: Option<Duration>,
    ) -> Result<Self, HttpError> {
        let mut builder = reqwest::Client::builder().connect_timeout(connect_timeout);

        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }

        let inner = builder
            .build()
            .map_err(|e| HttpError::Connection(Box::new(e)))?;

        Ok(Self { inner })
    }

    /// Creates an HTTP client from an existing reqwest client.
    ///
    /// Useful when you need custom configuration (proxies, TLS, etc.).
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { inner: client }
    }

    async fn send(&self, req: HttpRequest) -> Result<reqwest::Response, HttpError> {
        let mut builder = self.inner.request(req.method, req.url.as_str());

        for (name, value) in &req.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        builder.send().await.map_err(map_error)
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let response = self.send(req).await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(map_error)?.to_vec();

        Ok(HttpResponse::new(status, headers, body))
    }

    async fn request_discarding_body(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let response = self.send(req).await?;

        Ok(HttpResponse::new(
            response.status(),
            response.headers().clone(),
            Vec::new(),
        ))
    }
}

fn map_error(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else if e.is_builder() {
        HttpError::InvalidUrl(e.to_string())
    } else {
        HttpError::Connection(Box::new(e))
    }
}
