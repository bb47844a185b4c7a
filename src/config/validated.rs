//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde_json::{Map, Value};

use crate::auth::AuthSpec;
use crate::request::{BodySource, ContentType, HttpMethodKind, RequestSpec};
use crate::webhook::CompletionPolicy;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// The request to send
    pub request: RequestSpec,

    /// Authentication strategy
    pub auth: AuthSpec,

    /// Wait and polling behaviour
    pub completion: CompletionPolicy,

    /// Connect timeout of the HTTP client
    pub connect_timeout: Duration,

    /// Per-request timeout of the HTTP client, if any
    pub http_timeout: Option<Duration>,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = match self.request.body() {
            BodySource::Absent => "none".to_string(),
            BodySource::Inline(payload) => format!("inline ({} fields)", payload.len()),
            BodySource::External(reference) => {
                format!("{reference} as {}", self.request.content_type())
            }
        };

        write!(
            f,
            "Config {{ uri: {}, method: {}, body: {}, query: {}, headers: {}, auth: {}, \
             wait: {}, poll_frequency: {}s, request_timeout: {}s, connect_timeout: {}s }}",
            self.request.uri(),
            self.request.method(),
            body,
            self.request.query_parameters().len(),
            self.request.headers().len(),
            self.auth.kind(),
            self.completion.wait,
            self.completion.poll_interval.as_secs(),
            self.completion.overall_timeout.as_secs(),
            self.connect_timeout.as_secs(),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The URI is missing or invalid
    /// - Method or content type is unknown
    /// - Both a body and a file are configured
    /// - A `Key=Value` argument or the inline body is malformed
    /// - The authentication table is invalid
    /// - Duration values are zero
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let request = Self::build_request(cli, toml)?;
        let auth = Self::resolve_auth(cli, toml)?;
        let completion = Self::build_completion(cli, toml)?;

        let http = toml.map(|t| &t.http);
        let connect_timeout = non_zero(
            field::CONNECT_TIMEOUT,
            cli.connect_timeout
                .or_else(|| http.and_then(|h| h.connect_timeout))
                .unwrap_or(defaults::CONNECT_TIMEOUT_SECS),
        )?;
        let http_timeout = http
            .and_then(|h| h.timeout)
            .map(|secs| non_zero(field::HTTP_TIMEOUT, secs))
            .transpose()?;

        Ok(Self {
            request,
            auth,
            completion,
            connect_timeout,
            http_timeout,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn build_request(cli: &Cli, toml: Option<&TomlConfig>) -> Result<RequestSpec, ConfigError> {
        let webhook = toml.map(|t| &t.webhook);

        let uri = cli
            .uri
            .as_deref()
            .or_else(|| webhook.and_then(|w| w.uri.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(field::URI, "Use --uri or set webhook.uri in config file")
            })?;

        // Priority: CLI explicit > TOML > default
        let method: HttpMethodKind = cli
            .method
            .as_deref()
            .or_else(|| webhook.and_then(|w| w.method.as_deref()))
            .unwrap_or(defaults::METHOD)
            .parse()?;

        let content_type = cli
            .content_type
            .as_deref()
            .or_else(|| webhook.and_then(|w| w.content_type.as_deref()))
            .map(str::parse::<ContentType>)
            .transpose()?
            .unwrap_or(defaults::CONTENT_TYPE);

        let mut builder = RequestSpec::builder()
            .uri(uri)
            .method(method)
            .content_type(content_type)
            .query_parameters(Self::merge_query(cli, toml)?)
            .headers(Self::merge_headers(cli, toml)?);

        let body = match cli.body.as_deref() {
            Some(raw) => Some(parse_body(raw)?),
            None => webhook.and_then(|w| w.body.clone()),
        };
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let from = cli
            .from
            .as_deref()
            .or_else(|| webhook.and_then(|w| w.from.as_deref()));
        if let Some(reference) = from {
            builder = builder.from(reference);
        }

        Ok(builder.build()?)
    }

    fn merge_query(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Map<String, Value>, ConfigError> {
        // TOML first, CLI overrides per key
        let mut query = toml.map(|t| t.webhook.query.clone()).unwrap_or_default();

        for pair in &cli.query {
            let (name, value) = split_pair(field::QUERY, pair)?;
            query.insert(name, Value::String(value));
        }

        Ok(query)
    }

    fn merge_headers(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<BTreeMap<String, String>, ConfigError> {
        let mut headers = toml.map(|t| t.webhook.headers.clone()).unwrap_or_default();

        for header_str in &cli.headers {
            let (name, value) = parse_header_string(header_str)?;
            // Header names are case-insensitive; drop any TOML spelling first
            headers.retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
            headers.insert(name, value);
        }

        Ok(headers)
    }

    fn resolve_auth(cli: &Cli, toml: Option<&TomlConfig>) -> Result<AuthSpec, ConfigError> {
        // CLI flags replace the TOML table entirely
        if !cli.has_auth() {
            return match toml.and_then(|t| t.authentication.as_ref()) {
                Some(table) => Ok(AuthSpec::from_config(table)?),
                None => Ok(AuthSpec::None),
            };
        }

        if let Some(token) = &cli.bearer {
            return Ok(AuthSpec::jwt(token.as_str()));
        }

        if let Some(credentials) = &cli.basic {
            let (username, password) = credentials
                .split_once(':')
                .ok_or(ConfigError::InvalidBasicCredentials)?;
            return Ok(AuthSpec::basic(username, password));
        }

        match &cli.auth_header {
            Some(pair) => {
                let (name, value) = split_pair(field::AUTH_HEADER, pair)?;
                Ok(AuthSpec::header(name, value))
            }
            None => Ok(AuthSpec::None),
        }
    }

    fn build_completion(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<CompletionPolicy, ConfigError> {
        let completion = toml.map(|t| &t.completion);

        let wait = cli
            .wait
            .or_else(|| completion.and_then(|c| c.wait))
            .unwrap_or(defaults::WAIT);

        let poll_frequency = non_zero(
            field::POLL_FREQUENCY,
            cli.poll_frequency
                .or_else(|| completion.and_then(|c| c.poll_frequency))
                .unwrap_or(defaults::POLL_FREQUENCY_SECS),
        )?;

        let request_timeout = non_zero(
            field::REQUEST_TIMEOUT,
            cli.request_timeout
                .or_else(|| completion.and_then(|c| c.request_timeout))
                .unwrap_or(defaults::REQUEST_TIMEOUT_SECS),
        )?;

        Ok(CompletionPolicy::new()
            .with_wait(wait)
            .with_poll_interval(poll_frequency)
            .with_overall_timeout(request_timeout))
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn non_zero(field: &'static str, seconds: u64) -> Result<Duration, ConfigError> {
    if seconds == 0 {
        return Err(ConfigError::InvalidDuration {
            field,
            reason: "must be greater than 0".to_string(),
        });
    }

    Ok(Duration::from_secs(seconds))
}

fn split_pair(field: &'static str, s: &str) -> Result<(String, String), ConfigError> {
    match s.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(ConfigError::InvalidPair {
            field,
            value: s.to_string(),
        }),
    }
}

fn parse_header_string(s: &str) -> Result<(String, String), ConfigError> {
    // "Key=Value" or "Key: Value", whichever separator comes first
    match s.find(['=', ':']) {
        Some(at) if !s[..at].trim().is_empty() => {
            Ok((s[..at].trim().to_string(), s[at + 1..].trim().to_string()))
        }
        _ => Err(ConfigError::InvalidPair {
            field: field::HEADER,
            value: s.to_string(),
        }),
    }
}

fn parse_body(raw: &str) -> Result<Map<String, Value>, ConfigError> {
    match serde_json::from_str(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ConfigError::InvalidBody {
            reason: "expected a JSON object".to_string(),
        }),
        Err(e) => Err(ConfigError::InvalidBody {
            reason: e.to_string(),
        }),
    }
}
