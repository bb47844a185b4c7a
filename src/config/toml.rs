//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Webhook request section
    #[serde(default)]
    pub webhook: WebhookSection,

    /// Authentication table, decoded by its `type` discriminator
    pub authentication: Option<Map<String, Value>>,

    /// Completion (wait and polling) section
    #[serde(default)]
    pub completion: CompletionSection,

    /// HTTP client section
    #[serde(default)]
    pub http: HttpSection,
}

/// Webhook request section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookSection {
    /// Webhook URI
    pub uri: Option<String>,

    /// HTTP method (default: POST)
    pub method: Option<String>,

    /// Content type of a file-backed body (default: BINARY)
    pub content_type: Option<String>,

    /// File whose content is sent as the body
    pub from: Option<String>,

    /// Inline body, sent as JSON
    pub body: Option<Map<String, Value>>,

    /// Query parameters, in file order
    #[serde(default)]
    pub query: Map<String, Value>,

    /// HTTP headers as key-value pairs
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

/// Completion section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompletionSection {
    /// Wait for a `200 OK` (default: true)
    pub wait: Option<bool>,

    /// Seconds between polls
    pub poll_frequency: Option<u64>,

    /// Polling budget in seconds
    pub request_timeout: Option<u64>,
}

/// HTTP client section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpSection {
    /// Connect timeout in seconds
    pub connect_timeout: Option<u64>,

    /// Per-request timeout in seconds (unset: no limit)
    pub timeout: Option<u64>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# n8n-webhook configuration file

[webhook]
# Webhook URI (required, can be overridden by --uri)
# uri = "https://n8n.example.com/webhook/my-workflow"

# HTTP method: GET, POST, PUT, PATCH, DELETE or HEAD (default: POST)
# method = "POST"

# Content type of a file-backed body: JSON, XML, TEXT or BINARY (default: BINARY)
# content_type = "JSON"

# File sent as the body. Cannot be combined with [webhook.body].
# from = "~/payloads/order.json"

# Inline body, sent as JSON
# [webhook.body]
# orderId = 42

# Query parameters (CLI --query values are merged over these)
# [webhook.query]
# tenant = "acme"

# HTTP headers (CLI --header values are merged over these)
# [webhook.headers]
# X-Custom-Header = "value"

# Authentication (replaced entirely by --bearer, --basic or --auth-header)
# [authentication]
# type = "BasicAuth"
# username = "user"
# password = "secret"
#
# type = "HeaderAuth" takes name and value, type = "JWTAuth" takes jwt.
# Without a type, a [authentication.headers] table is sent as-is.

[completion]
# Wait for the workflow to answer 200 OK (default: true)
# wait = true

# Seconds between polls while waiting (default: 2)
# poll_frequency = 2

# Seconds to keep polling before giving up (default: 300)
# request_timeout = 300

[http]
# Connect timeout in seconds (default: 30)
# connect_timeout = 30

# Per-request timeout in seconds (default: none)
# timeout = 60
"#
    .to_string()
}
