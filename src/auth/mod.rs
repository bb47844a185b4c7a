//! Authentication strategies for outgoing webhook requests.
//!
//! An [`AuthSpec`] is a closed set of strategies. Each one resolves to the
//! headers it contributes to a request; the request assembler merges them last
//! so that credentials are never overridden by caller headers.
//!
//! # Configuration form
//!
//! Strategies are decoded once, from an untyped mapping, by
//! [`AuthSpec::from_config`]. The `type` field selects the variant:
//!
//! | `type`       | fields                 |
//! |--------------|------------------------|
//! | `BasicAuth`  | `username`, `password` |
//! | `HeaderAuth` | `name`, `value`        |
//! | `JWTAuth`    | `jwt`                  |
//! | *(absent)*   | `headers` (table)      |
//!
//! An empty mapping means no authentication.

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Map, Value};

use crate::error::ConfigurationError;
use crate::request::scalar_text;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

/// Discriminator of [`AuthSpec::Basic`].
pub const BASIC_AUTH: &str = "BasicAuth";
/// Discriminator of [`AuthSpec::HeaderAuth`].
pub const HEADER_AUTH: &str = "HeaderAuth";
/// Discriminator of [`AuthSpec::Jwt`].
pub const JWT_AUTH: &str = "JWTAuth";

const CUSTOM_AUTH: &str = "custom";

/// Header carrying Basic and bearer credentials.
pub const AUTHORIZATION: &str = "Authorization";

/// Authentication strategy for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthSpec {
    /// No credentials are sent.
    #[default]
    None,
    /// HTTP Basic authentication.
    Basic {
        /// User name
        username: String,
        /// Password (may be empty)
        password: String,
    },
    /// A single header sent verbatim.
    HeaderAuth {
        /// Header name (not checked against reserved names)
        name: String,
        /// Header value
        value: String,
    },
    /// Bearer token.
    Jwt {
        /// The encoded token
        token: String,
    },
    /// Arbitrary headers passed through unchanged.
    Custom {
        /// Header name to value
        headers: BTreeMap<String, String>,
    },
}

impl AuthSpec {
    /// Creates a Basic strategy.
    #[must_use]
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Creates a single-header strategy.
    #[must_use]
    pub fn header(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::HeaderAuth {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Creates a bearer-token strategy.
    #[must_use]
    pub fn jwt(token: impl Into<String>) -> Self {
        Self::Jwt {
            token: token.into(),
        }
    }

    /// Creates a pass-through strategy from `(name, value)` pairs.
    #[must_use]
    pub fn custom<I, K, V>(headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Custom {
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Short name of the active strategy, safe to log.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Basic { .. } => BASIC_AUTH,
            Self::HeaderAuth { .. } => HEADER_AUTH,
            Self::Jwt { .. } => JWT_AUTH,
            Self::Custom { .. } => CUSTOM_AUTH,
        }
    }

    /// Checks that every field the active strategy needs is present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingAuthField`] for an empty user name,
    /// header name or token.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let missing = match self {
            Self::Basic { username, .. } if username.is_empty() => Some("username"),
            Self::HeaderAuth { name, .. } if name.is_empty() => Some("name"),
            Self::Jwt { token } if token.is_empty() => Some("jwt"),
            _ => None,
        };

        match missing {
            Some(field) => Err(ConfigurationError::MissingAuthField {
                auth_type: self.kind(),
                field,
            }),
            None => Ok(()),
        }
    }

    /// Resolves the headers this strategy adds to a request.
    ///
    /// Pure and deterministic: identical specs always yield identical maps.
    #[must_use]
    pub fn resolve(&self) -> BTreeMap<String, String> {
        match self {
            Self::None => BTreeMap::new(),
            Self::Basic { username, password } => {
                let credentials = STANDARD.encode(format!("{username}:{password}"));
                BTreeMap::from([(
                    AUTHORIZATION.to_string(),
                    format!("Basic {credentials}"),
                )])
            }
            Self::HeaderAuth { name, value } => BTreeMap::from([(name.clone(), value.clone())]),
            Self::Jwt { token } => BTreeMap::from([(
                AUTHORIZATION.to_string(),
                format!("Bearer {token}"),
            )]),
            Self::Custom { headers } => headers.clone(),
        }
    }

    /// Decodes a strategy from its untyped configuration mapping.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] when the discriminator is unknown,
    /// a required field is missing, or a field has the wrong shape.
    pub fn from_config(config: &Map<String, Value>) -> Result<Self, ConfigurationError> {
        if config.is_empty() {
            return Ok(Self::None);
        }

        let kind = match config.get("type") {
            None | Some(Value::Null) => return custom_from_config(config),
            Some(Value::String(kind)) => kind.as_str(),
            Some(_) => {
                return Err(ConfigurationError::InvalidAuthField {
                    field: "type".to_string(),
                    expected: "a string",
                });
            }
        };

        let spec = match kind {
            BASIC_AUTH => Self::Basic {
                username: required(config, BASIC_AUTH, "username")?,
                password: required(config, BASIC_AUTH, "password")?,
            },
            HEADER_AUTH => Self::HeaderAuth {
                name: required(config, HEADER_AUTH, "name")?,
                value: required(config, HEADER_AUTH, "value")?,
            },
            JWT_AUTH => Self::Jwt {
                token: required(config, JWT_AUTH, "jwt")?,
            },
            other => return Err(ConfigurationError::UnknownAuthType(other.to_string())),
        };

        spec.validate()?;
        Ok(spec)
    }
}

fn custom_from_config(config: &Map<String, Value>) -> Result<AuthSpec, ConfigurationError> {
    let headers = match config.get("headers") {
        Some(Value::Object(headers)) => headers,
        Some(_) => {
            return Err(ConfigurationError::InvalidAuthField {
                field: "headers".to_string(),
                expected: "a table of header names to values",
            });
        }
        None => {
            return Err(ConfigurationError::MissingAuthField {
                auth_type: CUSTOM_AUTH,
                field: "headers",
            });
        }
    };

    let headers = headers
        .iter()
        .map(|(name, value)| {
            scalar_text(value)
                .map(|text| (name.clone(), text))
                .ok_or_else(|| ConfigurationError::InvalidAuthField {
                    field: format!("headers.{name}"),
                    expected: "a string, number or boolean",
                })
        })
        .collect::<Result<BTreeMap<_, _>, _>>()?;

    Ok(AuthSpec::Custom { headers })
}

fn required(
    config: &Map<String, Value>,
    auth_type: &'static str,
    field: &'static str,
) -> Result<String, ConfigurationError> {
    match config.get(field) {
        None | Some(Value::Null) => Err(ConfigurationError::MissingAuthField { auth_type, field }),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(_) => Err(ConfigurationError::InvalidAuthField {
            field: field.to_string(),
            expected: "a string",
        }),
    }
}
