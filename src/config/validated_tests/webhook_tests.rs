//! Tests for request building from configuration.

use serde_json::json;

use crate::ConfigurationError;
use crate::request::BodySource;
use crate::storage::ContentRef;

use super::*;

mod method_and_content_type {
    use super::*;

    #[test]
    fn method_is_case_insensitive() {
        let config =
            ValidatedConfig::from_raw(&cli(&["--uri", URI, "--method", "patch"]), None).unwrap();

        assert_eq!(config.request.method().as_str(), "PATCH");
    }

    #[test]
    fn unknown_method_returns_error() {
        let result = ValidatedConfig::from_raw(&cli(&["--uri", URI, "--method", "TRACE"]), None);

        assert!(matches!(
            result,
            Err(ConfigError::Invalid(ConfigurationError::InvalidMethod(m))) if m == "TRACE"
        ));
    }

    #[test]
    fn unknown_content_type_returns_error() {
        let result =
            ValidatedConfig::from_raw(&cli(&["--uri", URI, "--content-type", "yaml"]), None);

        assert!(matches!(
            result,
            Err(ConfigError::Invalid(ConfigurationError::InvalidContentType(_)))
        ));
    }

    #[test]
    fn content_type_defaults_to_binary() {
        let config = ValidatedConfig::from_raw(&cli(&["--uri", URI]), None).unwrap();

        assert_eq!(config.request.content_type().to_string(), "BINARY");
    }
}

mod body {
    use super::*;

    #[test]
    fn no_body_is_absent() {
        let config = ValidatedConfig::from_raw(&cli(&["--uri", URI]), None).unwrap();

        assert_eq!(*config.request.body(), BodySource::Absent);
    }

    #[test]
    fn cli_body_is_parsed_as_json_object() {
        let config = ValidatedConfig::from_raw(
            &cli(&["--uri", URI, "--body", r#"{"orderId":42,"items":[1,2]}"#]),
            None,
        )
        .unwrap();

        match config.request.body() {
            BodySource::Inline(payload) => {
                assert_eq!(
                    serde_json::Value::Object(payload.clone()),
                    json!({"orderId": 42, "items": [1, 2]})
                );
            }
            other => panic!("expected inline body, got {other:?}"),
        }
    }

    #[test]
    fn cli_body_must_be_an_object() {
        let result = ValidatedConfig::from_raw(&cli(&["--uri", URI, "--body", "[1,2]"]), None);

        assert!(matches!(result, Err(ConfigError::InvalidBody { .. })));
    }

    #[test]
    fn malformed_cli_body_returns_error() {
        let result = ValidatedConfig::from_raw(&cli(&["--uri", URI, "--body", "{oops"]), None);

        assert!(matches!(result, Err(ConfigError::InvalidBody { .. })));
    }

    #[test]
    fn empty_body_counts_as_absent() {
        let config =
            ValidatedConfig::from_raw(&cli(&["--uri", URI, "--body", "{}"]), None).unwrap();

        assert_eq!(*config.request.body(), BodySource::Absent);
    }

    #[test]
    fn cli_body_replaces_toml_body() {
        let toml = toml(&format!(
            "[webhook]\nuri = \"{URI}\"\n[webhook.body]\nfrom_toml = true"
        ));

        let config =
            ValidatedConfig::from_raw(&cli(&["--body", r#"{"from_cli":true}"#]), Some(&toml))
                .unwrap();

        match config.request.body() {
            BodySource::Inline(payload) => {
                assert!(payload.contains_key("from_cli"));
                assert!(!payload.contains_key("from_toml"));
            }
            other => panic!("expected inline body, got {other:?}"),
        }
    }

    #[test]
    fn file_reference_from_toml() {
        let toml = toml(&format!(
            "[webhook]\nuri = \"{URI}\"\nfrom = \"~/payload.xml\"\ncontent_type = \"XML\""
        ));

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();

        assert_eq!(
            *config.request.body(),
            BodySource::External(ContentRef::new("~/payload.xml"))
        );
    }

    #[test]
    fn body_and_file_from_different_sources_conflict() {
        let toml = toml(&format!(
            "[webhook]\nuri = \"{URI}\"\nfrom = \"payload.xml\""
        ));

        let result = ValidatedConfig::from_raw(&cli(&["--body", r#"{"a":1}"#]), Some(&toml));

        assert!(matches!(
            result,
            Err(ConfigError::Invalid(
                ConfigurationError::ConflictingBodySources
            ))
        ));
    }
}

mod pairs {
    use super::*;

    #[test]
    fn query_without_separator_returns_error() {
        let result = ValidatedConfig::from_raw(&cli(&["--uri", URI, "--query", "tenant"]), None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidPair { field: "query parameter", .. })
        ));
    }

    #[test]
    fn header_without_separator_returns_error() {
        let result = ValidatedConfig::from_raw(&cli(&["--uri", URI, "--header", "X-Bad"]), None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidPair { field: "header", .. })
        ));
    }

    #[test]
    fn header_value_may_contain_other_separator() {
        let config = ValidatedConfig::from_raw(
            &cli(&[
                "--uri",
                URI,
                "--header",
                "X-Callback=https://a.example.com",
                "--header",
                "X-Sig: k=v",
            ]),
            None,
        )
        .unwrap();
        let headers = config.request.headers();

        assert_eq!(headers["X-Callback"], "https://a.example.com");
        assert_eq!(headers["X-Sig"], "k=v");
    }

    #[test]
    fn non_scalar_toml_query_returns_error() {
        let toml = toml(&format!(
            "[webhook]\nuri = \"{URI}\"\n[webhook.query]\nids = [1, 2]"
        ));

        let result = ValidatedConfig::from_raw(&cli(&[]), Some(&toml));

        assert!(matches!(
            result,
            Err(ConfigError::Invalid(
                ConfigurationError::NonScalarQueryParameter(name)
            )) if name == "ids"
        ));
    }
}
