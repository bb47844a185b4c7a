//! Tests for `AuthSpec`.

use super::*;
use serde_json::json;

fn config(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

mod resolve {
    use super::*;

    #[test]
    fn none_resolves_to_no_headers() {
        assert!(AuthSpec::None.resolve().is_empty());
    }

    #[test]
    fn basic_encodes_credentials() {
        let headers = AuthSpec::basic("u", "p").resolve();

        assert_eq!(headers.len(), 1);
        // base64("u:p") == "dTpw"
        assert_eq!(headers["Authorization"], "Basic dTpw");
    }

    #[test]
    fn basic_encodes_with_padding() {
        let headers = AuthSpec::basic("user", "pass").resolve();

        assert_eq!(headers["Authorization"], "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn basic_allows_empty_password() {
        let headers = AuthSpec::basic("admin", "").resolve();

        // base64("admin:")
        assert_eq!(headers["Authorization"], "Basic YWRtaW46");
    }

    #[test]
    fn header_auth_is_passed_verbatim() {
        let headers = AuthSpec::header("X-API-Key", "secret-key").resolve();

        assert_eq!(headers.len(), 1);
        assert_eq!(headers["X-API-Key"], "secret-key");
    }

    #[test]
    fn header_auth_does_not_reject_reserved_names() {
        let headers = AuthSpec::header("Host", "evil.example").resolve();

        assert_eq!(headers["Host"], "evil.example");
    }

    #[test]
    fn jwt_produces_bearer_header() {
        let headers = AuthSpec::jwt("token").resolve();

        assert_eq!(headers["Authorization"], "Bearer token");
    }

    #[test]
    fn custom_headers_pass_through_unchanged() {
        let spec = AuthSpec::custom([("X-Custom-Header", "one"), ("X-Another-Header", "two")]);
        let headers = spec.resolve();

        assert_eq!(headers.len(), 2);
        assert_eq!(headers["X-Custom-Header"], "one");
        assert_eq!(headers["X-Another-Header"], "two");
    }

    #[test]
    fn resolve_is_idempotent() {
        let specs = [
            AuthSpec::None,
            AuthSpec::basic("u", "p"),
            AuthSpec::header("X-Key", "v"),
            AuthSpec::jwt("t"),
            AuthSpec::custom([("A", "1"), ("B", "2")]),
        ];

        for spec in &specs {
            assert_eq!(spec.resolve(), spec.resolve(), "{}", spec.kind());
        }
    }
}

mod validate {
    use super::*;

    #[test]
    fn empty_username_is_missing() {
        let err = AuthSpec::basic("", "p").validate().unwrap_err();

        assert!(matches!(
            err,
            ConfigurationError::MissingAuthField {
                auth_type: BASIC_AUTH,
                field: "username"
            }
        ));
    }

    #[test]
    fn empty_header_name_is_missing() {
        let err = AuthSpec::header("", "v").validate().unwrap_err();

        assert!(matches!(
            err,
            ConfigurationError::MissingAuthField { field: "name", .. }
        ));
    }

    #[test]
    fn empty_token_is_missing() {
        let err = AuthSpec::jwt("").validate().unwrap_err();

        assert!(matches!(
            err,
            ConfigurationError::MissingAuthField { field: "jwt", .. }
        ));
    }

    #[test]
    fn complete_specs_are_valid() {
        assert!(AuthSpec::None.validate().is_ok());
        assert!(AuthSpec::basic("u", "").validate().is_ok());
        assert!(AuthSpec::custom(Vec::<(String, String)>::new()).validate().is_ok());
    }
}

mod from_config {
    use super::*;

    #[test]
    fn empty_mapping_is_none() {
        let spec = AuthSpec::from_config(&Map::new()).unwrap();

        assert_eq!(spec, AuthSpec::None);
    }

    #[test]
    fn decodes_basic_auth() {
        let spec = AuthSpec::from_config(&config(json!({
            "type": "BasicAuth",
            "username": "testuser",
            "password": "testpass"
        })))
        .unwrap();

        assert_eq!(spec, AuthSpec::basic("testuser", "testpass"));
    }

    #[test]
    fn decodes_header_auth() {
        let spec = AuthSpec::from_config(&config(json!({
            "type": "HeaderAuth",
            "name": "X-API-Key",
            "value": "secret-key"
        })))
        .unwrap();

        assert_eq!(spec, AuthSpec::header("X-API-Key", "secret-key"));
    }

    #[test]
    fn decodes_jwt_auth() {
        let spec =
            AuthSpec::from_config(&config(json!({"type": "JWTAuth", "jwt": "token"}))).unwrap();

        assert_eq!(spec, AuthSpec::jwt("token"));
        assert_eq!(spec.resolve()["Authorization"], "Bearer token");
    }

    #[test]
    fn untagged_headers_table_is_custom() {
        let spec = AuthSpec::from_config(&config(json!({
            "headers": {"X-Key": "v", "X-Version": 2}
        })))
        .unwrap();

        assert_eq!(spec, AuthSpec::custom([("X-Key", "v"), ("X-Version", "2")]));
    }

    #[test]
    fn unknown_discriminator_is_rejected() {
        let err = AuthSpec::from_config(&config(json!({"type": "OAuth2"}))).unwrap_err();

        match err {
            ConfigurationError::UnknownAuthType(kind) => assert_eq!(kind, "OAuth2"),
            other => panic!("expected UnknownAuthType, got {other:?}"),
        }
    }

    #[test]
    fn unknown_discriminator_message_names_the_untagged_form() {
        let err = AuthSpec::from_config(&config(json!({"type": "custom"}))).unwrap_err();
        let message = err.to_string();

        assert!(message.contains("JWTAuth"));
        assert!(message.contains("omit 'type'"));
        assert!(message.contains("'headers'"));
    }

    #[test]
    fn discriminator_is_case_sensitive() {
        let err = AuthSpec::from_config(&config(json!({"type": "basicauth"}))).unwrap_err();

        assert!(matches!(err, ConfigurationError::UnknownAuthType(_)));
    }

    #[test]
    fn basic_without_username_fails() {
        let err = AuthSpec::from_config(&config(json!({
            "type": "BasicAuth",
            "password": "p"
        })))
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigurationError::MissingAuthField {
                auth_type: BASIC_AUTH,
                field: "username"
            }
        ));
    }

    #[test]
    fn null_field_counts_as_missing() {
        let err = AuthSpec::from_config(&config(json!({
            "type": "HeaderAuth",
            "name": "X-Key",
            "value": null
        })))
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigurationError::MissingAuthField { field: "value", .. }
        ));
    }

    #[test]
    fn non_string_field_is_invalid() {
        let err = AuthSpec::from_config(&config(json!({"type": "JWTAuth", "jwt": 42}))).unwrap_err();

        assert!(matches!(err, ConfigurationError::InvalidAuthField { .. }));
    }

    #[test]
    fn non_string_discriminator_is_invalid() {
        let err = AuthSpec::from_config(&config(json!({"type": 1}))).unwrap_err();

        assert!(matches!(
            err,
            ConfigurationError::InvalidAuthField { ref field, .. } if field == "type"
        ));
    }

    #[test]
    fn untagged_without_headers_fails() {
        let err = AuthSpec::from_config(&config(json!({"username": "u"}))).unwrap_err();

        assert!(matches!(
            err,
            ConfigurationError::MissingAuthField {
                field: "headers",
                ..
            }
        ));
    }

    #[test]
    fn nested_header_value_is_invalid() {
        let err = AuthSpec::from_config(&config(json!({
            "headers": {"X-Key": {"nested": true}}
        })))
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigurationError::InvalidAuthField { ref field, .. } if field == "headers.X-Key"
        ));
    }
}
