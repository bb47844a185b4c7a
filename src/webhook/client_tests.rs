//! Tests for `ReqwestClient`.
//!
//! These cover construction only. Exchanges against a live endpoint are
//! exercised through the mock clients in the invoker and trigger tests.

use super::{HttpClient, HttpError, HttpRequest, ReqwestClient};
use std::time::Duration;

mod construction {
    use super::*;

    #[test]
    fn new_and_default_are_usable() {
        let _ = format!("{:?}", ReqwestClient::new());
        let _ = format!("{:?}", ReqwestClient::default());
    }

    #[test]
    fn with_timeouts_accepts_connect_timeout_only() {
        let client = ReqwestClient::with_timeouts(Duration::from_secs(30), None);

        assert!(client.is_ok());
    }

    #[test]
    fn with_timeouts_accepts_request_timeout() {
        let client =
            ReqwestClient::with_timeouts(Duration::from_secs(5), Some(Duration::from_secs(60)));

        assert!(client.is_ok());
    }

    #[test]
    fn from_client_wraps_custom_client() {
        let custom = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(1))
            .build()
            .unwrap();
        let client = ReqwestClient::from_client(custom);

        assert!(format!("{client:?}").contains("ReqwestClient"));
    }

    #[test]
    fn client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReqwestClient>();
    }
}

mod dispatch {
    use super::*;

    #[tokio::test]
    async fn unresolvable_host_fails_or_is_answered_by_proxy() {
        let client = ReqwestClient::new();
        let url = url::Url::parse("http://invalid.invalid.invalid/webhook/x").unwrap();
        let request = HttpRequest::new(http::Method::POST, url);

        // Behind a proxy the lookup failure comes back as an error status.
        match client.request(request).await {
            Err(HttpError::Connection(_) | HttpError::Timeout) => {}
            Ok(response) => assert!(!response.status.is_success()),
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn discarding_request_never_returns_a_body() {
        let client = ReqwestClient::new();
        let url = url::Url::parse("http://invalid.invalid.invalid/webhook/x").unwrap();
        let request = HttpRequest::new(http::Method::POST, url);

        if let Ok(response) = client.request_discarding_body(request).await {
            assert!(response.body.is_empty());
        }
    }
}
