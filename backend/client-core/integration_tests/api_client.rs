use crate::helpers::{REFUSED_BASE_URL, TEST_TOKEN, anonymous_client, signed_in_client};

use client_core::api_client::{ApiClient, RequestOptions};
use client_core::error::ApiError;
use client_core::error::api::{NETWORK_ERROR_MESSAGE, REQUEST_ERROR_MESSAGE};
use client_core::token_store::MemoryTokenStore;

use reqwest::header::{HeaderName, HeaderValue};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// ApiClient::request() - headers and URL resolution
// ============================================================================

/// **VALUE**: Requests carry `Authorization: Bearer <token>` when a credential exists.
///
/// **WHY THIS MATTERS**: Every group endpoint is protected; without the header
/// the backend answers 401 and the page shows nothing.
///
/// **BUG THIS CATCHES**: Reading the token once at construction instead of per
/// request, or formatting the header without the `Bearer ` prefix.
#[tokio::test]
async fn given_stored_token_when_requesting_then_bearer_header_is_sent() {
    // GIVEN: A server that only answers authorized requests
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ping"))
        .and(header("authorization", format!("Bearer {TEST_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Requesting through a signed-in client
    let client = signed_in_client(&server.uri());
    let body: Value = client
        .request_json("/api/ping", RequestOptions::get())
        .await
        .expect("authorized request should succeed");

    // THEN: The mock matched
    assert_eq!(body, json!({"ok": true}));
}

/// **VALUE**: `skip_auth` suppresses the header even when a token is stored.
///
/// **BUG THIS CATCHES**: Sending a stale token to the login endpoint, which some
/// backends reject before looking at the credentials in the body.
#[tokio::test]
async fn given_skip_auth_when_requesting_then_no_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/open"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in_client(&server.uri());
    let body: Option<Value> = client
        .request("/api/open", RequestOptions::post().skip_auth())
        .await
        .unwrap();

    assert!(body.is_none(), "204 has no body");
    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(received[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn given_absolute_url_when_requesting_then_base_url_is_bypassed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/elsewhere"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = anonymous_client(REFUSED_BASE_URL);
    let absolute = format!("{}/elsewhere", server.uri());
    let body: Vec<Value> = client
        .request_json(&absolute, RequestOptions::get())
        .await
        .unwrap();

    assert!(body.is_empty());
}

#[test]
fn given_base_url_with_trailing_slash_when_resolving_then_single_slash() {
    let client = anonymous_client("http://localhost:8080/");

    let url = client.resolve_url("/api/oshi-groups/create").unwrap();

    assert_eq!(url.as_str(), "http://localhost:8080/api/oshi-groups/create");
}

// ============================================================================
// ApiClient::request() - payloads and extra headers
// ============================================================================

/// **VALUE**: A JSON payload wins over a raw body and is labeled as JSON.
///
/// **WHY THIS MATTERS**: Callers may set both while building options; the
/// backend only understands the JSON form.
///
/// **BUG THIS CATCHES**: Sending the raw bytes (or both) when JSON is present,
/// or dropping the `content-type` header so the backend rejects the body.
#[tokio::test]
async fn given_raw_body_and_json_when_requesting_then_json_is_sent() {
    // GIVEN: A server expecting the JSON payload and a custom header
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/echo"))
        .and(header("content-type", "application/json"))
        .and(header("x-request-source", "cli"))
        .and(body_json(json!({"a": 1})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Both a raw body and a JSON payload are set
    let options = RequestOptions::post()
        .with_body("raw")
        .with_json(&json!({"a": 1}))
        .unwrap()
        .with_header(
            HeaderName::from_static("x-request-source"),
            HeaderValue::from_static("cli"),
        );
    let client = signed_in_client(&server.uri());
    let body: Option<Value> = client.request("/api/echo", options).await.unwrap();

    // THEN: Only the JSON reached the server
    assert!(body.is_none());
    let received = server.received_requests().await.unwrap();
    assert_eq!(received[0].body, br#"{"a":1}"#.to_vec());
}

#[tokio::test]
async fn given_raw_body_only_when_requesting_then_sent_without_json_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in_client(&server.uri());
    let _: Option<Value> = client
        .request("/api/upload", RequestOptions::post().with_body("plain bytes"))
        .await
        .unwrap();

    let received = server.received_requests().await.unwrap();
    assert_eq!(received[0].body, b"plain bytes".to_vec());
    let content_type = received[0]
        .headers
        .get("content-type")
        .and_then(|value| value.to_str().ok());
    assert_ne!(content_type, Some("application/json"));
}

// ============================================================================
// ApiClient::request() - error normalization
// ============================================================================

/// **VALUE**: A backend error body is surfaced exactly as sent.
///
/// **BUG THIS CATCHES**: Replacing the server's message with the reason phrase.
#[tokio::test]
async fn given_contract_error_body_when_requesting_then_passed_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/fail"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "status": 400,
            "message": "Validation failed",
            "errors": {"groupName": "must not be blank"}
        })))
        .mount(&server)
        .await;

    let client = signed_in_client(&server.uri());
    let error = client
        .request::<Value>("/api/fail", RequestOptions::post())
        .await
        .unwrap_err();

    assert_eq!(error.status().as_u16(), 400);
    assert_eq!(error.message(), "Validation failed");
    assert_eq!(
        error.field_errors().unwrap().get("groupName").map(String::as_str),
        Some("must not be blank")
    );
}

#[tokio::test]
async fn given_html_error_page_when_requesting_then_status_line_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/gateway"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>upstream down</html>"))
        .mount(&server)
        .await;

    let client = signed_in_client(&server.uri());
    let error = client
        .request::<Value>("/api/gateway", RequestOptions::get())
        .await
        .unwrap_err();

    assert_eq!(error.status().as_u16(), 502);
    assert_eq!(error.message(), "Bad Gateway");
}

/// **VALUE**: Transport failures are status 0 with the generic network message.
///
/// **WHY THIS MATTERS**: The UI distinguishes "server said no" from "server
/// unreachable" purely by status 0.
#[tokio::test]
async fn given_refused_connection_when_requesting_then_status_zero() {
    let client = anonymous_client(REFUSED_BASE_URL);

    let error = client
        .request::<Value>("/api/anything", RequestOptions::get())
        .await
        .unwrap_err();

    assert!(matches!(error, ApiError::Network { .. }));
    assert_eq!(error.status().as_u16(), 0);
    assert_eq!(error.message(), NETWORK_ERROR_MESSAGE);
}

#[tokio::test]
async fn given_malformed_success_body_when_requesting_json_then_decode_error_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/broken"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("not json", "application/json"))
        .mount(&server)
        .await;

    let client = signed_in_client(&server.uri());
    let error = client
        .request_json::<Vec<Value>>("/api/broken", RequestOptions::get())
        .await
        .unwrap_err();

    assert!(matches!(error, ApiError::Decode { .. }));
    assert_eq!(error.status().as_u16(), 200);
}

/// **VALUE**: Request-building failures carry a user-facing message and keep
/// the technical cause as detail.
///
/// **BUG THIS CATCHES**: Showing a raw parser message in the error banner.
#[test]
fn given_unparseable_base_url_when_building_client_then_localized_request_error() {
    let result = ApiClient::new(
        "not a url",
        Duration::from_secs(5),
        Arc::new(MemoryTokenStore::new()),
    );

    let Err(error) = result else {
        panic!("an unparseable base URL must be rejected");
    };
    assert_eq!(error.status().as_u16(), 0);
    assert_eq!(error.message(), REQUEST_ERROR_MESSAGE);
    assert!(
        matches!(&error, ApiError::Request { detail, .. } if detail.contains("not a url")),
        "{error}"
    );
}
