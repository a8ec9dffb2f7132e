use crate::helpers::{auth_json, client_with};

use client_core::api::OshiGroupApi;
use client_core::session::AuthSession;
use client_core::token_store::{CredentialProvider, FileTokenStore};
use client_core::validation::LoginForm;

use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Login persists the credential and later calls carry it, even
/// from a fresh client over the same storage directory.
///
/// **WHY THIS MATTERS**: This is the whole session lifecycle of the CLI: one
/// invocation logs in, the next one searches.
///
/// **BUG THIS CATCHES**: Login sending a bearer header, the token not reaching
/// disk, or a new process not picking it up.
#[tokio::test]
async fn given_successful_login_when_searching_later_then_bearer_header_is_sent() {
    // GIVEN: A backend that issues a token and protects the list endpoint
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"username": "alice", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_json("issued-token")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/oshi-groups/list-company"))
        .and(header("authorization", "Bearer issued-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&server)
        .await;

    // WHEN: Logging in through a file-backed session
    let temp = TempDir::new().unwrap();
    let store = Arc::new(FileTokenStore::in_dir(temp.path()));
    let client = client_with(&server.uri(), store.clone());
    let mut session = AuthSession::new(client.clone(), store.clone());
    let form = LoginForm {
        username: "alice".to_string(),
        password: "secret".to_string(),
    };
    let user = session.login(&form).await.unwrap();
    assert_eq!(user.user_id, 7);

    // THEN: The login request itself was anonymous
    let received = server.received_requests().await.unwrap();
    assert!(received[0].headers.get("authorization").is_none());

    // AND: The same client now sends the bearer
    client.list_by_company("x").await.unwrap();

    // AND: So does a client built after a "restart"
    let reloaded = Arc::new(FileTokenStore::in_dir(temp.path()));
    assert!(reloaded.get().is_some());
    let restarted = client_with(&server.uri(), reloaded);
    restarted.list_by_company("x").await.unwrap();
}

#[tokio::test]
async fn given_rejected_login_when_logging_in_then_nothing_is_stored() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status": 401,
            "message": "ユーザー名またはパスワードが正しくありません"
        })))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let store = Arc::new(FileTokenStore::in_dir(temp.path()));
    let client = client_with(&server.uri(), store.clone());
    let mut session = AuthSession::new(client, store.clone());
    let form = LoginForm {
        username: "alice".to_string(),
        password: "wrong".to_string(),
    };

    let result = session.login(&form).await;

    assert!(result.is_err());
    assert!(store.get().is_none());
    assert!(!session.is_authenticated());
}
