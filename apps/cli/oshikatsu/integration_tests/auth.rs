use crate::helpers::{Harness, TEST_TOKEN, group_json};

use oshikatsu::Outcome;
use oshikatsu::cli::{Command, GroupsCommand, LoginArgs, SearchArgs};
use oshikatsu::render::LOGIN_REQUIRED_MESSAGE;

use client_core::token_store::CredentialProvider;

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn search_all() -> Command {
    Command::Groups(GroupsCommand::Search(SearchArgs {
        query: "ホロライブ".to_string(),
        ..SearchArgs::default()
    }))
}

/// **VALUE**: Protected commands stop at the guard without a credential.
///
/// **WHY THIS MATTERS**: Without the guard the user would see a raw 401 from
/// the backend instead of being told to log in.
///
/// **BUG THIS CATCHES**: Commands skipping the route guard, or the guard
/// reading a different store than the client.
#[tokio::test]
async fn given_no_login_when_running_protected_commands_then_login_required_and_no_requests() {
    // GIVEN: A backend and no stored credential
    let server = MockServer::start().await;
    let harness = Harness::new(&server.uri());

    // WHEN / THEN: Every protected page redirects
    for command in [search_all(), Command::Dashboard, Command::Members] {
        let (outcome, output) = harness.run(&command).await;
        assert_eq!(outcome, Outcome::LoginRequired, "{command:?}");
        assert!(output.contains(LOGIN_REQUIRED_MESSAGE));
    }

    // AND: Nothing reached the backend
    assert!(server.received_requests().await.unwrap().is_empty());
}

/// **VALUE**: Login in one invocation authorizes the next one.
///
/// **BUG THIS CATCHES**: The CLI writing the token to a different directory
/// than the one later invocations read from.
#[tokio::test]
async fn given_login_when_searching_in_next_invocation_then_bearer_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": TEST_TOKEN,
            "type": "Bearer",
            "userId": 7,
            "username": "alice",
            "email": "alice@example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/oshi-groups/list-group"))
        .and(header("authorization", format!("Bearer {TEST_TOKEN}").as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([group_json(1, "ホロライブ", Some("カバー株式会社"))])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(&server.uri());
    let login = Command::Login(LoginArgs {
        username: "alice".to_string(),
        password: "secret".to_string(),
    });

    let (outcome, output) = harness.run(&login).await;
    assert_eq!(outcome, Outcome::Done);
    assert!(output.contains("ようこそ、aliceさん"));

    let (outcome, output) = harness.run(&search_all()).await;
    assert_eq!(outcome, Outcome::Done);
    assert!(output.contains("[1] ホロライブ"));
    assert!(output.contains("更新: 2024/02/01 09:05"));
}

#[tokio::test]
async fn given_empty_login_form_when_logging_in_then_field_messages_and_no_request() {
    let server = MockServer::start().await;
    let harness = Harness::new(&server.uri());

    let (outcome, output) = harness
        .run(&Command::Login(LoginArgs {
            username: String::new(),
            password: String::new(),
        }))
        .await;

    assert_eq!(outcome, Outcome::Rejected);
    assert!(output.contains("ユーザー名を入力してください"));
    assert!(output.contains("パスワードを入力してください"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn given_signed_in_user_when_logging_out_then_credential_is_removed() {
    let server = MockServer::start().await;
    let harness = Harness::new(&server.uri()).signed_in();

    let (outcome, _) = harness.run(&Command::Logout).await;

    assert_eq!(outcome, Outcome::Done);
    assert!(harness.context().store().get().is_none());
    let (outcome, _) = harness.run(&Command::Members).await;
    assert_eq!(outcome, Outcome::LoginRequired);
}
