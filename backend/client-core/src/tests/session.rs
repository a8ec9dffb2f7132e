use super::support::{FAKE_TOKEN, FakeAuthApi};

use crate::error::AuthError;
use crate::session::AuthSession;
use crate::token_store::{CredentialProvider, MemoryTokenStore};
use crate::validation::schemas::{EMAIL_INVALID, PASSWORD_REQUIRED};
use crate::validation::{LoginForm, RegisterForm};

use std::sync::Arc;

fn session() -> (
    AuthSession<Arc<FakeAuthApi>>,
    Arc<FakeAuthApi>,
    Arc<MemoryTokenStore>,
) {
    let api = Arc::new(FakeAuthApi::new());
    let store = Arc::new(MemoryTokenStore::new());
    let session = AuthSession::new(api.clone(), store.clone());
    (session, api, store)
}

/// **VALUE**: A successful login stores the token and remembers the user.
///
/// **WHY THIS MATTERS**: Every later request reads the credential from the
/// store; if login only kept it in memory the next call would be anonymous.
#[tokio::test]
async fn given_valid_credentials_when_logging_in_then_token_is_persisted() {
    // GIVEN: A fresh session
    let (mut session, _api, store) = session();

    // WHEN: Logging in
    let form = LoginForm {
        username: "alice".to_string(),
        password: "secret".to_string(),
    };
    let user = session.login(&form).await.unwrap().clone();

    // THEN: Token stored, user known
    assert_eq!(user.username, "alice");
    assert_eq!(store.get().map(|t| t.expose().to_string()), Some(FAKE_TOKEN.to_string()));
    assert!(session.is_authenticated());
    assert_eq!(session.user(), Some(&user));
}

/// **VALUE**: An invalid form never reaches the backend.
///
/// **BUG THIS CATCHES**: Validating after the request instead of before.
#[tokio::test]
async fn given_empty_password_when_logging_in_then_validation_error_and_no_call() {
    let (mut session, api, store) = session();

    let form = LoginForm {
        username: "alice".to_string(),
        password: String::new(),
    };
    let result = session.login(&form).await;

    match result {
        Err(AuthError::Validation(errors)) => {
            assert_eq!(errors.field("password"), Some(PASSWORD_REQUIRED));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(store.get().is_none());
    assert_eq!(api.call_count(), 0, "Nothing may be sent for an invalid form");
}

#[tokio::test]
async fn given_wrong_password_when_logging_in_then_api_error_and_no_token() {
    let (mut session, api, store) = session();

    let form = LoginForm {
        username: "alice".to_string(),
        password: "wrong".to_string(),
    };
    let result = session.login(&form).await;

    match result {
        Err(AuthError::Api(error)) => assert_eq!(error.status().as_u16(), 401),
        other => panic!("expected api error, got {other:?}"),
    }
    assert!(store.get().is_none());
    assert!(session.user().is_none());
    assert_eq!(api.call_count(), 1);
}

#[tokio::test]
async fn given_invalid_email_when_registering_then_rejected_locally() {
    let (mut session, api, _store) = session();

    let form = RegisterForm {
        username: "alice".to_string(),
        email: "alice".to_string(),
        password: "secret".to_string(),
    };
    let result = session.register(&form).await;

    match result {
        Err(AuthError::Validation(errors)) => {
            assert_eq!(errors.field("email"), Some(EMAIL_INVALID));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn given_signed_in_session_when_logging_out_then_token_and_user_are_cleared() {
    let (mut session, _api, store) = session();
    let form = RegisterForm {
        username: "alice".to_string(),
        email: "alice@example.com".to_string(),
        password: "secret".to_string(),
    };
    session.register(&form).await.unwrap();

    session.logout();

    assert!(store.get().is_none());
    assert!(session.user().is_none());
    assert!(!session.is_authenticated());
}
