use crate::{RedactError, RedactedToken};

/// **VALUE**: Verifies the token value never leaks through Debug or Display.
///
/// **WHY THIS MATTERS**: Tokens end up inside structs that get logged with `{:?}`.
/// A leaked bearer token grants full access to the user's account.
///
/// **BUG THIS CATCHES**: Would catch if someone swaps the manual impls for `#[derive(Debug)]`.
#[test]
fn given_token_when_formatted_then_value_is_redacted() {
    // GIVEN: A token
    let token = RedactedToken::try_new("eyJhbGciOiJIUzI1NiJ9.secret").unwrap();

    // WHEN: Formatting it
    let debug = format!("{:?}", token);
    let display = format!("{}", token);

    // THEN: Neither contains the secret
    assert!(!debug.contains("secret"));
    assert!(!display.contains("secret"));
    assert!(debug.contains("REDACTED"));
}

/// **VALUE**: Verifies that serialization is refused.
///
/// **BUG THIS CATCHES**: Would catch if a token is accidentally embedded in a
/// serialized config or response body.
#[test]
fn given_token_when_serialized_then_returns_error() {
    let token = RedactedToken::try_new("abc").unwrap();

    let result = serde_json::to_string(&token);

    assert!(result.is_err(), "RedactedToken must refuse serialization");
}

/// **VALUE**: Verifies whitespace handling and the bearer header format.
///
/// **WHY THIS MATTERS**: Tokens read back from disk may carry a trailing newline.
/// Sending `Bearer abc\n` would be rejected by the server.
#[test]
fn given_padded_token_when_wrapped_then_trimmed_and_bearer_formatted() {
    let token = RedactedToken::try_new("  abc.def \n").unwrap();

    assert_eq!(token.expose(), "abc.def");
    assert_eq!(token.len(), 7);
    assert_eq!(token.bearer_header_value(), "Bearer abc.def");
}

#[test]
fn given_blank_token_when_wrapped_then_returns_empty_token_error() {
    let result = RedactedToken::try_new(" \n\t");

    match result {
        Err(RedactError::EmptyToken { .. }) => {}
        other => panic!("Expected EmptyToken error, got {other:?}"),
    }
}
