use crate::HttpStatusCode;

/// **VALUE**: Verifies status classification used when surfacing backend failures.
///
/// **BUG THIS CATCHES**: Off-by-one range checks that would file a 500 under client
/// errors or treat a 299 as a failure.
#[test]
fn given_status_codes_when_classified_then_ranges_are_exclusive() {
    assert!(HttpStatusCode(200).is_success());
    assert!(HttpStatusCode(299).is_success());
    assert!(!HttpStatusCode(300).is_success());

    assert!(HttpStatusCode(400).is_client_error());
    assert!(HttpStatusCode(499).is_client_error());
    assert!(!HttpStatusCode(500).is_client_error());

    assert!(HttpStatusCode(500).is_server_error());
    assert!(!HttpStatusCode(600).is_server_error());
}

/// **VALUE**: Verifies that status 0 means "no response" and nothing else.
///
/// **WHY THIS MATTERS**: Callers show a generic network message for status 0
/// and the server message for everything else.
#[test]
fn given_network_failure_constant_when_checked_then_only_zero_matches() {
    assert!(HttpStatusCode::NETWORK_FAILURE.is_network_failure());
    assert!(!HttpStatusCode(404).is_network_failure());
    assert!(!HttpStatusCode::NETWORK_FAILURE.is_success());
}

#[test]
fn given_auth_statuses_when_checked_then_401_and_403_are_auth_failures() {
    assert!(HttpStatusCode(401).is_auth_failure());
    assert!(HttpStatusCode(403).is_auth_failure());
    assert!(!HttpStatusCode(400).is_auth_failure());
}
