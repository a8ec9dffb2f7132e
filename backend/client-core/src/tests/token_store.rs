use crate::token_store::{
    CredentialProvider, FileTokenStore, MemoryTokenStore, PathSource, TOKEN_STORAGE_KEY,
    detect_token_paths,
};

use tempfile::TempDir;

/// **VALUE**: A credential written by one store instance is read by the next.
///
/// **WHY THIS MATTERS**: This is the "reload" case. Every CLI invocation is a
/// new process, so the session only exists if the file survives.
///
/// **BUG THIS CATCHES**: Writing to a temp file that is never renamed, or reading
/// from a different path than the one written.
#[test]
fn given_stored_token_when_new_store_opens_same_dir_then_token_is_read_back() {
    // GIVEN: A token written through one store
    let temp = TempDir::new().unwrap();
    FileTokenStore::in_dir(temp.path()).set("header.payload.signature");

    // WHEN: A fresh store reads the same directory
    let reloaded = FileTokenStore::in_dir(temp.path());

    // THEN: Same token, stored under the fixed key, no temp file left behind
    let token = reloaded.get().expect("token should survive reload");
    assert_eq!(token.expose(), "header.payload.signature");
    assert!(temp.path().join(TOKEN_STORAGE_KEY).exists());
    assert!(!temp.path().join(format!("{TOKEN_STORAGE_KEY}.tmp")).exists());
}

#[test]
fn given_stored_token_when_cleared_then_get_returns_none_and_file_is_gone() {
    let temp = TempDir::new().unwrap();
    let store = FileTokenStore::in_dir(temp.path());
    store.set("token");

    store.clear();

    assert!(store.get().is_none());
    assert!(!temp.path().join(TOKEN_STORAGE_KEY).exists());
}

/// **VALUE**: Storage failures degrade to "no credential" instead of erroring.
///
/// **BUG THIS CATCHES**: A panic or propagated error when the data dir was never
/// created, which would make every first run fail.
#[test]
fn given_missing_directory_when_reading_then_none_and_clear_is_harmless() {
    let temp = TempDir::new().unwrap();
    let store = FileTokenStore::in_dir(&temp.path().join("never-created"));

    assert!(store.get().is_none());
    store.clear();
}

#[test]
fn given_blank_file_when_reading_then_treated_as_absent() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join(TOKEN_STORAGE_KEY), "  \n").unwrap();

    assert!(FileTokenStore::in_dir(temp.path()).get().is_none());
}

#[test]
fn given_blank_token_when_set_then_nothing_is_stored() {
    let store = MemoryTokenStore::new();

    store.set("   ");

    assert!(store.get().is_none());
}

#[test]
fn given_memory_store_with_token_when_cleared_then_empty() {
    let store = MemoryTokenStore::with_token("abc");
    assert_eq!(store.get().map(|t| t.expose().to_string()), Some("abc".to_string()));

    store.clear();

    assert!(store.get().is_none());
}

#[cfg(unix)]
#[test]
fn given_stored_token_when_inspecting_permissions_then_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    FileTokenStore::in_dir(temp.path()).set("token");

    let mode = std::fs::metadata(temp.path().join(TOKEN_STORAGE_KEY))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}

/// **VALUE**: Concurrent writers each use their own temp file and leave
/// exactly one credential behind.
///
/// **WHY THIS MATTERS**: Two CLI invocations logging in at once must not
/// truncate each other's half-written file.
///
/// **BUG THIS CATCHES**: A shared temp file name, where one writer renames the
/// other's partial file into place or fails on a file that just vanished.
#[test]
fn given_concurrent_writers_when_storing_then_one_whole_token_and_no_temp_files() {
    // GIVEN: Several stores on the same directory
    let temp = TempDir::new().unwrap();
    let tokens: Vec<String> = (0..8).map(|i| format!("token-{i}-{}", "x".repeat(64))).collect();

    // WHEN: They all write at the same time
    std::thread::scope(|scope| {
        for token in &tokens {
            let dir = temp.path();
            scope.spawn(move || FileTokenStore::in_dir(dir).set(token));
        }
    });

    // THEN: The stored token is one of the written tokens, intact
    let stored = FileTokenStore::in_dir(temp.path()).get().unwrap();
    assert!(tokens.iter().any(|token| token == stored.expose()));

    // AND: Only the credential file remains
    let entries: Vec<String> = std::fs::read_dir(temp.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, vec![TOKEN_STORAGE_KEY.to_string()]);
}

#[test]
fn given_configured_dir_when_detecting_paths_then_config_source_wins() {
    let temp = TempDir::new().unwrap();

    let paths = detect_token_paths(Some(temp.path())).unwrap();

    assert_eq!(paths.source, PathSource::Config);
    assert_eq!(paths.token_file, temp.path().join(TOKEN_STORAGE_KEY));
}
