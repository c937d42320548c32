use admin_client::credentials::{CredentialStore, FileTokenPersistence, TokenPersistence};

use admin_client::error::CredentialError;

use common::RedactedToken;

use tempfile::TempDir;

fn token_path(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("nested").join("access_token")
}

#[test]
fn given_no_token_file_when_loaded_then_none() {
    let dir = TempDir::new().unwrap();
    let persistence = FileTokenPersistence::new(token_path(&dir));

    assert!(persistence.load().unwrap().is_none());
}

/// **VALUE**: Verifies a token saved by one process is loaded by the next.
///
/// **WHY THIS MATTERS**: This is what keeps the admin logged in across CLI
/// invocations.
///
/// **BUG THIS CATCHES**: Would catch save failing on a fresh install where
/// the data directory does not exist yet, or load returning the temp file.
#[test]
fn given_saved_token_when_new_store_loads_then_token_restored() {
    // GIVEN: A store that logged in and persisted a token
    let dir = TempDir::new().unwrap();
    let path = token_path(&dir);
    let first = CredentialStore::new(Box::new(FileTokenPersistence::new(&path)));
    first.set(RedactedToken::new("persisted-jwt")).unwrap();

    // WHEN: A second store over the same file loads
    let second = CredentialStore::new(Box::new(FileTokenPersistence::new(&path)));
    second.load().unwrap();

    // THEN: The token is restored and no temp file is left behind
    assert_eq!(second.current().unwrap().as_str(), "persisted-jwt");
    assert!(!path.with_file_name("access_token.tmp").exists());
}

#[cfg(unix)]
#[test]
fn given_saved_token_when_inspected_then_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let persistence = FileTokenPersistence::new(token_path(&dir));
    persistence.save("secret").unwrap();

    let mode = std::fs::metadata(persistence.path())
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn given_logged_in_when_cleared_then_file_removed() {
    let dir = TempDir::new().unwrap();
    let path = token_path(&dir);
    let store = CredentialStore::new(Box::new(FileTokenPersistence::new(&path)));
    store.set(RedactedToken::new("jwt")).unwrap();

    store.clear().unwrap();

    assert!(!path.exists());
    assert!(store.current().is_none());
}

#[test]
fn given_missing_file_when_removed_then_ok() {
    let dir = TempDir::new().unwrap();
    let persistence = FileTokenPersistence::new(token_path(&dir));

    assert!(persistence.remove().is_ok());
}

#[test]
fn given_whitespace_only_file_when_loaded_then_not_logged_in() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("access_token");
    std::fs::write(&path, "  \n").unwrap();

    let store = CredentialStore::new(Box::new(FileTokenPersistence::new(&path)));
    store.load().unwrap();

    assert!(!store.is_logged_in());
}

/// **VALUE**: Verifies a read failure points at the filesystem call that failed.
///
/// **WHY THIS MATTERS**: The token store is reached through a trait object, so
/// the error location is the only pointer back to which I/O step broke.
///
/// **BUG THIS CATCHES**: Would catch the location drifting to a generic call
/// site that says nothing about the failing operation.
#[test]
fn given_token_path_is_directory_when_loaded_then_read_error_located_in_persistence() {
    // GIVEN: The token path exists but is a directory
    let dir = TempDir::new().unwrap();
    let persistence = FileTokenPersistence::new(dir.path());

    // WHEN: Loading
    let err = persistence.load().unwrap_err();

    // THEN: ReadError naming the path, located in the persistence module
    match err {
        CredentialError::ReadError { location, path, .. } => {
            assert_eq!(path, dir.path());
            assert!(location.file.ends_with("persistence.rs"), "{}", location.file);
        }
        other => panic!("Expected ReadError, got {other:?}"),
    }
}
