use admin_client::credentials::paths::{DATA_DIR_ENV_KEY, TOKEN_FILE_NAME};
use admin_client::credentials::{PathSource, detect_credential_paths};

use std::path::PathBuf;

use serial_test::serial;

/// **VALUE**: Verifies the data directory override is honored.
///
/// **WHY THIS MATTERS**: Shared machines and CI need to keep tokens out of the
/// user's real profile.
#[test]
#[serial]
fn given_data_dir_override_when_detected_then_token_file_inside_override() {
    // GIVEN: An explicit data directory
    unsafe {
        std::env::set_var(DATA_DIR_ENV_KEY, "/tmp/pii-admin-test-data");
    }

    // WHEN: Detecting paths
    let paths = detect_credential_paths().unwrap();

    unsafe {
        std::env::remove_var(DATA_DIR_ENV_KEY);
    }

    // THEN: The override wins
    assert_eq!(paths.source, PathSource::EnvVar);
    assert_eq!(paths.data_dir, PathBuf::from("/tmp/pii-admin-test-data"));
    assert_eq!(
        paths.token_file,
        PathBuf::from("/tmp/pii-admin-test-data").join(TOKEN_FILE_NAME)
    );
}

#[test]
#[serial]
fn given_empty_override_when_detected_then_override_ignored() {
    unsafe {
        std::env::set_var(DATA_DIR_ENV_KEY, "");
    }

    let result = detect_credential_paths();

    unsafe {
        std::env::remove_var(DATA_DIR_ENV_KEY);
    }

    if let Ok(paths) = result {
        assert_ne!(paths.source, PathSource::EnvVar);
        assert!(paths.token_file.ends_with(TOKEN_FILE_NAME));
    }
}
