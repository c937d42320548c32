// Unit tests for logger module initialization logic

use crate::logger::{LOG_FILE_NAME, initialize};

use log::LevelFilter;
use tempfile::TempDir;

/// **VALUE**: Verifies that calling initialize() multiple times doesn't panic or fail.
///
/// **WHY THIS MATTERS**: Tests and the binary may both initialize logging. If a
/// second call panics, fern's global logger would crash the process.
///
/// **BUG THIS CATCHES**: Would catch if the Once or AtomicBool guards are removed,
/// causing fern to panic when trying to set a global logger twice.
#[test]
fn given_logger_initialized_when_called_again_then_returns_ok() {
    // GIVEN: A log directory that does not exist yet
    let temp_dir = TempDir::new().unwrap();
    let log_dir = temp_dir.path().join("logs");

    // WHEN: Calling initialize twice
    let result1 = initialize(LevelFilter::Debug, Some(&log_dir));
    let result2 = initialize(LevelFilter::Debug, Some(&log_dir));

    // THEN: Both return Ok and the log file exists
    assert!(result1.is_ok(), "First initialization should succeed");
    assert!(
        result2.is_ok(),
        "Second initialization should succeed (idempotent)"
    );
    assert!(log_dir.join(LOG_FILE_NAME).exists());
}
