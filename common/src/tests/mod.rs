// Unit tests for shared primitives

use crate::{HttpStatusCode, RedactedToken};

/// **VALUE**: Verifies the bearer token never appears in Debug or Display output.
///
/// **WHY THIS MATTERS**: Requests are logged at debug level. If a token slipped into
/// a log line, anyone with access to the log file could replay the admin session.
///
/// **BUG THIS CATCHES**: Would catch if someone derives `Debug` on `RedactedToken`
/// instead of keeping the manual redacting implementation.
#[test]
fn given_token_when_formatted_then_value_is_redacted() {
    // GIVEN: A token with a recognizable value
    let token = RedactedToken::new("super-secret-jwt");

    // WHEN: Formatting with Debug and Display
    let debug = format!("{:?}", token);
    let display = format!("{}", token);

    // THEN: Neither contains the raw value
    assert!(!debug.contains("super-secret-jwt"));
    assert!(!display.contains("super-secret-jwt"));
    assert!(debug.contains("REDACTED"));
}

/// **VALUE**: Verifies serde refuses to serialize the token.
///
/// **WHY THIS MATTERS**: Responses and config are serialized to JSON for output.
/// A token embedded in such a struct must fail loudly rather than be written out.
///
/// **BUG THIS CATCHES**: Would catch if the manual `Serialize` impl is replaced
/// by a derive.
#[test]
fn given_token_when_serialized_then_returns_error() {
    // GIVEN: A token
    let token = RedactedToken::new("abc");

    // WHEN: Serializing to JSON
    let result = serde_json::to_string(&token);

    // THEN: Serialization fails
    assert!(result.is_err(), "RedactedToken must not serialize");
}

/// **VALUE**: Verifies the Authorization header value format.
///
/// **BUG THIS CATCHES**: Would catch a missing space or wrong scheme casing,
/// which the backend rejects with 401.
#[test]
fn given_token_when_bearer_value_then_prefixed_with_scheme() {
    let token = RedactedToken::new("T");

    assert_eq!(token.bearer_value(), "Bearer T");
    assert_eq!(token.len(), 1);
    assert!(!token.is_empty());
}

/// **VALUE**: Verifies status categorization boundaries.
///
/// **WHY THIS MATTERS**: The executor treats anything outside 200-299 as a failure
/// and 401 as credential invalidation. Off-by-one ranges would either swallow
/// errors or clear credentials on the wrong status.
#[test]
fn given_status_codes_when_categorized_then_ranges_are_exact() {
    assert!(HttpStatusCode(200).is_success());
    assert!(HttpStatusCode(299).is_success());
    assert!(!HttpStatusCode(300).is_success());
    assert!(!HttpStatusCode(199).is_success());

    assert!(HttpStatusCode(401).is_unauthorized());
    assert!(!HttpStatusCode(403).is_unauthorized());

    assert!(HttpStatusCode(404).is_client_error());
    assert!(HttpStatusCode(503).is_server_error());
    assert!(!HttpStatusCode(503).is_client_error());
}
