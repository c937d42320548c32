// Unit tests for the endpoint registry and URL resolution

use crate::endpoints::{Endpoint, resolve_endpoint_url};

/// **VALUE**: Verifies every logical operation maps to the backend's route.
///
/// **WHY THIS MATTERS**: The paths are the only contract with the backend's
/// router. A typo turns every call of that operation into a 404.
///
/// **BUG THIS CATCHES**: Would catch a prefix constant being changed or an
/// endpoint pointing at the wrong statistics route.
#[test]
fn given_each_endpoint_when_path_requested_then_matches_backend_route() {
    let cases = [
        (Endpoint::Login, "/api/v1/auth/login"),
        (Endpoint::CurrentUser, "/api/v1/auth/me"),
        (Endpoint::Logs, "/api/v1/admin/logs"),
        (Endpoint::StatisticsOverview, "/api/v1/admin/statistics/overview"),
        (Endpoint::StatisticsTimeline, "/api/v1/admin/statistics/timeline"),
        (Endpoint::StatisticsByPiiType, "/api/v1/admin/statistics/by-pii-type"),
        (Endpoint::StatisticsByIp, "/api/v1/admin/statistics/by-ip"),
        (Endpoint::PiiSettings, "/api/v1/admin/pii-settings"),
    ];

    for (endpoint, expected) in cases {
        assert_eq!(endpoint.path(), expected, "{endpoint:?}");
    }
}

/// **VALUE**: Verifies entity substitution in the settings detail/update path.
///
/// **BUG THIS CATCHES**: Would catch a missing separator or the entity being
/// dropped, which would silently hit the list endpoint instead.
#[test]
fn given_entity_when_setting_path_requested_then_entity_substituted() {
    assert_eq!(
        Endpoint::PiiSetting("email").path(),
        "/api/v1/admin/pii-settings/email"
    );
    assert_eq!(
        Endpoint::PiiSetting("PHONE_NUM").path(),
        "/api/v1/admin/pii-settings/PHONE_NUM"
    );
}

/// **VALUE**: Verifies an entity name can never leave the settings route.
///
/// **WHY THIS MATTERS**: Entity names come from the command line. Raw `/`,
/// `?` or `#` would let `settings update` PATCH a different endpoint, or
/// silently drop part of the name.
///
/// **BUG THIS CATCHES**: Would catch the entity being formatted into the
/// path without percent-encoding.
#[test]
fn given_entity_with_url_syntax_when_resolved_then_stays_under_settings_route() {
    // GIVEN: Entity names containing path, query and fragment syntax
    let cases = [
        ("../logs", "/api/v1/admin/pii-settings/..%2Flogs"),
        ("A#b", "/api/v1/admin/pii-settings/A%23b"),
        ("EMAIL?x=1", "/api/v1/admin/pii-settings/EMAIL%3Fx%3D1"),
        ("CREDIT CARD", "/api/v1/admin/pii-settings/CREDIT%20CARD"),
    ];

    for (entity, expected_path) in cases {
        // WHEN: Resolving the setting endpoint
        let endpoint = Endpoint::pii_setting(entity).unwrap();
        let url = resolve_endpoint_url("http://localhost:8000", &endpoint.path()).unwrap();

        // THEN: The whole name is one segment under the settings route
        assert_eq!(url.path(), expected_path, "{entity}");
        assert_eq!(url.query(), None, "{entity}");
        assert_eq!(url.fragment(), None, "{entity}");
    }
}

#[test]
fn given_dot_segment_entity_when_endpoint_built_then_invalid_request() {
    for entity in ["", ".", ".."] {
        assert!(
            matches!(
                Endpoint::pii_setting(entity),
                Err(crate::error::ApiClientError::InvalidRequest { .. })
            ),
            "{entity:?} should be refused"
        );
    }
}

#[test]
fn given_empty_query_when_appended_then_no_question_mark() {
    assert_eq!(Endpoint::Logs.with_query(""), "/api/v1/admin/logs");
    assert_eq!(
        Endpoint::StatisticsByIp.with_query("size=20"),
        "/api/v1/admin/statistics/by-ip?size=20"
    );
}

/// **VALUE**: Verifies base origin and endpoint are joined without doubled or missing slashes.
///
/// **WHY THIS MATTERS**: Operators configure the origin by hand; both
/// `http://host:8000` and `http://host:8000/` must work.
#[test]
fn given_base_with_trailing_slash_when_resolved_then_single_slash() {
    let with_slash = resolve_endpoint_url("http://localhost:8000/", "/api/v1/auth/me").unwrap();
    let without_slash = resolve_endpoint_url("http://localhost:8000", "api/v1/auth/me").unwrap();

    assert_eq!(with_slash.as_str(), "http://localhost:8000/api/v1/auth/me");
    assert_eq!(without_slash.as_str(), "http://localhost:8000/api/v1/auth/me");
}

/// **VALUE**: Verifies a base origin with a path prefix keeps that prefix.
///
/// **BUG THIS CATCHES**: Would catch a switch to `Url::join`, which replaces
/// the base path when the endpoint starts with `/`.
#[test]
fn given_base_with_path_prefix_when_resolved_then_prefix_kept() {
    let url = resolve_endpoint_url("https://gateway.internal/dlp", "/api/v1/admin/logs").unwrap();

    assert_eq!(url.as_str(), "https://gateway.internal/dlp/api/v1/admin/logs");
}

#[test]
fn given_absolute_endpoint_when_resolved_then_used_verbatim() {
    let url = resolve_endpoint_url("http://localhost:8000", "https://other.example/x?y=1").unwrap();

    assert_eq!(url.as_str(), "https://other.example/x?y=1");
}

#[test]
fn given_invalid_base_when_resolved_then_url_parse_error() {
    let result = resolve_endpoint_url("not a url", "/api/v1/auth/me");

    assert!(matches!(
        result,
        Err(crate::error::ApiClientError::UrlParse { .. })
    ));
}
