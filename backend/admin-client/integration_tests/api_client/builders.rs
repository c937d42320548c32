use crate::helpers::{TEST_TOKEN, client_for, received};

use admin_client::error::ApiClientError;
use admin_client::{DateRange, IpStatisticsFilter, LogFilter, TimelineFilter};

use models::SettingUpdate;

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies the command center's recent-logs call reaches the backend verbatim.
///
/// **WHY THIS MATTERS**: The dashboard's activity feed depends on this exact
/// query. Reordering or double-encoding would change server-side semantics.
#[tokio::test]
async fn given_recent_logs_filter_when_fetching_logs_then_exact_query_sent() {
    // GIVEN: A backend with an empty log page
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/logs"))
        .and(query_param("sort", "timestamp:desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 0, "page": 1, "page_size": 10, "logs": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let test = client_for(&server, Some(TEST_TOKEN));

    // WHEN: Fetching with the dashboard's filter
    let filter = LogFilter::default()
        .with_date_range("2025-01-01T00:00:00Z", "2025-01-02T00:00:00Z")
        .with_page_size(10)
        .with_sort("timestamp:desc");
    let payload = test.client.fetch_logs(&filter).await.unwrap();

    // THEN: The raw query string is exactly as serialized
    let requests = received(&server).await;
    assert_eq!(
        requests[0].url.query(),
        Some(
            "start_date=2025-01-01T00%3A00%3A00Z&end_date=2025-01-02T00%3A00%3A00Z&page_size=10&sort=timestamp%3Adesc"
        )
    );

    // AND: The payload is returned unmodified
    assert_eq!(payload["page_size"], 10);
}

#[tokio::test]
async fn given_empty_log_filter_when_fetching_logs_then_no_query_string() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/logs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "logs": [] })))
        .mount(&server)
        .await;

    let test = client_for(&server, None);
    test.client.fetch_logs(&LogFilter::default()).await.unwrap();

    let requests = received(&server).await;
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn given_size_when_fetching_by_ip_then_size_query_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/statistics/by-ip"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "statistics": [] })))
        .mount(&server)
        .await;

    let test = client_for(&server, None);
    let filter = IpStatisticsFilter {
        size: Some(20),
        ..Default::default()
    };
    test.client.fetch_by_ip(&filter).await.unwrap();

    let requests = received(&server).await;
    assert_eq!(requests[0].url.path(), "/api/v1/admin/statistics/by-ip");
    assert_eq!(requests[0].url.query(), Some("size=20"));
}

#[tokio::test]
async fn given_interval_when_fetching_timeline_then_interval_query_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/statistics/timeline"))
        .and(query_param("interval", "1h"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "timeline": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let test = client_for(&server, None);
    let filter = TimelineFilter {
        interval: Some("1h".into()),
        ..Default::default()
    };

    let payload = test.client.fetch_timeline(&filter).await.unwrap();

    assert_eq!(payload, json!({ "timeline": [] }));
}

#[tokio::test]
async fn given_date_range_when_fetching_statistics_then_both_dates_sent() {
    let server = MockServer::start().await;
    for route in [
        "/api/v1/admin/statistics/overview",
        "/api/v1/admin/statistics/by-pii-type",
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .and(query_param("start_date", "2025-01-01"))
            .and(query_param("end_date", "2025-01-31"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;
    }

    let test = client_for(&server, None);
    let range = DateRange::between("2025-01-01", "2025-01-31");

    test.client.fetch_overview(&range).await.unwrap();
    test.client.fetch_by_pii_type(&range).await.unwrap();
}

#[tokio::test]
async fn given_entity_when_fetching_setting_then_entity_in_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/pii-settings/EMAIL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entity_type": "EMAIL", "enabled": true, "threshold": 70
        })))
        .expect(1)
        .mount(&server)
        .await;

    let test = client_for(&server, Some(TEST_TOKEN));
    let payload = test.client.fetch_setting("EMAIL").await.unwrap();

    assert_eq!(payload["threshold"], 70);
}

/// **VALUE**: Verifies a partial setting update is a PATCH carrying only the supplied field.
///
/// **WHY THIS MATTERS**: Toggling detection off for one entity must not reset
/// its threshold. The backend applies exactly what it receives.
///
/// **BUG THIS CATCHES**: Would catch the wrong HTTP method, a `null`
/// threshold in the body, or the entity missing from the path.
#[tokio::test]
async fn given_enabled_only_when_updating_setting_then_patch_with_partial_body() {
    // GIVEN: A backend expecting exactly {"enabled": false}
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/admin/pii-settings/email"))
        .and(body_json(json!({ "enabled": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entity_type": "email", "enabled": false, "threshold": 59
        })))
        .expect(1)
        .mount(&server)
        .await;

    let test = client_for(&server, Some(TEST_TOKEN));

    // WHEN: Disabling detection
    let update = SettingUpdate::default().with_enabled(false);
    let payload = test.client.update_setting("email", &update).await.unwrap();

    // THEN: The raw body matches byte for byte and the response is returned
    let requests = received(&server).await;
    assert_eq!(requests[0].body, br#"{"enabled":false}"#);
    assert_eq!(payload["enabled"], false);
}

/// **VALUE**: Verifies a dot-segment entity is refused before anything is sent.
///
/// **BUG THIS CATCHES**: Would catch `settings update ..` being resolved to
/// `PATCH /api/v1/admin/pii-settings/..`, which URL parsing turns into a PATCH
/// of the admin root.
#[tokio::test]
async fn given_dot_segment_entity_when_updating_setting_then_nothing_sent() {
    let server = MockServer::start().await;
    let test = client_for(&server, Some(TEST_TOKEN));

    let update = SettingUpdate::default().with_enabled(false);
    let result = test.client.update_setting("..", &update).await;

    assert!(matches!(result, Err(ApiClientError::InvalidRequest { .. })));
    assert!(received(&server).await.is_empty());
}

#[tokio::test]
async fn given_entity_with_slash_when_fetching_setting_then_single_encoded_segment_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let test = client_for(&server, Some(TEST_TOKEN));
    test.client.fetch_setting("../logs").await.unwrap();

    let requests = received(&server).await;
    assert_eq!(requests[0].url.path(), "/api/v1/admin/pii-settings/..%2Flogs");
}
