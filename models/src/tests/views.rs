use crate::{
    IpStatisticsResponse, LogListResponse, PiiSettingsList, StatisticsOverview, decode_view,
};

use serde_json::json;

/// **VALUE**: Verifies a settings payload without a `settings` field reads as empty.
///
/// **WHY THIS MATTERS**: The settings page renders whatever list it gets. A
/// backend that answers `{}` or `{"total": 0}` must show an empty table, not
/// crash the page.
///
/// **BUG THIS CATCHES**: Would catch if `#[serde(default)]` is removed from
/// `PiiSettingsList`.
#[test]
fn given_settings_payload_without_list_when_viewed_then_list_is_empty() {
    // GIVEN: A payload missing the settings array
    let payload = json!({ "total": 0 });

    // WHEN: Decoding into the typed view
    let view: PiiSettingsList = decode_view(&payload).unwrap();

    // THEN: The list is empty
    assert!(view.settings.is_empty());
    assert_eq!(view.total, 0);
}

/// **VALUE**: Verifies a payload of the wrong JSON kind is reported, not
/// silently replaced by an empty page.
///
/// **BUG THIS CATCHES**: Would catch a fallback to `Default` that prints
/// "no results" while the backend actually answered something else.
#[test]
fn given_non_object_payload_when_viewed_then_error() {
    let result = decode_view::<LogListResponse>(&json!("unexpected"));

    assert!(result.is_err());
}

/// **VALUE**: Verifies one bad field in one record costs only that field.
///
/// **WHY THIS MATTERS**: The backend sends `null` for optional columns such
/// as `reason`. Losing the whole page over it would show 57 matching logs as
/// an empty table.
///
/// **BUG THIS CATCHES**: Would catch a struct-level decode failure
/// discarding every other field of the payload.
#[test]
fn given_null_and_mistyped_fields_when_viewed_then_rest_of_payload_kept() {
    // GIVEN: A log page with a null reason and a string-typed counter
    let payload = json!({
        "total": 57,
        "page": 1,
        "page_size": 20,
        "logs": [{
            "id": "a",
            "client_ip": "10.0.0.1",
            "reason": null,
            "entity_count": "three"
        }]
    });

    // WHEN: Decoding into the typed view
    let view: LogListResponse = decode_view(&payload).unwrap();

    // THEN: Only the bad fields fall back to their defaults
    assert_eq!(view.total, 57);
    assert_eq!(view.page_size, 20);
    assert_eq!(view.logs.len(), 1);
    assert_eq!(view.logs[0].client_ip, "10.0.0.1");
    assert_eq!(view.logs[0].reason, "");
    assert_eq!(view.logs[0].entity_count, 0);
}

#[test]
fn given_list_with_malformed_entry_when_viewed_then_entry_skipped() {
    let payload = json!({
        "statistics": [
            "not-an-object",
            { "client_ip": "10.0.0.2", "total_requests": 12, "most_detected_type": null }
        ]
    });

    let view: IpStatisticsResponse = decode_view(&payload).unwrap();

    assert_eq!(view.statistics.len(), 1);
    assert_eq!(view.statistics[0].client_ip, "10.0.0.2");
    assert_eq!(view.statistics[0].total_requests, 12);
    assert_eq!(view.statistics[0].most_detected_type, None);
}

#[test]
fn given_realistic_settings_payload_when_viewed_then_fields_decoded() {
    let payload = json!({
        "settings": [{
            "id": 1,
            "entity_type": "PERSON",
            "enabled": true,
            "threshold": 59,
            "description": "person name",
            "created_at": "2025-11-04T01:00:00Z",
            "updated_at": "2025-11-04T01:00:00Z"
        }],
        "total": 1
    });

    let view: PiiSettingsList = decode_view(&payload).unwrap();

    assert_eq!(view.total, 1);
    assert_eq!(view.settings[0].entity_type, "PERSON");
    assert_eq!(view.settings[0].threshold, 59);
    assert!(view.settings[0].enabled);
}

#[test]
fn given_log_entities_when_viewed_then_type_key_maps_to_entity_type() {
    let payload = json!({
        "total": 1,
        "page": 1,
        "page_size": 20,
        "logs": [{
            "id": "abc",
            "client_ip": "10.0.0.1",
            "has_pii": true,
            "detected_entities": [
                { "type": "PHONE", "value": "010-1234-5678", "confidence": 0.89, "token_count": 3 }
            ]
        }]
    });

    let view: LogListResponse = decode_view(&payload).unwrap();

    let log = &view.logs[0];
    assert_eq!(log.client_ip, "10.0.0.1");
    assert_eq!(log.detected_entities[0].entity_type, "PHONE");
    assert_eq!(log.entity_count, 0, "missing counters default to zero");
}

#[test]
fn given_partial_overview_when_viewed_then_missing_counters_are_zero() {
    let view: StatisticsOverview = decode_view(&json!({ "total_requests": 42 })).unwrap();

    assert_eq!(view.total_requests, 42);
    assert_eq!(view.detected_requests, 0);
    assert!(view.top_ips.is_empty());
}
