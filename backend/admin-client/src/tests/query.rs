// Unit tests for query-string serialization

use crate::query::{DateRange, IpStatisticsFilter, LogFilter, QueryFilter, TimelineFilter};

/// **VALUE**: Verifies that an empty filter serializes to nothing at all.
///
/// **WHY THIS MATTERS**: Unset fields must fall through to the backend's own
/// defaults. Sending `client_ip=` would filter for an empty IP and return no logs.
///
/// **BUG THIS CATCHES**: Would catch any field being emitted when absent.
#[test]
fn given_empty_filter_when_serialized_then_empty_string() {
    assert_eq!(LogFilter::default().to_query_string(), "");
    assert_eq!(DateRange::default().to_query_string(), "");
    assert_eq!(TimelineFilter::default().to_query_string(), "");
    assert_eq!(IpStatisticsFilter::default().to_query_string(), "");
}

#[test]
fn given_single_page_field_when_serialized_then_only_that_field() {
    let filter = LogFilter::default().with_page(1);

    assert_eq!(filter.to_query_string(), "page=1");
}

/// **VALUE**: Verifies booleans serialize as literal `true`/`false`.
///
/// **BUG THIS CATCHES**: Would catch `has_pii: Some(false)` being treated as
/// absent, which would drop the "only clean requests" filter.
#[test]
fn given_has_pii_flag_when_serialized_then_literal_boolean() {
    let with_pii = LogFilter::default().with_has_pii(true);
    let without_pii = LogFilter::default().with_has_pii(false);

    assert_eq!(with_pii.to_query_string(), "has_pii=true");
    assert_eq!(without_pii.to_query_string(), "has_pii=false");
}

#[test]
fn given_numeric_fields_when_serialized_then_decimal_form() {
    let filter = LogFilter::default().with_page_size(20);
    let by_ip = IpStatisticsFilter {
        size: Some(20),
        ..Default::default()
    };

    assert_eq!(filter.to_query_string(), "page_size=20");
    assert_eq!(by_ip.to_query_string(), "size=20");
}

/// **VALUE**: Verifies the dashboard's "recent logs" query serializes exactly.
///
/// **WHY THIS MATTERS**: Dates and sort keys contain `:`. The encoding must
/// match what a browser's URLSearchParams produces so server-side caching
/// and access logs line up between the web dashboard and this client.
#[test]
fn given_recent_logs_filter_when_serialized_then_encoded_in_fixed_order() {
    // GIVEN: Fields set in a different order than the serialization table
    let filter = LogFilter::default()
        .with_sort("timestamp:desc")
        .with_page_size(10)
        .with_date_range("2025-01-01T00:00:00Z", "2025-01-02T00:00:00Z");

    // WHEN: Serializing
    let query = filter.to_query_string();

    // THEN: Table order wins and values are form-encoded
    assert_eq!(
        query,
        "start_date=2025-01-01T00%3A00%3A00Z&end_date=2025-01-02T00%3A00%3A00Z&page_size=10&sort=timestamp%3Adesc"
    );
}

#[test]
fn given_all_log_fields_when_serialized_then_every_field_in_table_order() {
    let filter = LogFilter {
        start_date: Some("a".into()),
        end_date: Some("b".into()),
        client_ip: Some("10.0.0.1".into()),
        has_pii: Some(true),
        entity_type: Some("PERSON".into()),
        page: Some(2),
        page_size: Some(50),
        sort: Some("timestamp:asc".into()),
    };

    assert_eq!(
        filter.to_query_string(),
        "start_date=a&end_date=b&client_ip=10.0.0.1&has_pii=true&entity_type=PERSON&page=2&page_size=50&sort=timestamp%3Aasc"
    );
}

/// **VALUE**: Verifies present-but-empty strings are treated as absent.
#[test]
fn given_empty_string_field_when_serialized_then_omitted() {
    let filter = LogFilter {
        client_ip: Some(String::new()),
        entity_type: Some("EMAIL".into()),
        ..Default::default()
    };

    assert_eq!(filter.to_query_string(), "entity_type=EMAIL");
}

/// **VALUE**: Verifies zero is a supplied value, not an absent one.
///
/// **BUG THIS CATCHES**: Would catch a truthiness-style presence check that
/// drops `0`, letting the backend substitute its default instead of
/// rejecting the out-of-range value.
#[test]
fn given_zero_numeric_field_when_serialized_then_included() {
    let filter = LogFilter::default().with_page(0);

    assert_eq!(filter.to_query_string(), "page=0");
}

#[test]
fn given_timeline_interval_when_serialized_then_after_dates() {
    let filter = TimelineFilter {
        start_date: Some("2025-01-01".into()),
        end_date: None,
        interval: Some("1h".into()),
    };

    assert_eq!(filter.to_query_string(), "start_date=2025-01-01&interval=1h");
}

#[test]
fn given_value_with_space_when_serialized_then_form_encoded() {
    let filter = LogFilter::default().with_entity_type("CREDIT CARD");

    assert_eq!(filter.to_query_string(), "entity_type=CREDIT+CARD");
}
