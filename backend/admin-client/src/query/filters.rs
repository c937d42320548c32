use super::{QueryField, QueryFilter, flag, number, text};

/// Filters for `GET /api/v1/admin/logs`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    /// ISO 8601 lower bound.
    pub start_date: Option<String>,
    /// ISO 8601 upper bound.
    pub end_date: Option<String>,
    pub client_ip: Option<String>,
    pub has_pii: Option<bool>,
    pub entity_type: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    /// `field:asc` or `field:desc`, e.g. `timestamp:desc`.
    pub sort: Option<String>,
}

impl LogFilter {
    pub fn with_date_range(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date = Some(start.into());
        self.end_date = Some(end.into());
        self
    }

    pub fn with_client_ip(mut self, client_ip: impl Into<String>) -> Self {
        self.client_ip = Some(client_ip.into());
        self
    }

    pub fn with_has_pii(mut self, has_pii: bool) -> Self {
        self.has_pii = Some(has_pii);
        self
    }

    pub fn with_entity_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }
}

impl QueryFilter for LogFilter {
    const FIELDS: &'static [QueryField<Self>] = &[
        QueryField {
            name: "start_date",
            value: |f: &LogFilter| text(&f.start_date),
        },
        QueryField {
            name: "end_date",
            value: |f: &LogFilter| text(&f.end_date),
        },
        QueryField {
            name: "client_ip",
            value: |f: &LogFilter| text(&f.client_ip),
        },
        QueryField {
            name: "has_pii",
            value: |f: &LogFilter| flag(f.has_pii),
        },
        QueryField {
            name: "entity_type",
            value: |f: &LogFilter| text(&f.entity_type),
        },
        QueryField {
            name: "page",
            value: |f: &LogFilter| number(f.page),
        },
        QueryField {
            name: "page_size",
            value: |f: &LogFilter| number(f.page_size),
        },
        QueryField {
            name: "sort",
            value: |f: &LogFilter| text(&f.sort),
        },
    ];
}

/// Date window shared by the overview and by-PII-type statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl DateRange {
    pub fn between(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start_date: Some(start.into()),
            end_date: Some(end.into()),
        }
    }
}

impl QueryFilter for DateRange {
    const FIELDS: &'static [QueryField<Self>] = &[
        QueryField {
            name: "start_date",
            value: |f: &DateRange| text(&f.start_date),
        },
        QueryField {
            name: "end_date",
            value: |f: &DateRange| text(&f.end_date),
        },
    ];
}

/// Filters for `GET /api/v1/admin/statistics/timeline`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelineFilter {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Bucket width such as `1h`, `1d`, `1w`.
    pub interval: Option<String>,
}

impl QueryFilter for TimelineFilter {
    const FIELDS: &'static [QueryField<Self>] = &[
        QueryField {
            name: "start_date",
            value: |f: &TimelineFilter| text(&f.start_date),
        },
        QueryField {
            name: "end_date",
            value: |f: &TimelineFilter| text(&f.end_date),
        },
        QueryField {
            name: "interval",
            value: |f: &TimelineFilter| text(&f.interval),
        },
    ];
}

/// Filters for `GET /api/v1/admin/statistics/by-ip`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IpStatisticsFilter {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Maximum number of IPs returned.
    pub size: Option<u32>,
}

impl QueryFilter for IpStatisticsFilter {
    const FIELDS: &'static [QueryField<Self>] = &[
        QueryField {
            name: "start_date",
            value: |f: &IpStatisticsFilter| text(&f.start_date),
        },
        QueryField {
            name: "end_date",
            value: |f: &IpStatisticsFilter| text(&f.end_date),
        },
        QueryField {
            name: "size",
            value: |f: &IpStatisticsFilter| number(f.size),
        },
    ];
}
