//! Logical operations of the admin API and their URL paths.
//!
//! Pure lookup: nothing here touches the network.

use crate::error::ApiClientError;

use std::borrow::Cow;

use url::Url;

pub const API_PREFIX: &str = "/api/v1";
pub const AUTH_PREFIX: &str = const_format::concatcp!(API_PREFIX, "/auth");
pub const ADMIN_PREFIX: &str = const_format::concatcp!(API_PREFIX, "/admin");

pub const LOGIN_PATH: &str = const_format::concatcp!(AUTH_PREFIX, "/login");
pub const CURRENT_USER_PATH: &str = const_format::concatcp!(AUTH_PREFIX, "/me");
pub const LOGS_PATH: &str = const_format::concatcp!(ADMIN_PREFIX, "/logs");
pub const STATISTICS_OVERVIEW_PATH: &str =
    const_format::concatcp!(ADMIN_PREFIX, "/statistics/overview");
pub const STATISTICS_TIMELINE_PATH: &str =
    const_format::concatcp!(ADMIN_PREFIX, "/statistics/timeline");
pub const STATISTICS_BY_PII_TYPE_PATH: &str =
    const_format::concatcp!(ADMIN_PREFIX, "/statistics/by-pii-type");
pub const STATISTICS_BY_IP_PATH: &str = const_format::concatcp!(ADMIN_PREFIX, "/statistics/by-ip");
pub const PII_SETTINGS_PATH: &str = const_format::concatcp!(ADMIN_PREFIX, "/pii-settings");

/// A logical operation of the admin API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    Login,
    CurrentUser,
    Logs,
    StatisticsOverview,
    StatisticsTimeline,
    StatisticsByPiiType,
    StatisticsByIp,
    PiiSettings,
    /// Detail and update of one entity type's setting. The entity is
    /// percent-encoded as a single path segment; build it through
    /// [`Endpoint::pii_setting`] to reject names that cannot be one.
    PiiSetting(&'a str),
}

impl<'a> Endpoint<'a> {
    /// Setting endpoint for `entity_type`.
    ///
    /// `.` and `..` are refused: URL parsing resolves them as dot segments
    /// even when percent-encoded, so they would address another route.
    #[track_caller]
    pub fn pii_setting(entity_type: &'a str) -> Result<Self, ApiClientError> {
        if matches!(entity_type, "" | "." | "..") {
            return Err(ApiClientError::invalid_request(format!(
                "entity type {entity_type:?} is not a valid path segment"
            )));
        }
        Ok(Endpoint::PiiSetting(entity_type))
    }

    pub fn path(&self) -> Cow<'static, str> {
        match self {
            Endpoint::Login => Cow::Borrowed(LOGIN_PATH),
            Endpoint::CurrentUser => Cow::Borrowed(CURRENT_USER_PATH),
            Endpoint::Logs => Cow::Borrowed(LOGS_PATH),
            Endpoint::StatisticsOverview => Cow::Borrowed(STATISTICS_OVERVIEW_PATH),
            Endpoint::StatisticsTimeline => Cow::Borrowed(STATISTICS_TIMELINE_PATH),
            Endpoint::StatisticsByPiiType => Cow::Borrowed(STATISTICS_BY_PII_TYPE_PATH),
            Endpoint::StatisticsByIp => Cow::Borrowed(STATISTICS_BY_IP_PATH),
            Endpoint::PiiSettings => Cow::Borrowed(PII_SETTINGS_PATH),
            Endpoint::PiiSetting(entity) => Cow::Owned(format!(
                "{PII_SETTINGS_PATH}/{}",
                urlencoding::encode(entity)
            )),
        }
    }

    /// Path with an already-serialized query string appended.
    ///
    /// An empty query leaves the path untouched (no dangling `?`).
    pub fn with_query(&self, query: &str) -> String {
        let path = self.path();
        if query.is_empty() {
            path.into_owned()
        } else {
            format!("{path}?{query}")
        }
    }
}

/// Join a base origin and an endpoint into a full URL.
///
/// Absolute endpoints (`http://`, `https://`) are used verbatim. Otherwise a
/// single trailing slash is dropped from the base and a leading slash is
/// ensured on the endpoint, so a base with a path prefix keeps its prefix.
pub fn resolve_endpoint_url(base_url: &str, endpoint: &str) -> Result<Url, ApiClientError> {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        return Ok(Url::parse(endpoint)?);
    }

    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    let url = if endpoint.starts_with('/') {
        format!("{base}{endpoint}")
    } else {
        format!("{base}/{endpoint}")
    };

    Ok(Url::parse(&url)?)
}
