//! Response models for the PII admin backend.
//!
//! This crate contains pure data structures mirroring the JSON the admin
//! API returns. The client layer hands payloads back as raw
//! `serde_json::Value`; these types are the caller-side view of them.
//!
//! Every struct is lenient per field: a missing, `null` or wrongly typed
//! field decodes to its default, and a list entry that cannot be decoded is
//! skipped, without discarding the rest of the payload.

pub mod auth;
pub mod lenient;
pub mod logs;
pub mod settings;
pub mod statistics;

pub use auth::{CurrentUser, TokenResponse};
pub use logs::{DetectedEntity, LogListResponse, PiiLog};
pub use settings::{PiiSetting, PiiSettingsList, SettingUpdate};
pub use statistics::{
    IpStatistics, IpStatisticsResponse, PiiTypeStatistics, PiiTypeStatisticsResponse,
    StatisticsOverview, TimelinePoint, TimelineResponse,
};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode a payload into its typed view.
///
/// Field-level problems never fail here. An error means the payload is not
/// the expected kind of JSON at all (e.g. a bare string or `null` where an
/// object belongs); callers decide how to show that.
pub fn decode_view<T>(payload: &Value) -> Result<T, serde_json::Error>
where
    T: DeserializeOwned,
{
    T::deserialize(payload)
}

#[cfg(test)]
mod tests;
