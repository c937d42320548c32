use serde::{Deserialize, Serialize};

/// Detection setting for one PII entity type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PiiSetting {
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub id: i64,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub entity_type: String,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub enabled: bool,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub threshold: u32,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub description: Option<String>,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub created_at: String,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub updated_at: String,
}

/// `GET /api/v1/admin/pii-settings`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PiiSettingsList {
    #[serde(deserialize_with = "crate::lenient::list")]
    pub settings: Vec<PiiSetting>,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub total: u64,
}

/// Partial update sent with `PATCH /api/v1/admin/pii-settings/{entity}`.
///
/// Only the fields that were supplied are serialized; `{}` is a valid
/// (no-op) update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u32>,
}

impl SettingUpdate {
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_none() && self.threshold.is_none()
    }
}
