use serde::{Deserialize, Serialize};

/// One detected entity inside a log record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectedEntity {
    #[serde(rename = "type", deserialize_with = "crate::lenient::or_default")]
    pub entity_type: String,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub value: String,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub confidence: f64,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub token_count: u64,
}

/// A single PII inspection log record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PiiLog {
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub id: String,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub timestamp: String,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub client_ip: String,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub original_text: String,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub text_length: u64,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub has_pii: bool,
    #[serde(deserialize_with = "crate::lenient::list")]
    pub detected_entities: Vec<DetectedEntity>,
    #[serde(deserialize_with = "crate::lenient::list")]
    pub entity_types: Vec<String>,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub entity_count: u64,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub blocked: bool,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub reason: String,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub response_time_ms: f64,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub policy_violation: bool,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub policy_judgment: Option<String>,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub policy_confidence: Option<f64>,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub model_version: String,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub api_version: String,
}

/// Paged result of `GET /api/v1/admin/logs`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogListResponse {
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub total: u64,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub page: u64,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub page_size: u64,
    #[serde(deserialize_with = "crate::lenient::list")]
    pub logs: Vec<PiiLog>,
}
