use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `GET /api/v1/admin/statistics/overview`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatisticsOverview {
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub period: serde_json::Map<String, Value>,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub total_requests: u64,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub detected_requests: u64,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub detection_rate: f64,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub blocked_requests: u64,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub blocked_rate: f64,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub avg_response_time_ms: f64,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub unique_ips: u64,
    #[serde(deserialize_with = "crate::lenient::list")]
    pub top_detected_types: Vec<Value>,
    #[serde(deserialize_with = "crate::lenient::list")]
    pub top_ips: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelinePoint {
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub timestamp: String,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub total_requests: u64,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub detected_requests: u64,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub detection_rate: f64,
}

/// `GET /api/v1/admin/statistics/timeline`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineResponse {
    #[serde(deserialize_with = "crate::lenient::list")]
    pub timeline: Vec<TimelinePoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PiiTypeStatistics {
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub pii_type: String,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub count: u64,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub percentage: f64,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub avg_confidence: f64,
}

/// `GET /api/v1/admin/statistics/by-pii-type`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PiiTypeStatisticsResponse {
    #[serde(deserialize_with = "crate::lenient::list")]
    pub statistics: Vec<PiiTypeStatistics>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpStatistics {
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub client_ip: String,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub total_requests: u64,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub detected_requests: u64,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub detection_rate: f64,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub most_detected_type: Option<String>,
}

/// `GET /api/v1/admin/statistics/by-ip`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpStatisticsResponse {
    #[serde(deserialize_with = "crate::lenient::list")]
    pub statistics: Vec<IpStatistics>,
}
