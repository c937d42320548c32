use super::ApiClient;

use crate::endpoints::Endpoint;
use crate::error::ApiClientError;
use crate::query::{DateRange, IpStatisticsFilter, TimelineFilter};

use serde_json::Value;

impl ApiClient {
    pub async fn fetch_overview(&self, range: &DateRange) -> Result<Value, ApiClientError> {
        self.fetch_filtered(Endpoint::StatisticsOverview, range)
            .await
    }

    pub async fn fetch_timeline(&self, filter: &TimelineFilter) -> Result<Value, ApiClientError> {
        self.fetch_filtered(Endpoint::StatisticsTimeline, filter)
            .await
    }

    pub async fn fetch_by_pii_type(&self, range: &DateRange) -> Result<Value, ApiClientError> {
        self.fetch_filtered(Endpoint::StatisticsByPiiType, range)
            .await
    }

    pub async fn fetch_by_ip(&self, filter: &IpStatisticsFilter) -> Result<Value, ApiClientError> {
        self.fetch_filtered(Endpoint::StatisticsByIp, filter).await
    }
}
