use super::ApiClient;

use crate::endpoints::Endpoint;
use crate::error::ApiClientError;
use crate::query::LogFilter;

use serde_json::Value;

impl ApiClient {
    /// `GET /api/v1/admin/logs` with the supplied filters.
    ///
    /// Unset fields are left to the backend's defaults (page 1, 20 per page,
    /// newest first).
    pub async fn fetch_logs(&self, filter: &LogFilter) -> Result<Value, ApiClientError> {
        self.fetch_filtered(Endpoint::Logs, filter).await
    }
}
