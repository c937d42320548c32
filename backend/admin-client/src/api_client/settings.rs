use super::{ApiClient, RequestOptions};

use crate::endpoints::Endpoint;
use crate::error::ApiClientError;

use models::SettingUpdate;

use log::debug;
use reqwest::Method;
use serde_json::Value;

impl ApiClient {
    /// Every entity type's detection setting.
    pub async fn fetch_all_settings(&self) -> Result<Value, ApiClientError> {
        self.fetch_json(&Endpoint::PiiSettings.path(), RequestOptions::default())
            .await
    }

    /// One entity type's detection setting, e.g. `PERSON` or `email`.
    pub async fn fetch_setting(&self, entity_type: &str) -> Result<Value, ApiClientError> {
        let endpoint = Endpoint::pii_setting(entity_type)?;
        self.fetch_json(&endpoint.path(), RequestOptions::default())
            .await
    }

    /// PATCH only the supplied fields of one entity type's setting.
    pub async fn update_setting(
        &self,
        entity_type: &str,
        update: &SettingUpdate,
    ) -> Result<Value, ApiClientError> {
        let endpoint = Endpoint::pii_setting(entity_type)?;
        let body = serde_json::to_string(update)?;
        debug!("Updating {entity_type} setting: {body}");

        let options = RequestOptions::new(Method::PATCH).with_body(body);
        self.fetch_json(&endpoint.path(), options).await
    }
}
