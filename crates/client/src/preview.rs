//! Masking preview adapter.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use maskadmin_core::workflow::Id;
use maskadmin_console::services::{PreviewPayload, PreviewService, ServiceError};

use crate::gateway::ApiGateway;

pub struct PreviewApi {
    gateway: Arc<ApiGateway>,
}

impl PreviewApi {
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }
}

#[derive(Deserialize)]
struct SampleDataPayload {
    #[serde(default)]
    samples: Vec<String>,
}

#[async_trait]
impl PreviewService for PreviewApi {
    async fn preview(
        &self,
        workflow_id: Id,
        sample_count: u8,
    ) -> Result<PreviewPayload, ServiceError> {
        let url = self.gateway.url(&format!(
            "/workflows/{workflow_id}/preview?sample_count={sample_count}"
        ));
        Ok(self.gateway.get(url).await?)
    }

    async fn sample_data(&self, attribute: &str, count: u8) -> Result<Vec<String>, ServiceError> {
        let url = self.gateway.shared_url("/masking/sample-data");
        let body = serde_json::json!({ "pii_attribute": attribute, "count": count });
        let payload: SampleDataPayload = self.gateway.post(url, &body).await?;
        Ok(payload.samples)
    }
}
