//! Schema discovery and PII attribute catalog adapter.

use std::sync::Arc;

use async_trait::async_trait;

use maskadmin_core::mapping::ColumnDescriptor;
use maskadmin_core::pii_catalog::{PiiAttributeCatalog, PiiAttributePayload};
use maskadmin_core::workflow::Id;
use maskadmin_console::services::{CatalogService, ServiceError};

use crate::gateway::ApiGateway;

pub struct CatalogApi {
    gateway: Arc<ApiGateway>,
}

impl CatalogApi {
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl CatalogService for CatalogApi {
    async fn schemas(&self, connection_id: Id) -> Result<Vec<String>, ServiceError> {
        let url = self.gateway.url(&format!("/connections/{connection_id}/schemas"));
        Ok(self.gateway.get(url).await?)
    }

    async fn tables(&self, connection_id: Id, schema: &str) -> Result<Vec<String>, ServiceError> {
        let url = self
            .gateway
            .url(&format!("/connections/{connection_id}/schemas/{schema}/tables"));
        Ok(self.gateway.get(url).await?)
    }

    async fn columns(
        &self,
        connection_id: Id,
        schema: &str,
        table: &str,
    ) -> Result<Vec<ColumnDescriptor>, ServiceError> {
        let url = self.gateway.url(&format!(
            "/connections/{connection_id}/schemas/{schema}/tables/{table}/columns"
        ));
        Ok(self.gateway.get(url).await?)
    }

    async fn pii_attributes(&self) -> Result<PiiAttributeCatalog, ServiceError> {
        // Served from the API root in every deployment profile.
        let url = self.gateway.shared_url("/workflows/pii-attributes");
        let payload: PiiAttributePayload = self.gateway.get(url).await?;
        Ok(PiiAttributeCatalog::from_payload(payload))
    }
}
