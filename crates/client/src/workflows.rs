//! Workflow persistence adapter.

use std::sync::Arc;

use async_trait::async_trait;

use maskadmin_core::execution::ExecutionRecord;
use maskadmin_core::workflow::{Id, WorkflowDefinition, WorkflowPayload};
use maskadmin_console::services::{ServiceError, WorkflowService};

use crate::gateway::ApiGateway;

pub struct WorkflowsApi {
    gateway: Arc<ApiGateway>,
}

impl WorkflowsApi {
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }

    /// All workflows visible to the caller.
    pub async fn list(&self) -> Result<Vec<WorkflowDefinition>, ServiceError> {
        let url = self.gateway.url("/workflows");
        Ok(self.gateway.get(url).await?)
    }
}

#[async_trait]
impl WorkflowService for WorkflowsApi {
    async fn create(&self, payload: &WorkflowPayload) -> Result<WorkflowDefinition, ServiceError> {
        let url = self.gateway.url("/workflows");
        Ok(self.gateway.post(url, payload).await?)
    }

    async fn update(
        &self,
        id: Id,
        payload: &WorkflowPayload,
    ) -> Result<WorkflowDefinition, ServiceError> {
        let url = self.gateway.url(&format!("/workflows/{id}"));
        Ok(self.gateway.put(url, payload).await?)
    }

    async fn get(&self, id: Id) -> Result<WorkflowDefinition, ServiceError> {
        let url = self.gateway.url(&format!("/workflows/{id}"));
        Ok(self.gateway.get(url).await?)
    }

    async fn delete(&self, id: Id) -> Result<(), ServiceError> {
        let url = self.gateway.url(&format!("/workflows/{id}"));
        Ok(self.gateway.delete(url).await?)
    }

    async fn executions(&self, workflow_id: Id) -> Result<Vec<ExecutionRecord>, ServiceError> {
        let url = self.gateway.url(&format!("/workflows/{workflow_id}/executions"));
        Ok(self.gateway.get(url).await?)
    }
}
