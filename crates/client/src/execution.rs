//! Execution command adapter.

use std::sync::Arc;

use async_trait::async_trait;

use maskadmin_core::workflow::Id;
use maskadmin_console::services::{CommandAck, ExecutionService, ExecutionStarted, ServiceError};

use crate::gateway::ApiGateway;

pub struct ExecutionApi {
    gateway: Arc<ApiGateway>,
}

impl ExecutionApi {
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }

    fn command_url(&self, workflow_id: Id, execution_id: Id, command: &str) -> String {
        self.gateway.url(&format!(
            "/workflows/{workflow_id}/executions/{execution_id}/{command}"
        ))
    }
}

#[async_trait]
impl ExecutionService for ExecutionApi {
    async fn execute(&self, workflow_id: Id) -> Result<ExecutionStarted, ServiceError> {
        let url = self.gateway.url(&format!("/workflows/{workflow_id}/execute"));
        Ok(self.gateway.post_empty(url).await?)
    }

    async fn pause(&self, workflow_id: Id, execution_id: Id) -> Result<CommandAck, ServiceError> {
        let url = self.command_url(workflow_id, execution_id, "pause");
        Ok(self.gateway.post_empty(url).await?)
    }

    async fn resume(&self, workflow_id: Id, execution_id: Id) -> Result<CommandAck, ServiceError> {
        let url = self.command_url(workflow_id, execution_id, "resume");
        Ok(self.gateway.post_empty(url).await?)
    }

    async fn stop(&self, workflow_id: Id, execution_id: Id) -> Result<CommandAck, ServiceError> {
        let url = self.command_url(workflow_id, execution_id, "stop");
        Ok(self.gateway.post_empty(url).await?)
    }
}
