//! Connection management adapter.
//!
//! Only `list` sits behind the console trait (the wizard's BasicInfo
//! step); the management calls are plain methods for the connection
//! administration surface.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use maskadmin_console::services::{ConnectionService, ConnectionSummary, ServiceError};
use maskadmin_core::workflow::Id;

use crate::gateway::ApiGateway;

/// Payload for registering or testing a connection.
#[derive(Debug, Clone, Serialize)]
pub struct NewConnection {
    pub name: String,
    pub server: String,
    pub database: String,
    pub username: String,
    pub password: String,
}

/// Outcome of a connectivity test.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionTestResult {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

pub struct ConnectionsApi {
    gateway: Arc<ApiGateway>,
}

impl ConnectionsApi {
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }

    pub async fn get(&self, id: Id) -> Result<ConnectionSummary, ServiceError> {
        let url = self.gateway.url(&format!("/connections/{id}"));
        Ok(self.gateway.get(url).await?)
    }

    pub async fn create(&self, connection: &NewConnection) -> Result<ConnectionSummary, ServiceError> {
        let url = self.gateway.url("/connections");
        Ok(self.gateway.post(url, connection).await?)
    }

    pub async fn delete(&self, id: Id) -> Result<(), ServiceError> {
        let url = self.gateway.url(&format!("/connections/{id}"));
        Ok(self.gateway.delete(url).await?)
    }

    /// Probe connectivity without registering anything.
    pub async fn test(&self, connection: &NewConnection) -> Result<ConnectionTestResult, ServiceError> {
        let url = self.gateway.url("/connections/test");
        Ok(self.gateway.post(url, connection).await?)
    }
}

#[async_trait]
impl ConnectionService for ConnectionsApi {
    async fn list(&self) -> Result<Vec<ConnectionSummary>, ServiceError> {
        let url = self.gateway.url("/connections");
        Ok(self.gateway.get(url).await?)
    }
}
