//! Per-table constraint query adapter.

use std::sync::Arc;

use async_trait::async_trait;

use maskadmin_core::constraint::ConstraintKind;
use maskadmin_core::workflow::Id;
use maskadmin_console::services::{ConstraintService, ServiceError};

use crate::gateway::ApiGateway;

pub struct ConstraintsApi {
    gateway: Arc<ApiGateway>,
}

impl ConstraintsApi {
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }
}

/// Trailing path segment per constraint kind. Triggers live outside
/// the `/constraints` group on the server.
fn route_suffix(kind: ConstraintKind) -> &'static str {
    match kind {
        ConstraintKind::PrimaryKeys => "constraints/primary-keys",
        ConstraintKind::ForeignKeys => "constraints/foreign-keys",
        ConstraintKind::UniqueConstraints => "constraints/unique",
        ConstraintKind::CheckConstraints => "constraints/check",
        ConstraintKind::Indexes => "constraints/indexes",
        ConstraintKind::Triggers => "triggers",
    }
}

#[async_trait]
impl ConstraintService for ConstraintsApi {
    async fn check(
        &self,
        kind: ConstraintKind,
        connection_id: Id,
        schema: &str,
        table: &str,
    ) -> Result<Vec<serde_json::Value>, ServiceError> {
        let url = self.gateway.url(&format!(
            "/connections/{connection_id}/tables/{schema}/{table}/{}",
            route_suffix(kind)
        ));
        Ok(self.gateway.get(url).await?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
