//! Collaborator traits and the structured error taxonomy.
//!
//! The console never talks HTTP directly; it consumes these traits.
//! `maskadmin-client` implements them over the API gateway, tests
//! implement them in memory. Domain rejections arrive pre-classified
//! as a [`RejectionCategory`] so controllers never inspect message
//! text; the message is display-only.

use async_trait::async_trait;
use serde::Deserialize;

use maskadmin_core::constraint::ConstraintKind;
use maskadmin_core::execution::{ExecutionRecord, ExecutionStatus};
use maskadmin_core::mapping::ColumnDescriptor;
use maskadmin_core::pii_catalog::PiiAttributeCatalog;
use maskadmin_core::workflow::{Id, WorkflowDefinition, WorkflowPayload};

/// Why the server said "no" to an otherwise well-formed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionCategory {
    /// The execution is already in (or moving to) the requested state.
    AlreadyInState,
    /// The execution already finished (completed or failed).
    Finished,
    /// Any other business-rule rejection.
    Other,
}

impl RejectionCategory {
    /// Already-in-state and finished rejections are informational, not
    /// errors.
    pub fn is_informational(self) -> bool {
        matches!(self, Self::AlreadyInState | Self::Finished)
    }
}

/// Failure surface of every collaborator call.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ServiceError {
    /// The server rejected the request for a business reason.
    #[error("{message}")]
    Rejected {
        category: RejectionCategory,
        message: String,
    },

    /// The request never completed (network, timeout, decode).
    #[error("Network error: {0}")]
    Transport(String),

    /// The addressed entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The credential was rejected.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

/// A registered database connection, as offered in the wizard.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionSummary {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub server: String,
    #[serde(default)]
    pub database: String,
}

/// Acknowledgement of a successful execute command.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionStarted {
    pub execution_id: Id,
    #[serde(default)]
    pub task_id: Option<String>,
    pub status: ExecutionStatus,
    #[serde(default)]
    pub message: Option<String>,
}

/// Acknowledgement of a pause/resume/stop command.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandAck {
    #[serde(default)]
    pub status: Option<ExecutionStatus>,
    /// Batch the run paused or stopped after, when reported.
    #[serde(default)]
    pub last_completed_batch: Option<i64>,
    /// Batch a resumed run continues from, when reported.
    #[serde(default)]
    pub resume_from_batch: Option<i64>,
}

/// One sampled row: original and masked values keyed by column name.
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewPair {
    pub original: serde_json::Map<String, serde_json::Value>,
    pub masked: serde_json::Map<String, serde_json::Value>,
}

/// Payload of a preview request.
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewPayload {
    #[serde(default)]
    pub schema_name: String,
    #[serde(default)]
    pub table_name: String,
    #[serde(default)]
    pub total_records: i64,
    #[serde(default)]
    pub sample_count: i64,
    #[serde(default)]
    pub preview_results: Vec<PreviewPair>,
}

/// Registered connections (Catalog collaborator, connection side).
#[async_trait]
pub trait ConnectionService: Send + Sync {
    async fn list(&self) -> Result<Vec<ConnectionSummary>, ServiceError>;
}

/// Schema/table/column discovery and the masking attribute catalog.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn schemas(&self, connection_id: Id) -> Result<Vec<String>, ServiceError>;

    async fn tables(&self, connection_id: Id, schema: &str) -> Result<Vec<String>, ServiceError>;

    async fn columns(
        &self,
        connection_id: Id,
        schema: &str,
        table: &str,
    ) -> Result<Vec<ColumnDescriptor>, ServiceError>;

    async fn pii_attributes(&self) -> Result<PiiAttributeCatalog, ServiceError>;
}

/// Workflow persistence.
#[async_trait]
pub trait WorkflowService: Send + Sync {
    async fn create(&self, payload: &WorkflowPayload) -> Result<WorkflowDefinition, ServiceError>;

    async fn update(
        &self,
        id: Id,
        payload: &WorkflowPayload,
    ) -> Result<WorkflowDefinition, ServiceError>;

    async fn get(&self, id: Id) -> Result<WorkflowDefinition, ServiceError>;

    async fn delete(&self, id: Id) -> Result<(), ServiceError>;

    async fn executions(&self, workflow_id: Id) -> Result<Vec<ExecutionRecord>, ServiceError>;
}

/// The masking execution service: start and control runs.
#[async_trait]
pub trait ExecutionService: Send + Sync {
    async fn execute(&self, workflow_id: Id) -> Result<ExecutionStarted, ServiceError>;

    async fn pause(&self, workflow_id: Id, execution_id: Id) -> Result<CommandAck, ServiceError>;

    async fn resume(&self, workflow_id: Id, execution_id: Id) -> Result<CommandAck, ServiceError>;

    async fn stop(&self, workflow_id: Id, execution_id: Id) -> Result<CommandAck, ServiceError>;
}

/// Per-table constraint discovery, one query per kind.
#[async_trait]
pub trait ConstraintService: Send + Sync {
    async fn check(
        &self,
        kind: ConstraintKind,
        connection_id: Id,
        schema: &str,
        table: &str,
    ) -> Result<Vec<serde_json::Value>, ServiceError>;
}

/// Original-vs-masked sampling for operator review.
#[async_trait]
pub trait PreviewService: Send + Sync {
    async fn preview(
        &self,
        workflow_id: Id,
        sample_count: u8,
    ) -> Result<PreviewPayload, ServiceError>;

    /// Standalone masked samples for a single attribute, used by the
    /// mapping step's attribute preview.
    async fn sample_data(
        &self,
        attribute: &str,
        count: u8,
    ) -> Result<Vec<String>, ServiceError>;
}
