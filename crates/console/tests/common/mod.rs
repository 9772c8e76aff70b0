//! In-memory collaborator doubles.
//!
//! Every mock counts its calls so tests can assert that a denied or
//! deduplicated command issued no request at all.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use maskadmin_console::services::{
    CatalogService, CommandAck, ConnectionService, ConnectionSummary, ConstraintService,
    ExecutionService, ExecutionStarted, PreviewPair, PreviewPayload, PreviewService, ServiceError,
    WorkflowService,
};
use maskadmin_console::wizard::WizardServices;
use maskadmin_core::constraint::ConstraintKind;
use maskadmin_core::execution::{ExecutionRecord, ExecutionStatus};
use maskadmin_core::mapping::ColumnDescriptor;
use maskadmin_core::pii_catalog::PiiAttributeCatalog;
use maskadmin_core::workflow::{Id, WorkflowDefinition, WorkflowPayload, WorkflowStatus};

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

pub fn connection(id: Id, name: &str) -> ConnectionSummary {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "name": name,
        "server": "db.internal",
        "database": "hr",
    }))
    .unwrap()
}

pub fn execution(id: Id, workflow_id: Id, status: ExecutionStatus) -> ExecutionRecord {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "workflow_id": workflow_id,
        "status": status.as_str(),
        "started_at": null,
    }))
    .unwrap()
}

pub fn column(name: &str, data_type: &str) -> ColumnDescriptor {
    ColumnDescriptor {
        name: name.to_string(),
        data_type: data_type.to_string(),
    }
}

pub fn catalog_with(string: &[&str], date: &[&str], numeric: &[&str]) -> PiiAttributeCatalog {
    let payload = serde_json::from_value(serde_json::json!({
        "string": string,
        "date": date,
        "numeric": numeric,
    }))
    .unwrap();
    PiiAttributeCatalog::from_payload(payload)
}

pub fn row_pair(original: serde_json::Value, masked: serde_json::Value) -> PreviewPair {
    serde_json::from_value(serde_json::json!({
        "original": original,
        "masked": masked,
    }))
    .unwrap()
}

pub fn preview_payload(pairs: Vec<PreviewPair>) -> PreviewPayload {
    PreviewPayload {
        schema_name: "dbo".to_string(),
        table_name: "employees".to_string(),
        total_records: 120,
        sample_count: pairs.len() as i64,
        preview_results: pairs,
    }
}

pub fn definition_from(id: Id, payload: &WorkflowPayload) -> WorkflowDefinition {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "name": payload.name,
        "description": payload.description,
        "connection_id": payload.connection_id,
        "table_mappings": serde_json::to_value(&payload.table_mappings).unwrap(),
        "status": "draft",
    }))
    .unwrap()
}

// ---------------------------------------------------------------------------
// Mocks
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MockConnections {
    pub connections: Vec<ConnectionSummary>,
    pub list_calls: AtomicUsize,
}

#[async_trait]
impl ConnectionService for MockConnections {
    async fn list(&self) -> Result<Vec<ConnectionSummary>, ServiceError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.connections.clone())
    }
}

#[derive(Default)]
pub struct MockCatalog {
    pub schemas: Vec<String>,
    pub tables: Vec<String>,
    pub columns: Vec<ColumnDescriptor>,
    pub attributes: PiiAttributeCatalog,
    pub schema_calls: AtomicUsize,
    pub table_calls: AtomicUsize,
    pub column_calls: AtomicUsize,
}

#[async_trait]
impl CatalogService for MockCatalog {
    async fn schemas(&self, _connection_id: Id) -> Result<Vec<String>, ServiceError> {
        self.schema_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.schemas.clone())
    }

    async fn tables(&self, _connection_id: Id, _schema: &str) -> Result<Vec<String>, ServiceError> {
        self.table_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.tables.clone())
    }

    async fn columns(
        &self,
        _connection_id: Id,
        _schema: &str,
        _table: &str,
    ) -> Result<Vec<ColumnDescriptor>, ServiceError> {
        self.column_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.columns.clone())
    }

    async fn pii_attributes(&self) -> Result<PiiAttributeCatalog, ServiceError> {
        Ok(self.attributes.clone())
    }
}

#[derive(Default)]
pub struct MockWorkflows {
    /// Returned by `get`.
    pub definition: Mutex<Option<WorkflowDefinition>>,
    /// Returned by `executions`, after `executions_delay` if set.
    pub executions: Mutex<Vec<ExecutionRecord>>,
    pub executions_delay: Option<Duration>,
    /// Next `create` fails with this instead.
    pub create_error: Mutex<Option<ServiceError>>,
    pub created: Mutex<Vec<WorkflowPayload>>,
    pub updated: Mutex<Vec<(Id, WorkflowPayload)>>,
    pub executions_calls: AtomicUsize,
}

#[async_trait]
impl WorkflowService for MockWorkflows {
    async fn create(&self, payload: &WorkflowPayload) -> Result<WorkflowDefinition, ServiceError> {
        if let Some(error) = self.create_error.lock().unwrap().take() {
            return Err(error);
        }
        self.created.lock().unwrap().push(payload.clone());
        Ok(definition_from(1, payload))
    }

    async fn update(
        &self,
        id: Id,
        payload: &WorkflowPayload,
    ) -> Result<WorkflowDefinition, ServiceError> {
        self.updated.lock().unwrap().push((id, payload.clone()));
        Ok(definition_from(id, payload))
    }

    async fn get(&self, id: Id) -> Result<WorkflowDefinition, ServiceError> {
        self.definition
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ServiceError::NotFound(format!("workflow {id}")))
    }

    async fn delete(&self, _id: Id) -> Result<(), ServiceError> {
        Ok(())
    }

    async fn executions(&self, _workflow_id: Id) -> Result<Vec<ExecutionRecord>, ServiceError> {
        self.executions_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.executions_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.executions.lock().unwrap().clone())
    }
}

pub struct MockExecutions {
    /// Applied before answering any command.
    pub delay: Option<Duration>,
    pub execute_result: Mutex<Result<ExecutionStarted, ServiceError>>,
    pub pause_result: Mutex<Result<CommandAck, ServiceError>>,
    pub resume_result: Mutex<Result<CommandAck, ServiceError>>,
    pub stop_result: Mutex<Result<CommandAck, ServiceError>>,
    pub execute_calls: AtomicUsize,
    pub pause_calls: AtomicUsize,
    pub resume_calls: AtomicUsize,
    pub stop_calls: AtomicUsize,
}

impl Default for MockExecutions {
    fn default() -> Self {
        let ack = CommandAck {
            status: None,
            last_completed_batch: None,
            resume_from_batch: None,
        };
        let started: ExecutionStarted = serde_json::from_value(serde_json::json!({
            "execution_id": 100,
            "status": "queued",
        }))
        .unwrap();
        Self {
            delay: None,
            execute_result: Mutex::new(Ok(started)),
            pause_result: Mutex::new(Ok(ack.clone())),
            resume_result: Mutex::new(Ok(ack.clone())),
            stop_result: Mutex::new(Ok(ack)),
            execute_calls: AtomicUsize::new(0),
            pause_calls: AtomicUsize::new(0),
            resume_calls: AtomicUsize::new(0),
            stop_calls: AtomicUsize::new(0),
        }
    }
}

impl MockExecutions {
    async fn settle(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl ExecutionService for MockExecutions {
    async fn execute(&self, _workflow_id: Id) -> Result<ExecutionStarted, ServiceError> {
        self.execute_calls.fetch_add(1, Ordering::SeqCst);
        self.settle().await;
        self.execute_result.lock().unwrap().clone()
    }

    async fn pause(&self, _workflow_id: Id, _execution_id: Id) -> Result<CommandAck, ServiceError> {
        self.pause_calls.fetch_add(1, Ordering::SeqCst);
        self.settle().await;
        self.pause_result.lock().unwrap().clone()
    }

    async fn resume(
        &self,
        _workflow_id: Id,
        _execution_id: Id,
    ) -> Result<CommandAck, ServiceError> {
        self.resume_calls.fetch_add(1, Ordering::SeqCst);
        self.settle().await;
        self.resume_result.lock().unwrap().clone()
    }

    async fn stop(&self, _workflow_id: Id, _execution_id: Id) -> Result<CommandAck, ServiceError> {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        self.settle().await;
        self.stop_result.lock().unwrap().clone()
    }
}

#[derive(Default)]
pub struct MockConstraints {
    pub rows: Mutex<HashMap<ConstraintKind, Vec<serde_json::Value>>>,
    /// Checks of this kind fail.
    pub fail_kind: Mutex<Option<ConstraintKind>>,
    pub check_calls: AtomicUsize,
}

#[async_trait]
impl ConstraintService for MockConstraints {
    async fn check(
        &self,
        kind: ConstraintKind,
        _connection_id: Id,
        _schema: &str,
        _table: &str,
    ) -> Result<Vec<serde_json::Value>, ServiceError> {
        self.check_calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail_kind.lock().unwrap() == Some(kind) {
            return Err(ServiceError::Transport(format!(
                "{} query timed out",
                kind.as_str()
            )));
        }
        Ok(self.rows.lock().unwrap().get(&kind).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
pub struct MockPreview {
    pub result: Mutex<Option<Result<PreviewPayload, ServiceError>>>,
    pub samples: Vec<String>,
    pub preview_calls: AtomicUsize,
}

#[async_trait]
impl PreviewService for MockPreview {
    async fn preview(
        &self,
        _workflow_id: Id,
        _sample_count: u8,
    ) -> Result<PreviewPayload, ServiceError> {
        self.preview_calls.fetch_add(1, Ordering::SeqCst);
        self.result
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(preview_payload(Vec::new())))
    }

    async fn sample_data(&self, _attribute: &str, _count: u8) -> Result<Vec<String>, ServiceError> {
        Ok(self.samples.clone())
    }
}

// ---------------------------------------------------------------------------
// Bundles
// ---------------------------------------------------------------------------

/// The standard mock set for wizard tests: one connection, one schema
/// with two tables, and an employees table with three columns.
pub struct Mocks {
    pub connections: Arc<MockConnections>,
    pub catalog: Arc<MockCatalog>,
    pub workflows: Arc<MockWorkflows>,
    pub preview: Arc<MockPreview>,
}

impl Mocks {
    pub fn employees() -> Self {
        Self {
            connections: Arc::new(MockConnections {
                connections: vec![connection(7, "HR warehouse")],
                ..Default::default()
            }),
            catalog: Arc::new(MockCatalog {
                schemas: vec!["dbo".to_string()],
                tables: vec!["employees".to_string(), "orders".to_string()],
                columns: vec![
                    column("email", "varchar(255)"),
                    column("birth_date", "date"),
                    column("salary", "decimal(10,2)"),
                ],
                attributes: catalog_with(&["email", "full_name"], &["birth_date"], &["salary"]),
                ..Default::default()
            }),
            workflows: Arc::new(MockWorkflows::default()),
            preview: Arc::new(MockPreview::default()),
        }
    }

    pub fn wizard_services(&self) -> WizardServices {
        WizardServices {
            connections: self.connections.clone(),
            catalog: self.catalog.clone(),
            workflows: self.workflows.clone(),
            preview: self.preview.clone(),
        }
    }
}

/// A definition as `get` would return it, with one mapped table.
pub fn stored_definition(status: WorkflowStatus) -> WorkflowDefinition {
    serde_json::from_value(serde_json::json!({
        "id": 42,
        "name": "Employee masking",
        "description": "quarterly refresh",
        "connection_id": 7,
        "table_mappings": [
            {
                "table_name": "employees",
                "schema_name": "dbo",
                "column_mappings": [
                    { "column_name": "email", "is_pii": true, "pii_attribute": "email" },
                    { "column_name": "salary", "is_pii": false, "pii_attribute": null }
                ],
                "where_conditions": []
            },
            {
                "table_name": "orders",
                "schema_name": "dbo",
                "column_mappings": [
                    { "column_name": "total", "is_pii": false, "pii_attribute": null }
                ],
                "where_conditions": []
            }
        ],
        "status": status.as_str(),
    }))
    .unwrap()
}
