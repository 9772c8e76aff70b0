//! Workflow drafts and persisted definitions.
//!
//! The wizard owns a mutable [`WorkflowDraft`]; on submission it is
//! transformed into the server-persisted [`WorkflowDefinition`] payload
//! shape (a single-entry `table_mappings` array). Editing an existing
//! definition flattens a multi-table definition to its first table
//! mapping; the stored definition keeps all mappings server-side.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::filter::{submittable_conditions, RowFilterCondition};
use crate::mapping::ColumnMapping;

/// Identifier type used for connections, workflows, and executions.
pub type Id = i64;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9 ]+$").expect("valid regex"));

/// Validate a workflow name: non-empty, letters, digits, and spaces
/// only.
pub fn validate_workflow_name(name: &str) -> Result<(), CoreError> {
    if name.is_empty() {
        return Err(CoreError::Validation(
            "Workflow name is required".to_string(),
        ));
    }
    if !NAME_RE.is_match(name) {
        return Err(CoreError::Validation(
            "Workflow name can only contain letters, numbers, and spaces".to_string(),
        ));
    }
    Ok(())
}

/// Lifecycle status of a persisted workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    Draft,
    Ready,
    Queued,
    Running,
    Paused,
    Completed,
    Failed,
    // Some deployments report this status as "cancelled".
    #[serde(alias = "cancelled")]
    Stopped,
}

impl WorkflowStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Ready => "ready",
            Self::Queued => "queued",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Stopped => "stopped",
        }
    }

    /// A running workflow may not be structurally edited.
    pub fn is_editable(self) -> bool {
        self != Self::Running
    }
}

/// One table's masking configuration inside a definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableMapping {
    pub table_name: String,
    pub schema_name: String,
    pub column_mappings: Vec<ColumnMapping>,
    #[serde(default)]
    pub where_conditions: Vec<RowFilterCondition>,
}

/// The server-persisted workflow definition.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowDefinition {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub connection_id: Id,
    #[serde(default)]
    pub table_mappings: Vec<TableMapping>,
    #[serde(default)]
    pub status: Option<WorkflowStatus>,
}

/// Payload for create/update requests.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowPayload {
    pub name: String,
    pub description: String,
    pub connection_id: Id,
    pub table_mappings: Vec<TableMapping>,
}

/// The in-progress workflow configuration owned by one wizard session.
#[derive(Debug, Clone, Default)]
pub struct WorkflowDraft {
    pub name: String,
    pub description: String,
    pub connection_id: Option<Id>,
    pub schema_name: String,
    pub table_name: String,
    pub column_mappings: Vec<ColumnMapping>,
    pub where_conditions: Vec<RowFilterCondition>,
}

impl WorkflowDraft {
    /// Pre-populate a draft from an existing definition for editing.
    ///
    /// Multi-table definitions are flattened to their first table
    /// mapping; definitions with no mappings load with empty table
    /// fields. Stored attributes come through as-is.
    pub fn from_definition(definition: &WorkflowDefinition) -> Self {
        let first = definition.table_mappings.first();
        Self {
            name: definition.name.clone(),
            description: definition.description.clone(),
            connection_id: Some(definition.connection_id),
            schema_name: first.map(|m| m.schema_name.clone()).unwrap_or_default(),
            table_name: first.map(|m| m.table_name.clone()).unwrap_or_default(),
            column_mappings: first.map(|m| m.column_mappings.clone()).unwrap_or_default(),
            where_conditions: first.map(|m| m.where_conditions.clone()).unwrap_or_default(),
        }
    }

    /// Build the submission payload.
    ///
    /// Column attributes are carried only for PII-flagged columns;
    /// incomplete where-conditions are excluded. When
    /// `qualify_table_name` is set the mapped table is submitted as
    /// `schema.table` (some execution backends require the qualified
    /// form).
    pub fn to_payload(&self, qualify_table_name: bool) -> Result<WorkflowPayload, CoreError> {
        validate_workflow_name(&self.name)?;
        let connection_id = self
            .connection_id
            .ok_or_else(|| CoreError::Validation("A connection must be selected".to_string()))?;
        if self.schema_name.is_empty() || self.table_name.is_empty() {
            return Err(CoreError::Validation(
                "A schema and table must be selected".to_string(),
            ));
        }
        if self.column_mappings.is_empty() {
            return Err(CoreError::Validation(
                "At least one column mapping is required".to_string(),
            ));
        }

        let table_name = if qualify_table_name {
            format!("{}.{}", self.schema_name, self.table_name)
        } else {
            self.table_name.clone()
        };

        let column_mappings = self
            .column_mappings
            .iter()
            .map(|m| ColumnMapping {
                column_name: m.column_name.clone(),
                is_pii: m.is_pii,
                pii_attribute: m.effective_attribute().map(str::to_string),
            })
            .collect();

        Ok(WorkflowPayload {
            name: self.name.clone(),
            description: self.description.clone(),
            connection_id,
            table_mappings: vec![TableMapping {
                table_name,
                schema_name: self.schema_name.clone(),
                column_mappings,
                where_conditions: submittable_conditions(&self.where_conditions),
            }],
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
