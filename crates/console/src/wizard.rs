//! The four-step workflow configuration wizard.
//!
//! One generic engine replaces the per-deployment page copies: the
//! endpoint set lives behind the injected services, and the only
//! behavioral difference between deployments — whether the mapped
//! table is submitted schema-qualified — is a [`WizardConfig`] flag.
//!
//! Steps are strictly linear: BasicInfo → SelectTable →
//! ConfigureMapping → Review. Backward navigation never discards
//! later-step state; advancing again preserves prior selections.
//! Exactly one validation error is surfaced at a time, cleared on the
//! next input change or attempted transition.

use std::sync::Arc;

use maskadmin_core::filter::RowFilterCondition;
use maskadmin_core::mapping::{ColumnDescriptor, ColumnMapping};
use maskadmin_core::pii_catalog::PiiAttributeCatalog;
use maskadmin_core::workflow::{
    validate_workflow_name, Id, WorkflowDefinition, WorkflowDraft,
};

use crate::services::{
    CatalogService, ConnectionService, ConnectionSummary, PreviewService, ServiceError,
    WorkflowService,
};
use crate::session::SessionContext;

/// Wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    BasicInfo,
    SelectTable,
    ConfigureMapping,
    Review,
}

impl WizardStep {
    pub fn label(self) -> &'static str {
        match self {
            Self::BasicInfo => "Basic Info",
            Self::SelectTable => "Select Table",
            Self::ConfigureMapping => "Configure Mapping",
            Self::Review => "Review & Create",
        }
    }

    fn previous(self) -> Option<Self> {
        match self {
            Self::BasicInfo => None,
            Self::SelectTable => Some(Self::BasicInfo),
            Self::ConfigureMapping => Some(Self::SelectTable),
            Self::Review => Some(Self::ConfigureMapping),
        }
    }
}

/// Deployment-specific wizard behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct WizardConfig {
    /// Submit the mapped table as `schema.table` instead of the bare
    /// table name.
    pub qualify_table_names: bool,
}

/// Whether this session creates a new workflow or edits an existing
/// one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardMode {
    Create,
    Edit { workflow_id: Id },
}

/// Collaborator handles the wizard works against.
#[derive(Clone)]
pub struct WizardServices {
    pub connections: Arc<dyn ConnectionService>,
    pub catalog: Arc<dyn CatalogService>,
    pub workflows: Arc<dyn WorkflowService>,
    pub preview: Arc<dyn PreviewService>,
}

/// Wizard failure surface.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    /// The session lacks the gating permission; nothing was loaded.
    #[error("{0}")]
    Forbidden(String),

    /// A step-local validation failure; the step did not advance.
    #[error("{0}")]
    Validation(String),

    /// A collaborator call failed; recoverable, the step did not
    /// advance.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// One wizard session: owns the draft until submission.
pub struct WizardSession {
    config: WizardConfig,
    services: WizardServices,
    mode: WizardMode,
    step: WizardStep,
    draft: WorkflowDraft,
    connections: Vec<ConnectionSummary>,
    schemas: Vec<String>,
    tables: Vec<String>,
    columns: Vec<ColumnDescriptor>,
    attribute_catalog: PiiAttributeCatalog,
    /// The (schema, table) the current column mappings were built for.
    /// Re-advancing through SelectTable reinitializes mappings only
    /// when this changes, so stepping back and forward keeps edits.
    mapped_table: Option<(String, String)>,
    error: Option<String>,
}

impl WizardSession {
    /// Start a create-mode session at BasicInfo.
    ///
    /// Loads the connection list and the attribute catalog up front.
    /// Requires `workflow.create`.
    pub async fn start(
        session: &SessionContext,
        services: WizardServices,
        config: WizardConfig,
    ) -> Result<Self, WizardError> {
        if !session.can("workflow.create") {
            return Err(WizardError::Forbidden(
                "You do not have permission to create workflows".to_string(),
            ));
        }

        let (connections, attribute_catalog) = futures::try_join!(
            services.connections.list(),
            services.catalog.pii_attributes()
        )?;

        tracing::debug!(connections = connections.len(), "Workflow wizard started");

        Ok(Self {
            config,
            services,
            mode: WizardMode::Create,
            step: WizardStep::BasicInfo,
            draft: WorkflowDraft::default(),
            connections,
            schemas: Vec::new(),
            tables: Vec::new(),
            columns: Vec::new(),
            attribute_catalog,
            mapped_table: None,
            error: None,
        })
    }

    /// Start an edit-mode session directly at ConfigureMapping,
    /// pre-populated from the definition's first table mapping.
    ///
    /// Requires `workflow.update`. Editing a running workflow is
    /// refused.
    pub async fn edit(
        session: &SessionContext,
        services: WizardServices,
        config: WizardConfig,
        workflow_id: Id,
    ) -> Result<Self, WizardError> {
        if !session.can("workflow.update") {
            return Err(WizardError::Forbidden(
                "You do not have permission to edit workflows".to_string(),
            ));
        }

        let (connections, attribute_catalog) = futures::try_join!(
            services.connections.list(),
            services.catalog.pii_attributes()
        )?;

        let definition = services.workflows.get(workflow_id).await?;
        if definition.status.is_some_and(|s| !s.is_editable()) {
            return Err(WizardError::Validation(
                "A running workflow cannot be edited".to_string(),
            ));
        }

        let draft = WorkflowDraft::from_definition(&definition);
        let connection_id = definition.connection_id;
        let schemas = services.catalog.schemas(connection_id).await?;
        let tables = services
            .catalog
            .tables(connection_id, &draft.schema_name)
            .await?;

        // Fetch live column types for attribute filtering; fall back
        // to the stored mappings with a varchar default when discovery
        // fails.
        let columns = match services
            .catalog
            .columns(connection_id, &draft.schema_name, &draft.table_name)
            .await
        {
            Ok(columns) => columns,
            Err(e) => {
                tracing::warn!(workflow_id, error = %e, "Column discovery failed, using stored mappings");
                draft
                    .column_mappings
                    .iter()
                    .map(|m| ColumnDescriptor {
                        name: m.column_name.clone(),
                        data_type: "varchar".to_string(),
                    })
                    .collect()
            }
        };

        let mapped_table = Some((draft.schema_name.clone(), draft.table_name.clone()));
        Ok(Self {
            config,
            services,
            mode: WizardMode::Edit { workflow_id },
            step: WizardStep::ConfigureMapping,
            draft,
            connections,
            schemas,
            tables,
            columns,
            attribute_catalog,
            mapped_table,
            error: None,
        })
    }

    // ---- accessors ----

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn mode(&self) -> WizardMode {
        self.mode
    }

    pub fn draft(&self) -> &WorkflowDraft {
        &self.draft
    }

    /// The one validation/service error currently displayed, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn connections(&self) -> &[ConnectionSummary] {
        &self.connections
    }

    pub fn schemas(&self) -> &[String] {
        &self.schemas
    }

    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Masking attributes offered for one column, filtered by its
    /// inferred data-type category.
    pub fn attributes_for(&self, column_name: &str) -> &[String] {
        self.attribute_catalog
            .attributes_for_column(&self.columns, column_name)
    }

    // ---- input changes (local, synchronous; each clears the error) ----

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
        self.error = None;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
        self.error = None;
    }

    pub fn set_connection(&mut self, connection_id: Id) {
        self.draft.connection_id = Some(connection_id);
        self.error = None;
    }

    /// Pick a table within the selected schema.
    pub fn select_table(&mut self, table: impl Into<String>) {
        self.draft.table_name = table.into();
        self.error = None;
    }

    /// Pick a schema and load its table list. Resets the table choice;
    /// a discovery failure is step-local and recoverable.
    pub async fn select_schema(&mut self, schema: impl Into<String>) -> Result<(), WizardError> {
        let schema = schema.into();
        self.draft.schema_name = schema.clone();
        self.draft.table_name.clear();
        self.tables.clear();
        self.error = None;

        let connection_id = self.require_connection()?;
        match self.services.catalog.tables(connection_id, &schema).await {
            Ok(tables) => {
                self.tables = tables;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Toggle a column's PII flag. Turning it off clears its
    /// attribute.
    pub fn set_column_pii(&mut self, index: usize, is_pii: bool) {
        if let Some(mapping) = self.draft.column_mappings.get_mut(index) {
            mapping.set_is_pii(is_pii);
        }
        self.error = None;
    }

    /// Assign a column's masking attribute.
    pub fn set_column_attribute(&mut self, index: usize, attribute: Option<String>) {
        if let Some(mapping) = self.draft.column_mappings.get_mut(index) {
            mapping.set_attribute(attribute);
        }
        self.error = None;
    }

    pub fn add_condition(&mut self) {
        self.draft.where_conditions.push(RowFilterCondition::empty());
        self.error = None;
    }

    pub fn remove_condition(&mut self, index: usize) {
        if index < self.draft.where_conditions.len() {
            self.draft.where_conditions.remove(index);
        }
        self.error = None;
    }

    pub fn set_condition(&mut self, index: usize, condition: RowFilterCondition) {
        if let Some(slot) = self.draft.where_conditions.get_mut(index) {
            *slot = condition;
        }
        self.error = None;
    }

    /// Masked sample values for one attribute, for the mapping step's
    /// inline preview.
    pub async fn preview_attribute_samples(
        &self,
        attribute: &str,
    ) -> Result<Vec<String>, WizardError> {
        Ok(self.services.preview.sample_data(attribute, 5).await?)
    }

    // ---- step transitions ----

    /// Attempt to advance one step. Validation runs before any
    /// discovery call; on failure the step stays put and the error is
    /// recorded for display.
    pub async fn next(&mut self) -> Result<WizardStep, WizardError> {
        self.error = None;
        let result = match self.step {
            WizardStep::BasicInfo => self.advance_from_basic_info().await,
            WizardStep::SelectTable => self.advance_from_select_table().await,
            WizardStep::ConfigureMapping => self.advance_from_configure_mapping(),
            WizardStep::Review => Err(WizardError::Validation(
                "Already at the review step".to_string(),
            )),
        };
        match result {
            Ok(step) => {
                self.step = step;
                Ok(step)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Step back without discarding anything entered on later steps.
    pub fn back(&mut self) {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.error = None;
    }

    async fn advance_from_basic_info(&mut self) -> Result<WizardStep, WizardError> {
        validate_workflow_name(&self.draft.name)
            .map_err(|e| WizardError::Validation(e.to_string()))?;
        let connection_id = self.require_connection()?;

        self.schemas = self.services.catalog.schemas(connection_id).await?;
        Ok(WizardStep::SelectTable)
    }

    async fn advance_from_select_table(&mut self) -> Result<WizardStep, WizardError> {
        if self.draft.schema_name.is_empty() {
            return Err(WizardError::Validation("Please select a schema".to_string()));
        }
        if self.draft.table_name.is_empty() {
            return Err(WizardError::Validation("Please select a table".to_string()));
        }
        let connection_id = self.require_connection()?;

        let columns = self
            .services
            .catalog
            .columns(connection_id, &self.draft.schema_name, &self.draft.table_name)
            .await?;

        let target = (self.draft.schema_name.clone(), self.draft.table_name.clone());
        if self.mapped_table.as_ref() != Some(&target) {
            self.draft.column_mappings = columns
                .iter()
                .map(|c| ColumnMapping::new(c.name.clone()))
                .collect();
            self.draft.where_conditions.clear();
            self.mapped_table = Some(target);
        }
        self.columns = columns;
        Ok(WizardStep::ConfigureMapping)
    }

    fn advance_from_configure_mapping(&self) -> Result<WizardStep, WizardError> {
        if self.draft.column_mappings.is_empty() {
            return Err(WizardError::Validation(
                "Please configure at least one column mapping".to_string(),
            ));
        }
        Ok(WizardStep::Review)
    }

    /// Submit the reviewed draft as a create or update. A failure
    /// leaves the draft intact for retry.
    pub async fn submit(&mut self) -> Result<WorkflowDefinition, WizardError> {
        if self.step != WizardStep::Review {
            return Err(WizardError::Validation(
                "The draft must be reviewed before submission".to_string(),
            ));
        }

        let payload = self
            .draft
            .to_payload(self.config.qualify_table_names)
            .map_err(|e| WizardError::Validation(e.to_string()))?;

        let result = match self.mode {
            WizardMode::Create => self.services.workflows.create(&payload).await,
            WizardMode::Edit { workflow_id } => {
                self.services.workflows.update(workflow_id, &payload).await
            }
        };

        match result {
            Ok(definition) => {
                tracing::info!(
                    workflow_id = definition.id,
                    mode = ?self.mode,
                    "Workflow submitted",
                );
                Ok(definition)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    fn require_connection(&self) -> Result<Id, WizardError> {
        self.draft
            .connection_id
            .ok_or_else(|| WizardError::Validation("Please select a connection".to_string()))
    }
}
