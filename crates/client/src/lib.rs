//! HTTP adapters for the console's collaborator traits.
//!
//! [`gateway::ApiGateway`] owns the transport concerns (bearer
//! credential, response envelopes, 401 session invalidation); the
//! per-service modules wrap it into the typed contracts
//! `maskadmin-console` consumes.

pub mod catalog;
pub mod connections;
pub mod constraints;
pub mod execution;
pub mod gateway;
pub mod preview;
pub mod rejection;
pub mod workflows;

use std::sync::Arc;

use maskadmin_console::wizard::WizardServices;

use crate::catalog::CatalogApi;
use crate::connections::ConnectionsApi;
use crate::constraints::ConstraintsApi;
use crate::execution::ExecutionApi;
use crate::gateway::ApiGateway;
use crate::preview::PreviewApi;
use crate::workflows::WorkflowsApi;

/// All adapters over one gateway, ready to hand to the controllers.
#[derive(Clone)]
pub struct ServiceSet {
    pub connections: Arc<ConnectionsApi>,
    pub catalog: Arc<CatalogApi>,
    pub workflows: Arc<WorkflowsApi>,
    pub execution: Arc<ExecutionApi>,
    pub constraints: Arc<ConstraintsApi>,
    pub preview: Arc<PreviewApi>,
}

impl ServiceSet {
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self {
            connections: Arc::new(ConnectionsApi::new(Arc::clone(&gateway))),
            catalog: Arc::new(CatalogApi::new(Arc::clone(&gateway))),
            workflows: Arc::new(WorkflowsApi::new(Arc::clone(&gateway))),
            execution: Arc::new(ExecutionApi::new(Arc::clone(&gateway))),
            constraints: Arc::new(ConstraintsApi::new(Arc::clone(&gateway))),
            preview: Arc::new(PreviewApi::new(gateway)),
        }
    }

    /// The handles the workflow wizard needs.
    pub fn wizard_services(&self) -> WizardServices {
        WizardServices {
            connections: self.connections.clone(),
            catalog: self.catalog.clone(),
            workflows: self.workflows.clone(),
            preview: self.preview.clone(),
        }
    }
}
