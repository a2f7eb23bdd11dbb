use crate::core::error::FlowdeckError;
use crate::providers::registry::ProviderDescriptor;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod mock;

/// A workflow inside an app, with the panel payloads the workbench renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    pub id: String,
    pub name: String,
    pub last_run: String,
    pub code: String,
    pub preview: String,
    pub design: String,
    pub execution: String,
}

/// A browsable application grouping one or more workflows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct App {
    pub id: String,
    pub name: String,
    pub description: String,
    pub workflows: Vec<Workflow>,
}

/// Request/response boundary to the catalog backend. Consumed as opaque
/// async calls; the transport behind it (mock, HTTP) is not the caller's
/// concern.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn list_apps(&self) -> Result<Vec<App>, FlowdeckError>;

    async fn list_providers(&self) -> Result<Vec<ProviderDescriptor>, FlowdeckError>;

    /// Persists an updated workflow, returning it as stored.
    async fn update_workflow(&self, workflow: Workflow) -> Result<Workflow, FlowdeckError>;
}
