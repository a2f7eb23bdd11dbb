use crate::catalog::{App, CatalogService, Workflow};
use crate::core::error::FlowdeckError;
use crate::providers::registry::{self, ProviderDescriptor};
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::Mutex;

/// Seed data served until a real backend exists.
const FIXTURE: &str = r#"
- id: "1"
  name: Customer Support
  description: Automated support workflows
  workflows:
    - id: w1
      name: Ticket Classification
      last_run: "2024-01-15"
      code: |
        export function classify(ticket) {
          const labels = ["billing", "outage", "feature-request"];
          return rank(labels, ticket.subject + " " + ticket.body)[0];
        }
      preview: |
        **Ticket Classification** routes incoming tickets to one of three
        queues based on subject and body text.
      design: "trigger: ticket.created -> classify -> route"
      execution: "last batch: 214 tickets, 96% auto-routed"
    - id: w2
      name: Reply Drafting
      last_run: "2024-01-12"
      code: |
        export function draft(ticket, tone) {
          return template(tone).fill({ name: ticket.requester, issue: ticket.summary });
        }
      preview: |
        **Reply Drafting** produces a first-pass answer for agents to edit.
      design: "trigger: ticket.routed -> draft -> agent review"
      execution: "last batch: 178 drafts, median 41s to approve"
- id: "2"
  name: Sales Assistant
  description: Lead qualification and outreach
  workflows:
    - id: w3
      name: Lead Scoring
      last_run: "2024-01-14"
      code: |
        export function score(lead) {
          return weights.company(lead.size) + weights.intent(lead.source);
        }
      preview: |
        **Lead Scoring** ranks inbound leads before they reach the CRM.
      design: "trigger: lead.created -> score -> sync to CRM"
      execution: "last batch: 62 leads, 11 marked hot"
"#;

/// In-process stand-in for the catalog backend. Reads come from an embedded
/// fixture; writes stay in memory for the life of the process.
pub struct MockCatalog {
    apps: Mutex<Vec<App>>,
    latency: Duration,
}

impl MockCatalog {
    pub fn new() -> Result<Self, FlowdeckError> {
        Self::with_latency(Duration::from_millis(250))
    }

    pub fn with_latency(latency: Duration) -> Result<Self, FlowdeckError> {
        let apps: Vec<App> = serde_yml::from_str(FIXTURE)?;
        Ok(Self {
            apps: Mutex::new(apps),
            latency,
        })
    }

    async fn simulate_roundtrip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl CatalogService for MockCatalog {
    async fn list_apps(&self) -> Result<Vec<App>, FlowdeckError> {
        self.simulate_roundtrip().await;
        Ok(self.apps.lock().await.clone())
    }

    async fn list_providers(&self) -> Result<Vec<ProviderDescriptor>, FlowdeckError> {
        self.simulate_roundtrip().await;
        Ok(registry::all().to_vec())
    }

    async fn update_workflow(&self, workflow: Workflow) -> Result<Workflow, FlowdeckError> {
        self.simulate_roundtrip().await;

        let mut apps = self.apps.lock().await;
        for app in apps.iter_mut() {
            if let Some(slot) = app.workflows.iter_mut().find(|w| w.id == workflow.id) {
                *slot = workflow.clone();
                return Ok(workflow);
            }
        }
        Err(FlowdeckError::WorkflowNotFound(workflow.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant_catalog() -> MockCatalog {
        MockCatalog::with_latency(Duration::ZERO).unwrap()
    }

    #[tokio::test]
    async fn fixture_parses_into_apps_and_workflows() {
        let catalog = instant_catalog();
        let apps = catalog.list_apps().await.unwrap();

        assert_eq!(apps.len(), 2);
        assert_eq!(apps[0].name, "Customer Support");
        assert_eq!(apps[0].workflows.len(), 2);
        assert_eq!(apps[1].workflows[0].id, "w3");
    }

    #[tokio::test]
    async fn provider_listing_serves_the_registry() {
        let catalog = instant_catalog();
        let providers = catalog.list_providers().await.unwrap();

        assert_eq!(providers.len(), registry::all().len());
        assert!(providers.iter().any(|p| p.id == "openai"));
    }

    #[tokio::test]
    async fn updated_workflows_persist_in_memory() {
        let catalog = instant_catalog();
        let apps = catalog.list_apps().await.unwrap();

        let mut workflow = apps[0].workflows[0].clone();
        workflow.code = "// rewritten".to_string();

        let stored = catalog.update_workflow(workflow).await.unwrap();
        assert_eq!(stored.code, "// rewritten");

        let reloaded = catalog.list_apps().await.unwrap();
        assert_eq!(reloaded[0].workflows[0].code, "// rewritten");
    }

    #[tokio::test]
    async fn updating_an_unknown_workflow_fails() {
        let catalog = instant_catalog();
        let ghost = Workflow {
            id: "w999".to_string(),
            name: "Ghost".to_string(),
            last_run: String::new(),
            code: String::new(),
            preview: String::new(),
            design: String::new(),
            execution: String::new(),
        };

        match catalog.update_workflow(ghost).await {
            Err(FlowdeckError::WorkflowNotFound(id)) => assert_eq!(id, "w999"),
            other => panic!("expected WorkflowNotFound, got {:?}", other),
        }
    }
}
