pub mod dispatcher;
pub mod handler;
pub mod registry;

use crate::catalog::{App, CatalogService, Workflow};
use crate::conversation::{ConversationEntry, ConversationLog};
use crate::core::error::FlowdeckError;
use crate::providers::dispatch::Dispatcher;
use crate::providers::selection::SelectionState;
use std::sync::Arc;

pub use dispatcher::create_command_registry;

/// Which pane of the workflow panel is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelView {
    Code,
    Preview,
    Design,
    Execution,
}

impl PanelView {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "code" => Some(PanelView::Code),
            "preview" => Some(PanelView::Preview),
            "design" => Some(PanelView::Design),
            "execution" => Some(PanelView::Execution),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PanelView::Code => "code",
            PanelView::Preview => "preview",
            PanelView::Design => "design",
            PanelView::Execution => "execution",
        }
    }
}

/// View state for the app/workflow browser and the side panel.
pub struct Workspace {
    pub apps: Vec<App>,
    pub open_workflow_id: Option<String>,
    pub view: PanelView,
    pub collapsed: bool,
    pub full_screen: bool,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            apps: Vec::new(),
            open_workflow_id: None,
            view: PanelView::Code,
            collapsed: false,
            full_screen: false,
        }
    }

    pub fn find_workflow(&self, id: &str) -> Option<&Workflow> {
        self.apps
            .iter()
            .flat_map(|app| app.workflows.iter())
            .find(|workflow| workflow.id == id)
    }

    pub fn open_workflow(&self) -> Option<&Workflow> {
        self.open_workflow_id
            .as_deref()
            .and_then(|id| self.find_workflow(id))
    }

    pub fn replace_workflow(&mut self, updated: Workflow) {
        for app in self.apps.iter_mut() {
            if let Some(slot) = app.workflows.iter_mut().find(|w| w.id == updated.id) {
                *slot = updated;
                return;
            }
        }
    }
}

/// Mutable session state shared by the chat loop and the slash commands.
pub struct SessionState {
    pub log: ConversationLog,
    pub selection: SelectionState,
    pub workspace: Workspace,
    pub catalog: Arc<dyn CatalogService>,
    pub should_continue: bool,
}

impl SessionState {
    pub fn new(catalog: Arc<dyn CatalogService>) -> Self {
        Self {
            log: ConversationLog::new(),
            selection: SelectionState::new(),
            workspace: Workspace::new(),
            catalog,
            should_continue: true,
        }
    }

    /// One chat turn: append the user entry, dispatch, append the reply.
    ///
    /// A missing selection or an upstream failure becomes an assistant-style
    /// entry carrying the error message; selection-level errors
    /// (unknown provider, invalid model) propagate so the caller can block
    /// the action instead.
    pub async fn exchange(
        &mut self,
        dispatcher: &Dispatcher,
        input: &str,
    ) -> Result<&ConversationEntry, FlowdeckError> {
        self.log.push_user(input);

        let model = self
            .selection
            .current()
            .map(|s| s.model.clone())
            .unwrap_or_default();

        match dispatcher.dispatch(self.selection.current(), input, &model).await {
            Ok(text) => Ok(self.log.push_assistant(&text)),
            Err(recoverable @ (FlowdeckError::MissingProvider | FlowdeckError::Upstream { .. })) => {
                Ok(self.log.push_assistant(&recoverable.to_string()))
            }
            Err(blocking) => Err(blocking),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::mock::MockCatalog;
    use crate::conversation::EntryRole;
    use crate::providers::dispatch::stub::{StubFactory, StubReply};
    use crate::providers::registry;
    use std::time::Duration;

    fn session() -> SessionState {
        let catalog = Arc::new(MockCatalog::with_latency(Duration::ZERO).unwrap());
        SessionState::new(catalog)
    }

    #[tokio::test]
    async fn exchange_appends_user_then_assistant_entry() {
        let (dispatcher, _) = StubFactory::dispatcher(StubReply::Text("hello".to_string()));
        let mut state = session();
        state
            .selection
            .select(registry::require("openai").unwrap(), "gpt-4", None, None)
            .unwrap();

        state.exchange(&dispatcher, "hi there").await.unwrap();

        let entries = state.log.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].role, EntryRole::User);
        assert_eq!(entries[0].content, "hi there");
        assert_eq!(entries[1].role, EntryRole::Assistant);
        assert_eq!(entries[1].content, "hello");
    }

    #[tokio::test]
    async fn upstream_failures_land_in_the_log_as_one_assistant_entry() {
        let (dispatcher, _) = StubFactory::dispatcher(StubReply::Fail("socket closed".to_string()));
        let mut state = session();
        state
            .selection
            .select(registry::require("openai").unwrap(), "gpt-4", None, None)
            .unwrap();

        let entry = state.exchange(&dispatcher, "hi").await.unwrap();
        assert_eq!(entry.role, EntryRole::Assistant);
        assert!(entry.content.contains("socket closed"));
        assert_eq!(state.log.len(), 2);
    }

    #[tokio::test]
    async fn missing_selection_is_reported_in_the_log_not_dropped() {
        let (dispatcher, calls) = StubFactory::dispatcher(StubReply::Text("unused".to_string()));
        let mut state = session();

        let entry = state.exchange(&dispatcher, "hi").await.unwrap();
        assert_eq!(entry.role, EntryRole::Assistant);
        assert!(entry.content.contains("No LLM provider selected"));
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn workspace_finds_and_replaces_workflows_across_apps() {
        let mut state = session();
        state.workspace.apps = state.catalog.list_apps().await.unwrap();

        let mut workflow = state.workspace.find_workflow("w3").unwrap().clone();
        workflow.code = "// new".to_string();
        state.workspace.replace_workflow(workflow);

        assert_eq!(state.workspace.find_workflow("w3").unwrap().code, "// new");
        assert!(state.workspace.find_workflow("w9").is_none());
    }

    #[test]
    fn panel_views_parse_from_their_labels() {
        for view in [
            PanelView::Code,
            PanelView::Preview,
            PanelView::Design,
            PanelView::Execution,
        ] {
            assert_eq!(PanelView::parse(view.label()), Some(view));
        }
        assert_eq!(PanelView::parse("settings"), None);
    }

    #[tokio::test]
    async fn select_then_dispatch_scenario() {
        let (dispatcher, _) = StubFactory::dispatcher(StubReply::Text("hello".to_string()));
        let mut state = session();
        let openai = registry::require("openai").unwrap();

        assert!(state.selection.select(openai, "gpt-4", None, None).is_ok());
        assert!(matches!(
            state.selection.select(openai, "gpt-5", None, None),
            Err(FlowdeckError::InvalidModel { .. })
        ));

        let entry = state.exchange(&dispatcher, "greet me").await.unwrap();
        assert_eq!(entry.role, EntryRole::Assistant);
        assert_eq!(entry.content, "hello");
    }
}
