use super::{
    SessionState,
    handler::{
        AppsCommand, ClearCommand, DeleteHistoryCommand, EditCommand, HelpCommand,
        ListHistoryCommand, LoadHistoryCommand, ModelCommand, OpenCommand, PanelCommand,
        ProviderCommand, ProvidersCommand, QuitCommand, SaveHistoryCommand, ViewCommand,
    },
    registry::CommandRegistry,
};
use crate::core::error::FlowdeckError;
use std::sync::Arc;

#[derive(Clone)]
pub struct CommandDispatcher {
    registry: Arc<CommandRegistry>,
}

impl CommandDispatcher {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    pub async fn execute(
        &self,
        command: &str,
        args: &[&str],
        state: &mut SessionState,
    ) -> Result<Option<String>, FlowdeckError> {
        self.registry.execute(command, args, state).await
    }

    pub fn get_command_names(&self) -> Vec<String> {
        self.registry.get_command_names()
    }
}

pub fn create_command_registry() -> CommandDispatcher {
    let mut registry = CommandRegistry::new();

    registry.register("quit", QuitCommand);
    registry.register("help", HelpCommand);
    registry.register("clear", ClearCommand);
    registry.register("providers", ProvidersCommand);
    registry.register("provider", ProviderCommand);
    registry.register("model", ModelCommand);
    registry.register("apps", AppsCommand);
    registry.register("open", OpenCommand);
    registry.register("view", ViewCommand);
    registry.register("panel", PanelCommand);
    registry.register("edit", EditCommand);
    registry.register("save", SaveHistoryCommand);
    registry.register("load", LoadHistoryCommand);
    registry.register("list", ListHistoryCommand);
    registry.register("delete", DeleteHistoryCommand);

    CommandDispatcher::new(Arc::new(registry))
}
