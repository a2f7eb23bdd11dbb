use crate::commands::handler::CommandHandler;
use crate::core::error::FlowdeckError;
use std::collections::HashMap;
use std::sync::Arc;

pub struct CommandRegistry {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn register<C: CommandHandler + 'static>(&mut self, name: &str, command: C) {
        self.handlers.insert(name.to_string(), Arc::new(command));
    }

    pub async fn execute(
        &self,
        name: &str,
        args: &[&str],
        state: &mut super::SessionState,
    ) -> Result<Option<String>, FlowdeckError> {
        let handler = self
            .handlers
            .get(name)
            .ok_or_else(|| FlowdeckError::Input(format!("Unknown command: {}", name)))?;
        handler.execute(state, args).await
    }

    pub fn get_command_names(&self) -> Vec<String> {
        self.handlers.keys().cloned().collect()
    }
}
