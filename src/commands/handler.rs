use super::{PanelView, SessionState};
use crate::config;
use crate::conversation::ConversationEntry;
use crate::core::error::FlowdeckError;
use crate::display;
use crate::providers::registry;
use async_trait::async_trait;
use console::style;

#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn execute(
        &self,
        state: &mut SessionState,
        args: &[&str],
    ) -> Result<Option<String>, FlowdeckError>;
    fn help(&self) -> &'static str;
}

pub struct QuitCommand;
pub struct HelpCommand;
pub struct ClearCommand;
pub struct ProvidersCommand;
pub struct ProviderCommand;
pub struct ModelCommand;
pub struct AppsCommand;
pub struct OpenCommand;
pub struct ViewCommand;
pub struct PanelCommand;
pub struct EditCommand;
pub struct SaveHistoryCommand;
pub struct LoadHistoryCommand;
pub struct ListHistoryCommand;
pub struct DeleteHistoryCommand;

#[async_trait]
impl CommandHandler for QuitCommand {
    async fn execute(
        &self,
        state: &mut SessionState,
        _args: &[&str],
    ) -> Result<Option<String>, FlowdeckError> {
        state.should_continue = false;
        Ok(None)
    }

    fn help(&self) -> &'static str {
        "/quit - Exit the session"
    }
}

#[async_trait]
impl CommandHandler for HelpCommand {
    async fn execute(
        &self,
        _state: &mut SessionState,
        _args: &[&str],
    ) -> Result<Option<String>, FlowdeckError> {
        let title = style("Available Commands").bold().underlined();
        let help_text = vec![
            title.to_string(),
            QuitCommand.help().to_string(),
            HelpCommand.help().to_string(),
            ClearCommand.help().to_string(),
            ProvidersCommand.help().to_string(),
            ProviderCommand.help().to_string(),
            ModelCommand.help().to_string(),
            AppsCommand.help().to_string(),
            OpenCommand.help().to_string(),
            ViewCommand.help().to_string(),
            PanelCommand.help().to_string(),
            EditCommand.help().to_string(),
            SaveHistoryCommand.help().to_string(),
            LoadHistoryCommand.help().to_string(),
            ListHistoryCommand.help().to_string(),
            DeleteHistoryCommand.help().to_string(),
        ]
        .join("\n");

        Ok(Some(help_text))
    }

    fn help(&self) -> &'static str {
        "/help - Show available commands"
    }
}

#[async_trait]
impl CommandHandler for ClearCommand {
    async fn execute(
        &self,
        state: &mut SessionState,
        _args: &[&str],
    ) -> Result<Option<String>, FlowdeckError> {
        state.log.clear();
        Ok(Some("Conversation cleared.".to_string()))
    }

    fn help(&self) -> &'static str {
        "/clear - Clear the conversation log"
    }
}

#[async_trait]
impl CommandHandler for ProvidersCommand {
    async fn execute(
        &self,
        state: &mut SessionState,
        _args: &[&str],
    ) -> Result<Option<String>, FlowdeckError> {
        let providers = state.catalog.list_providers().await?;
        let current = state
            .selection
            .current()
            .map(|s| s.provider_id.clone())
            .unwrap_or_default();

        let mut lines = vec![style("Available Providers").bold().underlined().to_string()];
        for descriptor in providers {
            let marker = if descriptor.id == current { "*" } else { " " };
            lines.push(format!(
                "{} {:<14} {:<24} {}",
                marker,
                style(descriptor.id).bold(),
                descriptor.display_name,
                style(descriptor.supported_models.join(", ")).dim()
            ));
        }
        Ok(Some(lines.join("\n")))
    }

    fn help(&self) -> &'static str {
        "/providers - List the LLM provider catalog"
    }
}

#[async_trait]
impl CommandHandler for ProviderCommand {
    async fn execute(
        &self,
        state: &mut SessionState,
        args: &[&str],
    ) -> Result<Option<String>, FlowdeckError> {
        if args.is_empty() {
            return Ok(Some(match state.selection.current() {
                Some(selection) => format!(
                    "Current provider: {} (model {})",
                    selection.provider_id, selection.model
                ),
                None => "No provider selected. Usage: /provider <id> [model]".to_string(),
            }));
        }

        let descriptor = registry::require(args[0])?;
        let model = args.get(1).copied().unwrap_or(descriptor.supported_models[0]);
        let api_key = config::api_key_from_env(descriptor);

        let selection = state.selection.select(descriptor, model, None, api_key)?;
        Ok(Some(format!(
            "Provider set to {} (model {})",
            descriptor.display_name, selection.model
        )))
    }

    fn help(&self) -> &'static str {
        "/provider <id> [model] - Select the active LLM provider"
    }
}

#[async_trait]
impl CommandHandler for ModelCommand {
    async fn execute(
        &self,
        state: &mut SessionState,
        args: &[&str],
    ) -> Result<Option<String>, FlowdeckError> {
        if args.is_empty() {
            return Ok(Some(match state.selection.current() {
                Some(selection) => format!("Current model: {}", selection.model),
                None => "No provider selected.".to_string(),
            }));
        }

        let current = state
            .selection
            .current()
            .cloned()
            .ok_or(FlowdeckError::MissingProvider)?;
        let descriptor = registry::require(&current.provider_id)?;

        // Whole-selection replacement; there is no partial-update path
        state.selection.select(
            descriptor,
            args[0],
            Some(current.base_url),
            Some(current.api_key),
        )?;
        Ok(Some(format!("Model changed to: {}", args[0])))
    }

    fn help(&self) -> &'static str {
        "/model [name] - Show or change the current model"
    }
}

#[async_trait]
impl CommandHandler for AppsCommand {
    async fn execute(
        &self,
        state: &mut SessionState,
        _args: &[&str],
    ) -> Result<Option<String>, FlowdeckError> {
        state.workspace.apps = state.catalog.list_apps().await?;

        let mut lines = vec![style("Apps & Workflows").bold().underlined().to_string()];
        for app in &state.workspace.apps {
            lines.push(format!(
                "{} - {}",
                style(&app.name).bold(),
                style(&app.description).dim()
            ));
            for workflow in &app.workflows {
                lines.push(format!(
                    "  [{}] {} (last run {})",
                    style(&workflow.id).cyan(),
                    workflow.name,
                    workflow.last_run
                ));
            }
        }
        Ok(Some(lines.join("\n")))
    }

    fn help(&self) -> &'static str {
        "/apps - List applications and their workflows"
    }
}

#[async_trait]
impl CommandHandler for OpenCommand {
    async fn execute(
        &self,
        state: &mut SessionState,
        args: &[&str],
    ) -> Result<Option<String>, FlowdeckError> {
        if args.is_empty() {
            return Ok(Some("Usage: /open <workflow-id>".to_string()));
        }

        let workflow = state
            .workspace
            .find_workflow(args[0])
            .cloned()
            .ok_or_else(|| FlowdeckError::WorkflowNotFound(args[0].to_string()))?;

        state.workspace.open_workflow_id = Some(workflow.id.clone());
        display::workflow_panel(&workflow, &state.workspace);
        Ok(None)
    }

    fn help(&self) -> &'static str {
        "/open <workflow-id> - Open a workflow in the side panel"
    }
}

#[async_trait]
impl CommandHandler for ViewCommand {
    async fn execute(
        &self,
        state: &mut SessionState,
        args: &[&str],
    ) -> Result<Option<String>, FlowdeckError> {
        let Some(view) = args.first().and_then(|v| PanelView::parse(v)) else {
            return Ok(Some(
                "Usage: /view <code|preview|design|execution>".to_string(),
            ));
        };

        state.workspace.view = view;
        match state.workspace.open_workflow().cloned() {
            Some(workflow) => {
                display::workflow_panel(&workflow, &state.workspace);
                Ok(None)
            }
            None => Ok(Some(format!(
                "Panel view set to {} (no workflow open)",
                view.label()
            ))),
        }
    }

    fn help(&self) -> &'static str {
        "/view <pane> - Switch the panel to code, preview, design or execution"
    }
}

#[async_trait]
impl CommandHandler for PanelCommand {
    async fn execute(
        &self,
        state: &mut SessionState,
        args: &[&str],
    ) -> Result<Option<String>, FlowdeckError> {
        match args.first().copied() {
            Some("collapse") => {
                state.workspace.collapsed = true;
                Ok(Some("Panel collapsed.".to_string()))
            }
            Some("expand") => {
                state.workspace.collapsed = false;
                Ok(Some("Panel expanded.".to_string()))
            }
            Some("full") => {
                state.workspace.full_screen = true;
                Ok(Some("Panel switched to full screen.".to_string()))
            }
            Some("normal") => {
                state.workspace.full_screen = false;
                Ok(Some("Panel back to normal width.".to_string()))
            }
            _ => Ok(Some(
                "Usage: /panel <collapse|expand|full|normal>".to_string(),
            )),
        }
    }

    fn help(&self) -> &'static str {
        "/panel <mode> - Collapse, expand or resize the side panel"
    }
}

#[async_trait]
impl CommandHandler for EditCommand {
    async fn execute(
        &self,
        state: &mut SessionState,
        args: &[&str],
    ) -> Result<Option<String>, FlowdeckError> {
        if args.is_empty() {
            return Ok(Some("Usage: /edit <file>".to_string()));
        }
        let Some(open) = state.workspace.open_workflow().cloned() else {
            return Ok(Some("No workflow open. Use /open <id> first.".to_string()));
        };

        let code = std::fs::read_to_string(args[0])?;
        let mut updated = open;
        updated.code = code;

        let stored = state.catalog.update_workflow(updated).await?;
        let summary = format!("Workflow '{}' updated ({} bytes)", stored.name, stored.code.len());
        state.workspace.replace_workflow(stored);
        Ok(Some(summary))
    }

    fn help(&self) -> &'static str {
        "/edit <file> - Replace the open workflow's code with a file's contents"
    }
}

#[async_trait]
impl CommandHandler for SaveHistoryCommand {
    async fn execute(
        &self,
        state: &mut SessionState,
        args: &[&str],
    ) -> Result<Option<String>, FlowdeckError> {
        let filename = if args.is_empty() {
            chrono::Local::now()
                .format("%Y%m%d_%H%M%S.json")
                .to_string()
        } else {
            args[0].to_string()
        };

        let history_dir = config::history_dir();
        std::fs::create_dir_all(&history_dir)?;
        let path = history_dir.join(filename);

        let file = std::fs::File::create(&path)?;
        serde_json::to_writer_pretty(file, state.log.entries())?;

        Ok(Some(format!("Transcript saved to: {}", path.display())))
    }

    fn help(&self) -> &'static str {
        "/save [filename] - Save the conversation transcript to a file"
    }
}

#[async_trait]
impl CommandHandler for LoadHistoryCommand {
    async fn execute(
        &self,
        state: &mut SessionState,
        args: &[&str],
    ) -> Result<Option<String>, FlowdeckError> {
        if args.is_empty() {
            return Ok(Some("Please specify a filename".to_string()));
        }

        let path = config::history_dir().join(args[0]);
        let file = std::fs::File::open(&path)?;
        let entries: Vec<ConversationEntry> = serde_json::from_reader(file)?;

        state.log.restore(entries);
        for entry in state.log.entries() {
            display::conversation_entry(entry);
        }

        Ok(Some(format!("Transcript loaded from: {}", path.display())))
    }

    fn help(&self) -> &'static str {
        "/load <filename> - Load a conversation transcript from a file"
    }
}

#[async_trait]
impl CommandHandler for ListHistoryCommand {
    async fn execute(
        &self,
        _state: &mut SessionState,
        _args: &[&str],
    ) -> Result<Option<String>, FlowdeckError> {
        let history_dir = config::history_dir();
        std::fs::create_dir_all(&history_dir)?;

        let mut files = Vec::new();
        for entry in std::fs::read_dir(history_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        if files.is_empty() {
            Ok(Some("No saved transcripts found.".to_string()))
        } else {
            files.sort();
            Ok(Some(files.join("\n")))
        }
    }

    fn help(&self) -> &'static str {
        "/list - List saved conversation transcripts"
    }
}

#[async_trait]
impl CommandHandler for DeleteHistoryCommand {
    async fn execute(
        &self,
        _state: &mut SessionState,
        args: &[&str],
    ) -> Result<Option<String>, FlowdeckError> {
        if args.is_empty() {
            return Ok(Some("Please specify a filename to delete".to_string()));
        }

        let path = config::history_dir().join(args[0]);
        if !path.exists() {
            return Ok(Some(format!("File not found: {}", path.display())));
        }

        std::fs::remove_file(&path)?;
        Ok(Some(format!("Deleted transcript: {}", path.display())))
    }

    fn help(&self) -> &'static str {
        "/delete <filename> - Delete a saved transcript"
    }
}
