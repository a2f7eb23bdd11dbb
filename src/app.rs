use crate::cli::Args;
use crate::commands::{SessionState, dispatcher::CommandDispatcher};
use crate::core::error::FlowdeckError;
use crate::display;
use crate::input;
use crate::providers::dispatch::Dispatcher;
use console::style;
use is_terminal::IsTerminal;
use std::io::{self, Read};

const GREETING: &str = "Hello! How can I assist you today?";

pub struct Application {
    pub args: Args,
    pub state: SessionState,
    pub dispatcher: Dispatcher,
    pub command_dispatcher: CommandDispatcher,
}

impl Application {
    pub fn new(
        args: Args,
        state: SessionState,
        dispatcher: Dispatcher,
        command_dispatcher: CommandDispatcher,
    ) -> Result<Self, FlowdeckError> {
        Ok(Self {
            args,
            state,
            dispatcher,
            command_dispatcher,
        })
    }

    pub async fn run(&mut self) -> Result<(), FlowdeckError> {
        let context = if !io::stdin().is_terminal() {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| FlowdeckError::Input(format!("Failed to read from stdin: {}", e)))?;
            Some(buffer)
        } else {
            None
        };

        if let Some(query) = self.args.query.clone() {
            self.handle_one_shot(&query, context).await
        } else {
            self.handle_interactive().await
        }
    }

    /// Single prompt in, single completion out. Errors surface to the
    /// caller; there is no conversation log to absorb them here.
    async fn handle_one_shot(
        &mut self,
        query: &str,
        context: Option<String>,
    ) -> Result<(), FlowdeckError> {
        let final_query = match context {
            Some(ctx) => format!("<context>{}</context>\n\n{}", ctx, query),
            None => query.to_string(),
        };

        let model = self
            .state
            .selection
            .current()
            .map(|s| s.model.clone())
            .unwrap_or_default();
        let response = self
            .dispatcher
            .dispatch(self.state.selection.current(), &final_query, &model)
            .await?;

        display::assistant_text(&response);
        Ok(())
    }

    async fn handle_interactive(&mut self) -> Result<(), FlowdeckError> {
        println!("{}", style("Loading workspace catalog...").dim());
        self.state.workspace.apps = self.state.catalog.list_apps().await?;
        println!(
            "{}",
            style(format!(
                "{} apps loaded. Type '/help' for commands, /quit or Ctrl+D to exit.",
                self.state.workspace.apps.len()
            ))
            .dim()
        );

        let greeting = self.state.log.push_assistant(GREETING);
        display::conversation_entry(greeting);

        let mut editor = input::create_editor(self.command_dispatcher.clone())?;

        loop {
            let input = match input::read_input(&mut editor)? {
                Some(line) => line.trim().to_string(),
                None => break,
            };

            if input.is_empty() {
                continue;
            }

            if let Some(rest) = input.strip_prefix('/') {
                let parts: Vec<&str> = rest.split_whitespace().collect();
                if parts.is_empty() {
                    continue;
                }
                let command = parts[0];
                let cmd_args = &parts[1..];

                match self
                    .command_dispatcher
                    .execute(command, cmd_args, &mut self.state)
                    .await
                {
                    Ok(Some(output)) => println!("{}", output),
                    Ok(None) => {}
                    Err(e) => display::error(&e.to_string()),
                }

                if !self.state.should_continue {
                    break;
                }
                continue;
            }

            match self.state.exchange(&self.dispatcher, &input).await {
                Ok(entry) => display::conversation_entry(entry),
                Err(e) => display::error(&e.to_string()),
            }
        }

        input::save_history(&mut editor)?;
        Ok(())
    }
}
