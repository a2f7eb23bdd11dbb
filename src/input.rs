use crate::commands::dispatcher::CommandDispatcher;
use crate::config;
use crate::core::error::FlowdeckError;

use console::style;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::history::FileHistory;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Config, Context, EditMode, Editor, Helper};

/// Rustyline helper: completes slash commands, hints from history.
pub struct ReplHelper {
    commands: CommandDispatcher,
    hinter: HistoryHinter,
}

impl ReplHelper {
    pub fn new(commands: CommandDispatcher) -> Self {
        Self {
            commands,
            hinter: HistoryHinter::new(),
        }
    }
}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        if !line.starts_with('/') {
            return Ok((pos, Vec::new()));
        }

        let command_part = &line[1..pos];
        let mut names = self.commands.get_command_names();
        names.sort();

        let matches: Vec<Pair> = names
            .into_iter()
            .filter(|cmd| cmd.starts_with(command_part))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd,
            })
            .collect();

        Ok((1, matches))
    }
}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<String> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl Highlighter for ReplHelper {}

impl Validator for ReplHelper {}

impl Helper for ReplHelper {}

/// Creates a configured rustyline editor with the slash-command helper.
pub fn create_editor(
    commands: CommandDispatcher,
) -> Result<Editor<ReplHelper, FileHistory>, FlowdeckError> {
    let editor_config = Config::builder()
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .edit_mode(EditMode::Emacs)
        .build();

    let mut editor = Editor::with_config(editor_config)
        .map_err(|e| FlowdeckError::Input(format!("Failed to create line editor: {}", e)))?;
    editor.set_helper(Some(ReplHelper::new(commands)));

    let _ = editor.load_history(&config::input_history_path());

    Ok(editor)
}

/// Reads one line; `None` means the user asked to leave (Ctrl-C/Ctrl-D).
pub fn read_input(
    editor: &mut Editor<ReplHelper, FileHistory>,
) -> Result<Option<String>, FlowdeckError> {
    let prompt = style("> ").bold().cyan().to_string();
    match editor.readline(&prompt) {
        Ok(line) => {
            if !line.trim().is_empty() {
                if let Err(e) = editor.add_history_entry(&line) {
                    return Err(FlowdeckError::Input(format!(
                        "Failed to add history entry: {}",
                        e
                    )));
                }
            }
            Ok(Some(line))
        }
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
            println!("Exiting...");
            Ok(None)
        }
        Err(err) => Err(FlowdeckError::Input(format!("Input error: {}", err))),
    }
}

/// Saves the editor history under the state directory.
pub fn save_history(editor: &mut Editor<ReplHelper, FileHistory>) -> Result<(), FlowdeckError> {
    let history_path = config::input_history_path();

    if let Some(parent) = history_path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                FlowdeckError::Input(format!("Failed to create history directory: {}", e))
            })?;
        }
    }

    editor
        .save_history(&history_path)
        .map_err(|e| FlowdeckError::Input(format!("Failed to save history: {}", e)))
}
