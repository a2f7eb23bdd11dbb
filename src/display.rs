use crate::catalog::Workflow;
use crate::commands::{PanelView, Workspace};
use crate::conversation::{ConversationEntry, EntryRole};
use console::{measure_text_width, style};

fn panel_width(full_screen: bool) -> usize {
    let term = console::Term::stdout();
    let terminal_width = term.size().1 as usize;
    let cap = if full_screen { 120 } else { 84 };
    std::cmp::min(terminal_width.saturating_sub(4), cap).max(40)
}

/// Wrap a line to a maximum display width, breaking at spaces when possible.
fn wrap_line(line: &str, max_width: usize) -> Vec<String> {
    if measure_text_width(line) <= max_width {
        return vec![line.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if measure_text_width(&candidate) > max_width && !current.is_empty() {
            lines.push(current);
            current = word.to_string();
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(line.to_string());
    }
    lines
}

fn looks_like_markdown(text: &str) -> bool {
    text.contains("```") || text.contains('*') || text.contains('`') || text.contains('#')
}

/// Render assistant text, upgrading to markdown when it looks like markdown.
pub fn assistant_text(content: &str) {
    if looks_like_markdown(content) {
        let skin = termimad::MadSkin::default();
        skin.print_text(content);
    } else {
        println!("{}", content);
    }
}

/// One transcript line: role label, timestamp, content.
pub fn conversation_entry(entry: &ConversationEntry) {
    let stamp = entry.created_at.format("%H:%M:%S");
    let label = match entry.role {
        EntryRole::User => style("you").bold().cyan(),
        EntryRole::Assistant => style("assistant").bold().green(),
    };
    println!("\n{} {}", label, style(stamp).dim());
    match entry.role {
        EntryRole::User => println!("{}", entry.content),
        EntryRole::Assistant => assistant_text(&entry.content),
    }
}

/// The side panel for the open workflow, honoring the collapse/fullscreen
/// toggles and the selected pane.
pub fn workflow_panel(workflow: &Workflow, workspace: &Workspace) {
    if workspace.collapsed {
        println!(
            "{}",
            style(format!(
                "[panel collapsed] {} - use /panel expand to show it",
                workflow.name
            ))
            .dim()
        );
        return;
    }

    let width = panel_width(workspace.full_screen);
    println!(
        "\n{} {}",
        style(&workflow.name).bold().magenta(),
        style(format!("(last run {})", workflow.last_run)).dim()
    );

    if workspace.view == PanelView::Preview {
        println!("{}", style("── preview ──").dim().blue());
        let skin = termimad::MadSkin::default();
        skin.print_text(&workflow.preview);
        return;
    }

    let body = match workspace.view {
        PanelView::Code => &workflow.code,
        PanelView::Design => &workflow.design,
        PanelView::Execution => &workflow.execution,
        PanelView::Preview => unreachable!(),
    };

    let title = workspace.view.label();
    let header_prefix = format!("┌─ {} ", title);
    let header = header_prefix.clone()
        + &"─".repeat(width.saturating_sub(measure_text_width(&header_prefix) + 1))
        + "┐";
    let footer = "└".to_string() + &"─".repeat(width - 2) + "┘";
    let content_width = width - 4;

    println!("{}", style(&header).dim().green());
    for raw_line in body.lines() {
        for line in wrap_line(raw_line, content_width) {
            let padding = content_width.saturating_sub(measure_text_width(&line));
            println!("│ {}{} │", line, " ".repeat(padding));
        }
    }
    println!("{}", style(&footer).dim().green());
}

pub fn error(message: &str) {
    eprintln!("{} {}", style("error:").bold().red(), message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_lines_are_left_alone() {
        assert_eq!(wrap_line("hello world", 40), vec!["hello world"]);
    }

    #[test]
    fn long_lines_break_at_spaces() {
        let wrapped = wrap_line("alpha beta gamma delta", 11);
        assert_eq!(wrapped, vec!["alpha beta", "gamma delta"]);
        for line in &wrapped {
            assert!(measure_text_width(line) <= 11);
        }
    }

    #[test]
    fn markdown_heuristic_matches_fenced_blocks() {
        assert!(looks_like_markdown("run ```ls``` first"));
        assert!(!looks_like_markdown("plain sentence"));
    }
}
