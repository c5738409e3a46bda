//! Interactive REPL (Read-Eval-Print Loop) mode.

use crate::commands::ask::submit_and_collect;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use legalbot_domain::Domain;
use legalbot_sdk::Assistant;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::collections::HashSet;
use std::path::Path;

/// REPL line type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Leave the REPL
    Exit,
    /// Print the command list
    Help,
    /// Make a domain active
    Switch(Domain),
    /// Print the history log
    History,
    /// Empty the history log
    Clear,
    /// Print the active domain's transcript
    Messages,
    /// Submit free text to the active domain
    Query(String),
}

/// Parse a REPL line; anything not starting with `/` is a query.
pub fn parse_repl_line(line: &str) -> Result<ReplCommand> {
    let line = line.trim();
    let Some(command) = line.strip_prefix('/') else {
        return Ok(ReplCommand::Query(line.to_string()));
    };

    let name = command.split_whitespace().next().unwrap_or_default();
    match name.to_lowercase().as_str() {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "history" => Ok(ReplCommand::History),
        "clear" => Ok(ReplCommand::Clear),
        "messages" => Ok(ReplCommand::Messages),
        other => Domain::parse(other).map(ReplCommand::Switch).ok_or_else(|| {
            CliError::InvalidInput(format!(
                "Unknown command: /{}. Type '/help' for available commands.",
                name
            ))
        }),
    }
}

/// Which domain is active and which have been shown.
#[derive(Debug)]
pub struct ReplState {
    active: Domain,
    visited: HashSet<Domain>,
}

impl ReplState {
    /// Start on `domain`, counting it as visited.
    pub fn new(domain: Domain) -> Self {
        Self {
            active: domain,
            visited: HashSet::from([domain]),
        }
    }

    /// Active domain.
    pub fn active(&self) -> Domain {
        self.active
    }

    /// Make `domain` active; `true` on its first visit.
    pub fn switch(&mut self, domain: Domain) -> bool {
        self.active = domain;
        self.visited.insert(domain)
    }

    fn prompt(&self) -> String {
        format!("legalbot [{}]> ", self.active.tag())
    }
}

/// Run the interactive REPL.
pub async fn run_repl(
    assistant: &Assistant,
    history_path: &Path,
    history_size: usize,
    formatter: &Formatter,
) -> Result<()> {
    println!(
        "{}",
        formatter.info("LegalBot REPL - Type '/help' for commands, '/exit' to quit")
    );
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(history_size)
        .map_err(|e| CliError::Readline(e.to_string()))?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config)
        .map_err(|e| CliError::Readline(format!("Failed to initialize editor: {}", e)))?;

    if let Some(parent) = history_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let _ = editor.load_history(history_path);

    let mut state = ReplState::new(Domain::CodeSection);
    print_greeting(assistant, state.active(), formatter)?;

    loop {
        match editor.readline(&state.prompt()) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_line(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(cmd) => {
                        if let Err(e) =
                            execute_repl_command(cmd, &mut state, assistant, formatter).await
                        {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use '/exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(history_path).ok();

    Ok(())
}

/// Execute a REPL command.
async fn execute_repl_command(
    cmd: ReplCommand,
    state: &mut ReplState,
    assistant: &Assistant,
    formatter: &Formatter,
) -> Result<()> {
    match cmd {
        ReplCommand::Exit => {}
        ReplCommand::Help => print_help(formatter),
        ReplCommand::Switch(domain) => {
            let first_visit = state.switch(domain);
            println!("{}", formatter.info(&format!("Switched to {}", domain.title())));
            if first_visit {
                print_greeting(assistant, domain, formatter)?;
            }
        }
        ReplCommand::History => {
            println!("{}", formatter.format_history(&assistant.history().all())?);
        }
        ReplCommand::Clear => {
            if assistant.history().is_empty() {
                println!(
                    "{}",
                    formatter.warning("No chat history yet. Start a conversation to see your queries here.")
                );
            } else {
                let removed = assistant.clear_history();
                println!(
                    "{}",
                    formatter.success(&format!("Cleared {} history entries", removed))
                );
            }
        }
        ReplCommand::Messages => {
            let messages = assistant.controller(state.active()).messages_since(0);
            println!("{}", formatter.format_messages(&messages)?);
        }
        ReplCommand::Query(query) => {
            let replies = submit_and_collect(assistant, state.active(), &query, formatter).await?;
            println!("{}", formatter.format_messages(&replies)?);
        }
    }

    Ok(())
}

fn print_greeting(assistant: &Assistant, domain: Domain, formatter: &Formatter) -> Result<()> {
    let greeting = assistant.controller(domain).messages_since(0);
    if let Some(first) = greeting.first() {
        println!("{}", formatter.format_messages(std::slice::from_ref(first))?);
    }
    println!();
    Ok(())
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  <text>                 - Ask the active assistant");
    println!("  /ipc                   - IPC Section Finder");
    println!("  /precedent             - Precedence Finder");
    println!("  /document              - Legal Document Creator");
    println!("  /history               - Show the chat history");
    println!("  /clear                 - Clear the chat history");
    println!("  /messages              - Show the active conversation");
    println!("  /help, /?              - Show this help");
    println!("  /exit, /quit, /q       - Exit REPL");
    println!();
}
