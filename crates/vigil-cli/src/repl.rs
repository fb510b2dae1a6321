//! Interactive REPL (Read-Eval-Print Loop) mode.

use crate::cli::{GetArgs, SetArgs};
use crate::commands;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use vigil_domain::reserved::WATCHER_COUNTER_KEY;
use vigil_domain::StoreType;
use vigil_sdk::Vigil;

/// Run the interactive REPL.
///
/// Seeds the watcher counter at zero, then reads commands until `exit` or
/// end of input.
pub fn run_repl(vigil: &Vigil, config: &Config, formatter: &Formatter) -> Result<()> {
    vigil.set_integer(WATCHER_COUNTER_KEY, 0)?;

    println!("{}", formatter.info("Vigil REPL - Type 'help' for commands, 'exit' to quit"));
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)?
        .auto_add_history(false)
        .build();
    let mut editor = DefaultEditor::with_config(editor_config)?;

    let history_path = get_history_path()?;
    if editor.load_history(&history_path).is_err() {
        tracing::debug!("No history loaded from {}", history_path.display());
    }

    loop {
        match editor.readline("vigil> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }

                editor.add_history_entry(line.trim()).ok();

                match execute_line(&line, vigil, formatter) {
                    Ok(Some(output)) => println!("{}", output),
                    Ok(None) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
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

    if let Err(e) = editor.save_history(&history_path) {
        tracing::warn!("Failed to save history: {}", e);
    }

    Ok(())
}

/// REPL command type.
#[derive(Debug, PartialEq, Eq)]
enum ReplCommand {
    Exit,
    Help,
    Set(SetArgs),
    Get(GetArgs),
    List,
    Stats,
    StatsReset,
}

/// Run one REPL line, returning its output or `None` on exit.
pub fn execute_line(line: &str, vigil: &Vigil, formatter: &Formatter) -> Result<Option<String>> {
    let output = match parse_repl_command(line)? {
        ReplCommand::Exit => return Ok(None),
        ReplCommand::Help => help_text(),
        ReplCommand::Set(args) => commands::execute_set(args, vigil, formatter)?,
        ReplCommand::Get(args) => commands::execute_get(args, vigil, formatter)?,
        ReplCommand::List => commands::execute_list(vigil, formatter)?,
        ReplCommand::Stats => commands::execute_stats(vigil, formatter)?,
        ReplCommand::StatsReset => commands::execute_stats_reset(vigil, formatter)?,
    };
    Ok(Some(output))
}

/// Parse a REPL command line.
///
/// The value of `set` is everything after the single separator that follows
/// the key, kept as typed, so strings may contain and end with spaces.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let (command, rest) = next_word(line);

    match command {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "list" | "ls" => Ok(ReplCommand::List),
        "stats" => match rest.trim() {
            "" => Ok(ReplCommand::Stats),
            "reset" => Ok(ReplCommand::StatsReset),
            other => Err(CliError::InvalidInput(format!(
                "Unknown stats action: {}. Usage: stats [reset]",
                other
            ))),
        },
        "set" => {
            let (kind, rest) = next_word(rest);
            let (key, value) = next_word(rest);
            if kind.is_empty() || key.is_empty() {
                return Err(CliError::InvalidInput(
                    "Usage: set <type> <key> <value>".to_string(),
                ));
            }
            Ok(ReplCommand::Set(SetArgs {
                kind: parse_type(kind)?,
                key: key.to_string(),
                value: value.to_string(),
            }))
        }
        "get" => {
            let (kind, rest) = next_word(rest);
            let (key, extra) = next_word(rest);
            if kind.is_empty() || key.is_empty() || !extra.trim().is_empty() {
                return Err(CliError::InvalidInput(
                    "Usage: get <type> <key>".to_string(),
                ));
            }
            Ok(ReplCommand::Get(GetArgs {
                kind: parse_type(kind)?,
                key: key.to_string(),
            }))
        }
        "" => Err(CliError::InvalidInput("Empty command".to_string())),
        other => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            other
        ))),
    }
}

/// Split off the first whitespace-delimited word and the one separator after it.
fn next_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.char_indices().find(|(_, c)| c.is_whitespace()) {
        Some((end, separator)) => (&input[..end], &input[end + separator.len_utf8()..]),
        None => (input, ""),
    }
}

fn parse_type(word: &str) -> Result<StoreType> {
    StoreType::parse(word).ok_or_else(|| {
        CliError::InvalidInput(format!(
            "Unknown type: {}. Expected one of: integer, string, color, integer-array, color-array",
            word
        ))
    })
}

fn get_history_path() -> Result<PathBuf> {
    let vigil_dir = Config::dir()?;
    std::fs::create_dir_all(&vigil_dir)?;
    Ok(vigil_dir.join("history"))
}

fn help_text() -> String {
    [
        "Available commands:",
        "",
        "  set <type> <key> <value>  - Store a value",
        "  get <type> <key>          - Read a value",
        "    type: integer|string|color|integer-array|color-array",
        "    arrays are ';'-separated, e.g. 1;2;3 or red;#00FF00",
        "  list, ls                  - Show every entry",
        "  stats                     - Show watcher metrics",
        "  stats reset               - Clear watcher metrics",
        "  help, ?                   - Show this help",
        "  exit, quit, q             - Exit REPL",
    ]
    .join("\n")
}
