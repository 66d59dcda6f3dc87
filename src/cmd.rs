//! Command implementations for the CLI interface.
//!
//! Thin handlers over the query engine: a one-shot query printer for
//! scripting and host surfaces, the interactive TUI, reminders-tag
//! management, and shell completions.

use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::config;
use crate::query::{resolve_query, EngineConfig};
use crate::store::TaskStore;
use crate::tui::run::run_query_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive query surface.
    Ui,

    /// Resolve a single query and print the results.
    Query {
        /// Raw query text, including the trigger prefix.
        raw: String,
    },

    /// Show, set or clear the reminders tag used by the "Add to Reminders"
    /// task action.
    Reminders {
        /// Tag to persist; omit to show the current value.
        tag: Option<String>,
        /// Remove the persisted tag.
        #[arg(long)]
        clear: bool,
    },

    /// Generate shell completion scripts.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Resolve `raw` once and print the result list.
pub fn cmd_query(store: &mut TaskStore, cfg: &EngineConfig, raw: &str) {
    let items = match resolve_query(raw, store, cfg) {
        Ok(items) => items,
        Err(e) => {
            eprintln!("Query failed: {e:#}");
            std::process::exit(1);
        }
    };

    if items.is_empty() {
        println!(
            "No results. Queries must start with the trigger prefix (\"{}\").",
            cfg.trigger
        );
        return;
    }

    for (i, item) in items.iter().enumerate() {
        if item.subtext.is_empty() {
            println!("{:>3}. {}", i + 1, item.text);
        } else {
            println!("{:>3}. {}  [{}]", i + 1, item.text, item.subtext);
        }
        for action in &item.actions {
            println!("       - {}", action.label);
        }
    }
}

/// Launch the interactive query surface.
pub fn cmd_ui(store: TaskStore, cfg: EngineConfig) {
    if let Err(e) = run_query_tui(store, cfg) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

/// Show, set or clear the persisted reminders tag.
pub fn cmd_reminders(tag: Option<String>, clear: bool) {
    let path = config::reminders_tag_file();

    if clear {
        match std::fs::remove_file(&path) {
            Ok(_) => println!("Reminders tag cleared."),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                println!("No reminders tag was set.")
            }
            Err(e) => {
                eprintln!("Failed to clear reminders tag: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    match tag {
        Some(tag) => {
            let tag = tag.trim().to_string();
            if tag.is_empty() || tag.split_whitespace().count() != 1 {
                eprintln!("The reminders tag must be a single word.");
                std::process::exit(1);
            }
            if let Err(e) = config::save_value(&path, &tag) {
                eprintln!("Failed to save reminders tag: {e}");
                std::process::exit(1);
            }
            println!("Reminders tag set to +{tag}.");
        }
        None => match config::load_value(&path) {
            Some(tag) => println!("Reminders tag: +{tag}"),
            None => println!("No reminders tag set. Use `twl reminders <TAG>` to set one."),
        },
    }
}

/// Emit a completion script for the given shell.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}
