//! # twl - Taskwarrior query launcher
//!
//! A query-driven front-end for Taskwarrior: short textual queries in, a
//! ranked list of actionable results out.
//!
//! ## Key Features
//!
//! - **Trigger-prefixed queries**: everything after the trigger (default
//!   `"t "`) is either a built-in subcommand or free-text search
//! - **Built-in subcommands**: `add`, `today`, `yesterday`, `tomorrow`
//! - **Fuzzy search**: free text is ranked against task descriptions and the
//!   top 30 matches returned in similarity order
//! - **Quick actions**: complete, delete, start, stop, interactive edit,
//!   copy-UUID, embedded-URL opening, and an optional reminders tag
//! - **Two surfaces**: an interactive TUI (`twl ui`) and a one-shot printer
//!   (`twl query`) for scripting and host launchers
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the interactive query surface
//! twl ui
//!
//! # One-shot: everything, sorted by urgency
//! twl query "t "
//!
//! # One-shot: today's tasks
//! twl query "t today"
//!
//! # One-shot: fuzzy search
//! twl query "t buy milk"
//!
//! # Configure the reminders tag appended by the "Add to Reminders" action
//! twl reminders remindme
//! ```
//!
//! Mutations run through the `task` command line with confirmation prompts
//! suppressed, and every mutation refreshes the cached task snapshot on the
//! next query. The reminders tag is stored under `~/.twl/`.

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

pub mod cli;
pub mod cmd;
pub mod config;
pub mod dates;
pub mod exec;
pub mod items;
pub mod query;
pub mod store;
pub mod subcommands;
pub mod task;
pub mod urls;
pub mod visuals;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod run;
}

use cli::Cli;
use cmd::*;
use query::{EngineConfig, ErrorPolicy};
use store::TaskStore;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // The config dir is optional; the launcher still works without it.
    let launcher_dir = config::launcher_dir();
    if let Err(e) = std::fs::create_dir_all(&launcher_dir) {
        warn!("failed to create {}: {e}", launcher_dir.display());
    }

    let cfg = EngineConfig {
        trigger: cli.trigger.clone(),
        error_policy: if cli.diagnostic {
            ErrorPolicy::Propagate
        } else {
            ErrorPolicy::Report
        },
        ..EngineConfig::default()
    };
    let mut store = TaskStore::with_bin(cli.task_bin.clone());

    match cli.command {
        Commands::Ui => cmd_ui(store, cfg),
        Commands::Query { raw } => cmd_query(&mut store, &cfg, &raw),
        Commands::Reminders { tag, clear } => cmd_reminders(tag, clear),
        Commands::Completions { shell } => cmd_completions(shell),
    }
}
