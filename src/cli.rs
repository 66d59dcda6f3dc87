use clap::Parser;

use crate::cmd::Commands;

/// Query-driven launcher front-end for Taskwarrior.
/// Queries carry a trigger prefix (default "t ") ahead of the free text.
#[derive(Parser)]
#[command(name = "twl", version, about = "Taskwarrior query launcher")]
pub struct Cli {
    /// Trigger prefix expected in front of every query.
    #[arg(long, global = true, default_value = "t ")]
    pub trigger: String,

    /// Task store executable.
    #[arg(long, global = true, default_value = "task")]
    pub task_bin: String,

    /// Log and re-raise resolution failures instead of rendering them as a
    /// reportable result.
    #[arg(long, global = true)]
    pub diagnostic: bool,

    #[command(subcommand)]
    pub command: Commands,
}
