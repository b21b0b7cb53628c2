use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// File-backed task and project workspace CLI.
/// State lives under ~/.taskdeck or a directory passed via --dir.
#[derive(Parser)]
#[command(name = "td", version, about = "Task and project workspace CLI")]
pub struct Cli {
    /// Data directory holding the workspace and session documents.
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}
