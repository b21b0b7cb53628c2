//! # td - Task and project workspace CLI
//!
//! A file-backed task/project manager with list, kanban, calendar and gantt
//! views over a single JSON document.
//!
//! ## Key Features
//!
//! - **Tasks with rich metadata**: status, priority, start/due dates, tags,
//!   assignee, subtasks, dependencies, and a completion fraction
//! - **Projects**: every task belongs to exactly one project; deleting a
//!   project cascades to its tasks
//! - **Derived views**: `td board`, `td calendar` and `td gantt` are pure
//!   projections over the same store the list view reads
//! - **Local file storage**: the whole workspace persists as one JSON
//!   document, replaced atomically on every mutation
//! - **Mock session**: `td login` installs a local identity with no real
//!   credential verification behind it
//!
//! ## Quick Start
//!
//! ```bash
//! # Add a task to the seeded default project
//! td add "Ship the release notes" --due "in 3d" --priority high
//!
//! # List tasks, or view the board
//! td list
//! td board
//!
//! # Create and select a project
//! td project add "Side Quest"
//! td project use "Side Quest"
//! ```
//!
//! Data is stored in `~/.taskdeck/` (override with `--dir`): the workspace
//! under `task-storage.json`, the session identity under
//! `auth-storage.json`, and rolling logs under `logs/`.

use std::path::PathBuf;

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod error;
pub mod fields;
pub mod logging;
pub mod project;
pub mod query;
pub mod session;
pub mod store;
pub mod task;

use cli::Cli;
use cmd::Commands;
use session::Session;
use store::Workspace;

fn main() {
    let cli = Cli::parse();

    let data_dir = cli.dir.unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".taskdeck")
    });
    if let Err(e) = std::fs::create_dir_all(&data_dir) {
        eprintln!("Failed to create data directory {}: {e}", data_dir.display());
        std::process::exit(1);
    }

    // Logging goes to files; a broken logger degrades to an unlogged run.
    let _logger = match logging::init_logging(&data_dir) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Warning: {e}");
            None
        }
    };

    // Session and completion commands don't need the workspace document.
    match &cli.command {
        Commands::Completions { shell } => {
            cmd::cmd_completions(*shell);
            return;
        }
        Commands::Login { email, password } => {
            let mut session = Session::open(&data_dir);
            cmd::cmd_login(&mut session, email.clone(), password.clone());
            return;
        }
        Commands::Signup { name, email, password } => {
            let mut session = Session::open(&data_dir);
            cmd::cmd_signup(&mut session, name.clone(), email.clone(), password.clone());
            return;
        }
        Commands::Logout => {
            let mut session = Session::open(&data_dir);
            cmd::cmd_logout(&mut session);
            return;
        }
        Commands::Whoami => {
            let session = Session::open(&data_dir);
            cmd::cmd_whoami(&session);
            return;
        }
        _ => {}
    }

    let mut ws = match Workspace::open(&data_dir) {
        Ok(ws) => ws,
        Err(e) => {
            eprintln!("Failed to open workspace: {e}");
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Add {
            title, desc, project, status, priority, start, due, assignee, tags,
            dependencies, progress,
        } => cmd::cmd_add(
            &mut ws, title, desc, project, status, priority, start, due, assignee,
            tags, dependencies, progress,
        ),

        Commands::List { project, all, status, priority } =>
            cmd::cmd_list(&ws, project, all, status, priority),

        Commands::View { id } => cmd::cmd_view(&ws, id),

        Commands::Update {
            id, title, desc, status, priority, start, due, assignee, project, tags,
            progress, clear_start, clear_due, clear_assignee,
        } => cmd::cmd_update(
            &mut ws, id, title, desc, status, priority, start, due, assignee,
            project, tags, progress, clear_start, clear_due, clear_assignee,
        ),

        Commands::Delete { id } => cmd::cmd_delete(&mut ws, id),

        Commands::Subtask { action } => cmd::cmd_subtask(&mut ws, action),

        Commands::Project { action } => cmd::cmd_project(&mut ws, action),

        Commands::Board { project, all } => cmd::cmd_board(&ws, project, all),

        Commands::Calendar { project, all } => cmd::cmd_calendar(&ws, project, all),

        Commands::Gantt { project, all } => cmd::cmd_gantt(&ws, project, all),

        Commands::ViewMode { mode } => cmd::cmd_view_mode(&mut ws, mode),

        Commands::Completions { .. }
        | Commands::Login { .. }
        | Commands::Signup { .. }
        | Commands::Logout
        | Commands::Whoami => unreachable!("session commands handled above"),
    }
}
