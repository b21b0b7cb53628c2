//! Command implementations for the CLI interface.
//!
//! This module contains the subcommand definitions and their handlers, from
//! task/project CRUD through the derived board, calendar and gantt views to
//! the mock session commands. Handlers translate store errors into stderr
//! messages and a nonzero exit; benign no-ops stay silent successes.

use clap::{CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};

use crate::cli::Cli;
use crate::error::StoreError;
use crate::fields::*;
use crate::project::{NewProject, Project, ProjectPatch};
use crate::query::{self, TaskFilter};
use crate::session::Session;
use crate::store::Workspace;
use crate::task::{NewTask, Task, TaskPatch};

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new task.
    Add {
        /// Short title for the task.
        title: String,
        /// Optional longer description.
        #[arg(long, default_value = "")]
        desc: String,
        /// Project id or title. Defaults to the current project.
        #[arg(long)]
        project: Option<String>,
        /// Status: todo | in-progress | review | done | blocked.
        #[arg(long, value_enum)]
        status: Option<Status>,
        /// Priority: low | medium | high | critical.
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        /// Start date: YYYY-MM-DD, "today", "tomorrow", or "in Nd".
        #[arg(long)]
        start: Option<String>,
        /// Due date: YYYY-MM-DD, "today", "tomorrow", or "in Nd".
        #[arg(long)]
        due: Option<String>,
        /// Assignee identifier.
        #[arg(long)]
        assignee: Option<String>,
        /// Tag. May be repeated.
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Id of a task this one depends on. May be repeated.
        #[arg(long = "depends-on")]
        dependencies: Vec<String>,
        /// Completion fraction in [0, 1].
        #[arg(long, default_value_t = 0.0)]
        progress: f64,
    },

    /// List tasks with optional filters.
    List {
        /// Filter by project id or title. Defaults to the current project.
        #[arg(long)]
        project: Option<String>,
        /// List tasks across all projects.
        #[arg(long)]
        all: bool,
        /// Filter by status.
        #[arg(long, value_enum)]
        status: Option<Status>,
        /// Filter by priority.
        #[arg(long, value_enum)]
        priority: Option<Priority>,
    },

    /// View a single task by id, id prefix or title.
    View { id: String },

    /// Update fields on a task.
    Update {
        /// Task id, id prefix or title.
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        desc: Option<String>,
        #[arg(long, value_enum)]
        status: Option<Status>,
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        due: Option<String>,
        #[arg(long)]
        assignee: Option<String>,
        /// Move the task to another project (id or title).
        #[arg(long)]
        project: Option<String>,
        /// Replace tags. May be repeated.
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Completion fraction in [0, 1].
        #[arg(long)]
        progress: Option<f64>,
        /// Clear start date.
        #[arg(long)]
        clear_start: bool,
        /// Clear due date.
        #[arg(long)]
        clear_due: bool,
        /// Clear assignee.
        #[arg(long)]
        clear_assignee: bool,
    },

    /// Delete a task. Deleting an already-deleted id is a silent no-op.
    Delete {
        /// Task id, id prefix or title.
        id: String,
    },

    /// Manage subtasks of a task.
    Subtask {
        #[command(subcommand)]
        action: SubtaskAction,
    },

    /// Manage projects.
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Show the kanban board (per-status columns and counts).
    Board {
        /// Project id or title. Defaults to the current project.
        #[arg(long)]
        project: Option<String>,
        /// Include all projects.
        #[arg(long)]
        all: bool,
    },

    /// Show tasks bucketed by due date.
    Calendar {
        #[arg(long)]
        project: Option<String>,
        #[arg(long)]
        all: bool,
    },

    /// Show tasks with a start/due span, ordered by start date.
    Gantt {
        #[arg(long)]
        project: Option<String>,
        #[arg(long)]
        all: bool,
    },

    /// Show or set the active view mode.
    ViewMode {
        #[arg(value_enum)]
        mode: Option<ViewMode>,
    },

    /// Log in (mock; no real verification).
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Create an account (mock).
    Signup {
        name: String,
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Log out.
    Logout,

    /// Show the current session identity.
    Whoami,

    /// Generate shell completion scripts.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum SubtaskAction {
    /// Append a subtask to a task.
    Add {
        /// Parent task id, id prefix or title.
        task: String,
        title: String,
    },
    /// Mark a subtask complete.
    Done {
        task: String,
        /// Subtask id or id prefix.
        subtask: String,
    },
    /// Mark a subtask incomplete again.
    Reopen {
        task: String,
        subtask: String,
    },
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Create a project.
    Add {
        title: String,
        #[arg(long, default_value = "")]
        desc: String,
        /// Display colour, e.g. "#3b82f6".
        #[arg(long)]
        color: Option<String>,
        /// Member identifier. May be repeated.
        #[arg(long = "member")]
        members: Vec<String>,
    },
    /// List projects with task counts.
    List,
    /// Update fields on a project.
    Update {
        /// Project id, id prefix or title.
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        desc: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a project and every task in it.
    Delete {
        /// Project id, id prefix or title.
        id: String,
    },
    /// Select the current project, or clear the selection.
    Use {
        /// Project id or title; omit to clear the selection.
        project: Option<String>,
    },
}

fn unwrap_or_exit<T>(result: Result<T, StoreError>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Resolve a task identifier: exact id, unique id prefix, or exact title
/// (case-insensitive).
pub fn resolve_task(ws: &Workspace, identifier: &str) -> Result<String, String> {
    if ws.task(identifier).is_some() {
        return Ok(identifier.to_string());
    }
    let by_prefix: Vec<&Task> = ws
        .tasks()
        .iter()
        .filter(|t| t.id.starts_with(identifier))
        .collect();
    match by_prefix.len() {
        1 => return Ok(by_prefix[0].id.clone()),
        n if n > 1 => {
            return Err(format!(
                "id prefix '{identifier}' is ambiguous ({n} matches); use a longer prefix"
            ))
        }
        _ => {}
    }
    let by_title: Vec<&Task> = ws
        .tasks()
        .iter()
        .filter(|t| t.title.eq_ignore_ascii_case(identifier))
        .collect();
    match by_title.len() {
        0 => Err(format!("no task found matching '{identifier}'")),
        1 => Ok(by_title[0].id.clone()),
        _ => {
            let mut msg = format!("multiple tasks titled '{identifier}':\n");
            for t in by_title {
                msg.push_str(&format!("  {}  {}\n", short_id(&t.id), t.title));
            }
            msg.push_str("Use the id instead.");
            Err(msg)
        }
    }
}

/// Resolve a project identifier: exact id, unique id prefix, or exact title
/// (case-insensitive).
pub fn resolve_project(ws: &Workspace, identifier: &str) -> Result<String, String> {
    if ws.project(identifier).is_some() {
        return Ok(identifier.to_string());
    }
    let by_prefix: Vec<&Project> = ws
        .projects()
        .iter()
        .filter(|p| p.id.starts_with(identifier))
        .collect();
    if by_prefix.len() == 1 {
        return Ok(by_prefix[0].id.clone());
    }
    let by_title: Vec<&Project> = ws
        .projects()
        .iter()
        .filter(|p| p.title.eq_ignore_ascii_case(identifier))
        .collect();
    match by_title.len() {
        0 => Err(format!("no project found matching '{identifier}'")),
        1 => Ok(by_title[0].id.clone()),
        _ => Err(format!(
            "multiple projects titled '{identifier}'; use the id instead"
        )),
    }
}

fn resolve_task_or_exit(ws: &Workspace, identifier: &str) -> String {
    resolve_task(ws, identifier).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    })
}

fn resolve_project_or_exit(ws: &Workspace, identifier: &str) -> String {
    resolve_project(ws, identifier).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    })
}

/// The project scope for list-like commands: `--project` wins, then the
/// current selection, unless `--all` disables scoping.
fn scope_project(ws: &Workspace, project: Option<String>, all: bool) -> Option<String> {
    if all {
        return None;
    }
    match project {
        Some(p) => Some(resolve_project_or_exit(ws, &p)),
        None => ws.current_project().cloned(),
    }
}

/// Parse human-readable date input.
///
/// Supports "today", "tomorrow", "in Nd", "in Nw" and YYYY-MM-DD.
pub fn parse_date_input(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim().to_lowercase();
    let today = Local::now().date_naive();
    let date = match s.as_str() {
        "today" => Some(today),
        "tomorrow" => Some(today + Duration::days(1)),
        _ => {
            if let Some(rest) = s.strip_prefix("in ") {
                if let Some(nd) = rest.strip_suffix('d') {
                    nd.trim().parse::<i64>().ok().map(|n| today + Duration::days(n))
                } else if let Some(nw) = rest.strip_suffix('w') {
                    nw.trim().parse::<i64>().ok().map(|n| today + Duration::weeks(n))
                } else {
                    None
                }
            } else {
                NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
            }
        }
    }?;
    date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc())
}

fn parse_date_or_exit(s: &str) -> DateTime<Utc> {
    match parse_date_input(s) {
        Some(d) => d,
        None => {
            eprintln!("Error: unrecognised date '{s}' (try YYYY-MM-DD, today, tomorrow, in 3d)");
            std::process::exit(1);
        }
    }
}

/// Format a due date relative to today ("today", "tomorrow", "in 3d", "2d late").
pub fn format_due_relative(due: Option<DateTime<Utc>>, today: NaiveDate) -> String {
    match due {
        None => "-".into(),
        Some(d) => {
            let days = (d.date_naive() - today).num_days();
            match days {
                0 => "today".into(),
                1 => "tomorrow".into(),
                n if n > 1 => format!("in {n}d"),
                n => format!("{}d late", -n),
            }
        }
    }
}

fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

fn print_task_table(ws: &Workspace, tasks: &[&Task]) {
    println!(
        "{:<9} {:<11} {:<9} {:<10} {:<5} {:<16} {}",
        "ID", "Status", "Pri", "Due", "Prog", "Project", "Title [tags]"
    );
    let today = Local::now().date_naive();
    for t in tasks {
        let tags = if t.tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", t.tags.join(","))
        };
        let project = ws
            .project(&t.project_id)
            .map(|p| p.title.clone())
            .unwrap_or_else(|| t.project_id.clone());
        println!(
            "{:<9} {:<11} {:<9} {:<10} {:<5} {:<16} {}{}",
            short_id(&t.id),
            format_status(t.status),
            format_priority(t.priority),
            format_due_relative(t.due_date, today),
            format!("{:.0}%", t.progress * 100.0),
            truncate(&project, 16),
            t.title,
            tags
        );
    }
}

/// Add a new task.
pub fn cmd_add(
    ws: &mut Workspace,
    title: String,
    desc: String,
    project: Option<String>,
    status: Option<Status>,
    priority: Option<Priority>,
    start: Option<String>,
    due: Option<String>,
    assignee: Option<String>,
    tags: Vec<String>,
    dependencies: Vec<String>,
    progress: f64,
) {
    let project_id = match project {
        Some(p) => resolve_project_or_exit(ws, &p),
        None => match ws.current_project() {
            Some(p) => p.clone(),
            None => {
                eprintln!("Error: no project selected; pass --project or run `td project use`");
                std::process::exit(1);
            }
        },
    };
    let dependencies = dependencies
        .iter()
        .map(|d| resolve_task_or_exit(ws, d))
        .collect();
    let task = unwrap_or_exit(ws.add_task(NewTask {
        title,
        description: desc,
        status,
        priority,
        start_date: start.as_deref().map(parse_date_or_exit),
        due_date: due.as_deref().map(parse_date_or_exit),
        assignee,
        tags,
        subtasks: Vec::new(),
        dependencies,
        progress,
        project_id,
    }));
    println!("Added task {}", short_id(&task.id));
}

/// List tasks with optional filtering.
pub fn cmd_list(
    ws: &Workspace,
    project: Option<String>,
    all: bool,
    status: Option<Status>,
    priority: Option<Priority>,
) {
    let filter = TaskFilter {
        project: scope_project(ws, project, all),
        status,
        priority,
    };
    let tasks = query::filter_tasks(ws, &filter);
    print_task_table(ws, &tasks);
}

/// View detailed information about a single task.
pub fn cmd_view(ws: &Workspace, id: String) {
    let task_id = resolve_task_or_exit(ws, &id);
    let Some(task) = ws.task(&task_id) else {
        eprintln!("Error: task {task_id} not found");
        std::process::exit(1);
    };
    let today = Local::now().date_naive();
    let project = ws
        .project(&task.project_id)
        .map(|p| p.title.clone())
        .unwrap_or_else(|| task.project_id.clone());
    println!("ID:          {}", task.id);
    println!("Title:       {}", task.title);
    println!("Status:      {}", format_status(task.status));
    println!("Priority:    {}", format_priority(task.priority));
    println!("Project:     {project}");
    println!("Progress:    {:.0}%", task.progress * 100.0);
    println!(
        "Start:       {}",
        task.start_date.map(|d| d.date_naive().to_string()).unwrap_or_else(|| "-".into())
    );
    println!(
        "Due:         {}",
        match task.due_date {
            Some(d) => format!("{} ({})", d.date_naive(), format_due_relative(Some(d), today)),
            None => "-".into(),
        }
    );
    println!(
        "Assignee:    {}",
        task.assignee.as_deref().unwrap_or("-")
    );
    println!(
        "Tags:        {}",
        if task.tags.is_empty() { "-".into() } else { task.tags.join(",") }
    );
    println!(
        "Depends on:  {}",
        if task.dependencies.is_empty() {
            "-".into()
        } else {
            task.dependencies.iter().map(|d| short_id(d)).collect::<Vec<_>>().join(", ")
        }
    );
    println!("Created:     {}", task.created_at.to_rfc3339());
    println!("Updated:     {}", task.updated_at.to_rfc3339());
    println!("Description:\n{}", if task.description.is_empty() { "-" } else { &task.description });
    if !task.subtasks.is_empty() {
        println!("Subtasks:");
        for s in &task.subtasks {
            let mark = if s.completed { "x" } else { " " };
            println!("  [{mark}] {}  {}", short_id(&s.id), s.title);
        }
    }
}

/// Update fields on an existing task.
pub fn cmd_update(
    ws: &mut Workspace,
    id: String,
    title: Option<String>,
    desc: Option<String>,
    status: Option<Status>,
    priority: Option<Priority>,
    start: Option<String>,
    due: Option<String>,
    assignee: Option<String>,
    project: Option<String>,
    tags: Vec<String>,
    progress: Option<f64>,
    clear_start: bool,
    clear_due: bool,
    clear_assignee: bool,
) {
    let task_id = resolve_task_or_exit(ws, &id);
    let project_id = project.map(|p| resolve_project_or_exit(ws, &p));
    let patch = TaskPatch {
        title,
        description: desc,
        status,
        priority,
        start_date: start.as_deref().map(parse_date_or_exit),
        due_date: due.as_deref().map(parse_date_or_exit),
        assignee,
        tags: if tags.is_empty() { None } else { Some(tags) },
        subtasks: None,
        dependencies: None,
        progress,
        project_id,
        clear_start,
        clear_due,
        clear_assignee,
    };
    if patch.is_empty() {
        eprintln!("Nothing to update.");
        std::process::exit(1);
    }
    let task = unwrap_or_exit(ws.update_task(&task_id, patch));
    println!("Updated task {}", short_id(&task.id));
}

/// Delete a task. Absent ids are a silent no-op per the store contract,
/// but an identifier that resolves to nothing is still reported.
pub fn cmd_delete(ws: &mut Workspace, id: String) {
    let task_id = match resolve_task(ws, &id) {
        Ok(t) => t,
        // Already gone: deleting twice is a harmless no-op.
        Err(_) => return,
    };
    if unwrap_or_exit(ws.delete_task(&task_id)) {
        println!("Deleted task {}", short_id(&task_id));
    }
}

/// Handle `td subtask ...`.
pub fn cmd_subtask(ws: &mut Workspace, action: SubtaskAction) {
    match action {
        SubtaskAction::Add { task, title } => {
            let task_id = resolve_task_or_exit(ws, &task);
            let sub = unwrap_or_exit(ws.add_subtask(&task_id, title));
            println!("Added subtask {}", short_id(&sub.id));
        }
        SubtaskAction::Done { task, subtask } => {
            set_subtask(ws, &task, &subtask, true);
        }
        SubtaskAction::Reopen { task, subtask } => {
            set_subtask(ws, &task, &subtask, false);
        }
    }
}

fn set_subtask(ws: &mut Workspace, task: &str, subtask: &str, completed: bool) {
    let task_id = resolve_task_or_exit(ws, task);
    let subtask_id = ws
        .task(&task_id)
        .and_then(|t| {
            t.subtasks
                .iter()
                .find(|s| s.id == subtask || s.id.starts_with(subtask))
                .map(|s| s.id.clone())
        })
        .unwrap_or_else(|| subtask.to_string());
    unwrap_or_exit(ws.set_subtask_completed(&task_id, &subtask_id, completed));
    println!("Subtask {}", if completed { "done" } else { "reopened" });
}

/// Handle `td project ...`.
pub fn cmd_project(ws: &mut Workspace, action: ProjectAction) {
    match action {
        ProjectAction::Add { title, desc, color, members } => {
            let project = unwrap_or_exit(ws.add_project(NewProject {
                title,
                description: desc,
                color,
                members,
            }));
            println!("Added project {} ({})", project.title, short_id(&project.id));
        }
        ProjectAction::List => {
            println!("{:<9} {:<8} {:<7} {:<20}", "ID", "Color", "Tasks", "Title");
            for p in ws.projects() {
                let count = query::project_task_ids(ws, &p.id).len();
                let marker = if ws.current_project().map(String::as_str) == Some(p.id.as_str()) {
                    " *"
                } else {
                    ""
                };
                println!(
                    "{:<9} {:<8} {:<7} {}{}",
                    short_id(&p.id),
                    p.color,
                    count,
                    p.title,
                    marker
                );
            }
        }
        ProjectAction::Update { id, title, desc, color } => {
            let project_id = resolve_project_or_exit(ws, &id);
            let project = unwrap_or_exit(ws.update_project(
                &project_id,
                ProjectPatch { title, description: desc, color, members: None },
            ));
            println!("Updated project {}", short_id(&project.id));
        }
        ProjectAction::Delete { id } => {
            let project_id = match resolve_project(ws, &id) {
                Ok(p) => p,
                Err(_) => return,
            };
            let cascade = query::project_task_ids(ws, &project_id).len();
            if unwrap_or_exit(ws.delete_project(&project_id)) {
                println!("Deleted project {} and {cascade} task(s)", short_id(&project_id));
            }
        }
        ProjectAction::Use { project } => match project {
            Some(p) => {
                let project_id = resolve_project_or_exit(ws, &p);
                unwrap_or_exit(ws.set_current_project(Some(project_id.clone())));
                println!("Using project {}", short_id(&project_id));
            }
            None => {
                unwrap_or_exit(ws.set_current_project(None));
                println!("Cleared project selection");
            }
        },
    }
}

/// Show the kanban board.
pub fn cmd_board(ws: &Workspace, project: Option<String>, all: bool) {
    let scope = scope_project(ws, project, all);
    let counts = query::board_counts(ws, scope.as_deref());
    let summary: Vec<String> = counts
        .iter()
        .map(|(status, n)| format!("{}:{n}", format_status(*status)))
        .collect();
    println!("{}", summary.join("  "));
    for (status, tasks) in &query::board_columns(ws, scope.as_deref()) {
        println!("{} ({})", format_status(*status), tasks.len());
        for t in tasks {
            println!("  {}  {}", short_id(&t.id), t.title);
        }
    }
}

/// Show the calendar buckets.
pub fn cmd_calendar(ws: &Workspace, project: Option<String>, all: bool) {
    let scope = scope_project(ws, project, all);
    let buckets = query::calendar_buckets(ws, scope.as_deref());
    if buckets.is_empty() {
        println!("No dated tasks.");
        return;
    }
    for (date, tasks) in &buckets {
        println!("{date}");
        for t in tasks {
            println!("  {}  {} [{}]", short_id(&t.id), t.title, format_status(t.status));
        }
    }
}

/// Show the gantt rows.
pub fn cmd_gantt(ws: &Workspace, project: Option<String>, all: bool) {
    let scope = scope_project(ws, project, all);
    let rows = query::gantt_rows(ws, scope.as_deref());
    if rows.is_empty() {
        println!("No tasks with a start/due span.");
        return;
    }
    println!("{:<9} {:<11} {:<11} {:<5} {}", "ID", "Start", "Due", "Prog", "Title");
    for t in rows {
        // gantt_rows guarantees both dates are present.
        let start = t.start_date.map(|d| d.date_naive().to_string()).unwrap_or_default();
        let due = t.due_date.map(|d| d.date_naive().to_string()).unwrap_or_default();
        println!(
            "{:<9} {:<11} {:<11} {:<5} {}",
            short_id(&t.id),
            start,
            due,
            format!("{:.0}%", t.progress * 100.0),
            t.title
        );
    }
}

/// Show or set the view mode.
pub fn cmd_view_mode(ws: &mut Workspace, mode: Option<ViewMode>) {
    match mode {
        Some(m) => {
            unwrap_or_exit(ws.set_view_mode(m));
            println!("View mode set to {}", format_view_mode(m));
        }
        None => println!("{}", format_view_mode(ws.view_mode())),
    }
}

/// Mock login.
pub fn cmd_login(session: &mut Session, email: String, password: String) {
    match session.login(&email, &password) {
        Ok(user) => println!("Logged in as {} <{}>", user.name, user.email),
        Err(_) => {
            eprintln!("Error: {}", session.error().unwrap_or("login failed"));
            std::process::exit(1);
        }
    }
}

/// Mock signup.
pub fn cmd_signup(session: &mut Session, name: String, email: String, password: String) {
    match session.signup(&name, &email, &password) {
        Ok(user) => println!("Account created for {} <{}>", user.name, user.email),
        Err(_) => {
            eprintln!("Error: {}", session.error().unwrap_or("signup failed"));
            std::process::exit(1);
        }
    }
}

pub fn cmd_logout(session: &mut Session) {
    session.logout();
    println!("Logged out");
}

pub fn cmd_whoami(session: &Session) {
    match session.user() {
        Some(user) => println!("{} <{}>", user.name, user.email),
        None => println!("Not logged in"),
    }
}

/// Generate shell completion scripts on stdout.
pub fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn parse_date_input_handles_known_forms() {
        let today = Local::now().date_naive();
        assert_eq!(parse_date_input("today").unwrap().date_naive(), today);
        assert_eq!(
            parse_date_input("tomorrow").unwrap().date_naive(),
            today + Duration::days(1)
        );
        assert_eq!(
            parse_date_input("in 3d").unwrap().date_naive(),
            today + Duration::days(3)
        );
        assert_eq!(
            parse_date_input("in 2w").unwrap().date_naive(),
            today + Duration::weeks(2)
        );
        let iso = parse_date_input("2026-09-15").unwrap();
        assert_eq!((iso.year(), iso.month(), iso.day()), (2026, 9, 15));
        assert!(parse_date_input("whenever").is_none());
    }

    #[test]
    fn format_due_relative_buckets() {
        let today = Local::now().date_naive();
        let at = |days: i64| {
            (today + Duration::days(days))
                .and_hms_opt(0, 0, 0)
                .unwrap()
                .and_utc()
        };
        assert_eq!(format_due_relative(None, today), "-");
        assert_eq!(format_due_relative(Some(at(0)), today), "today");
        assert_eq!(format_due_relative(Some(at(1)), today), "tomorrow");
        assert_eq!(format_due_relative(Some(at(4)), today), "in 4d");
        assert_eq!(format_due_relative(Some(at(-2)), today), "2d late");
    }

    #[test]
    fn truncate_respects_width() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a rather long title", 8), "a rathe…");
    }
}
