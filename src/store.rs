//! The workspace store: all task/project state and its persistence.
//!
//! The store owns the task and project collections, the current-project
//! selection and the active view mode. Every mutation validates its inputs,
//! repairs dependent relationships (cascade on project delete, selection
//! clearing) and synchronously persists the whole document before returning.
//! Callers never construct tasks or projects with pre-existing ids; creation
//! goes through `add_task`/`add_project`, which stamp ids and timestamps.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;
use crate::fields::{Priority, Status, ViewMode};
use crate::project::{NewProject, Project, ProjectPatch};
use crate::task::{NewTask, ProjectId, Subtask, Task, TaskPatch};

/// Logical key of the workspace document; also its file name stem.
pub const STORAGE_KEY: &str = "task-storage";

/// Version of the persisted document layout. Documents written by a newer
/// schema are rejected on load instead of being misread.
pub const SCHEMA_VERSION: u32 = 1;

const DEFAULT_PROJECT_ID: &str = "default";
const DEFAULT_PROJECT_COLOR: &str = "#3b82f6";

/// The serialized shape of the workspace. Field order and array order are
/// preserved verbatim across save/load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceState {
    #[serde(default)]
    pub schema: u32,
    pub tasks: Vec<Task>,
    pub projects: Vec<Project>,
    pub current_project: Option<ProjectId>,
    #[serde(default)]
    pub view_mode: ViewMode,
}

/// The workspace store. Owns all entity state and the path it persists to.
///
/// Single-writer by construction: callers hold `&mut Workspace` for every
/// mutation, so no operation can observe intermediate state.
#[derive(Debug)]
pub struct Workspace {
    state: WorkspaceState,
    path: PathBuf,
}

impl Workspace {
    /// Open the workspace persisted under `dir`, seeding the default
    /// project and sample tasks when no document exists yet.
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        let path = dir.join(format!("{STORAGE_KEY}.json"));
        let state = if path.exists() {
            Self::read_document(&path)?
        } else {
            info!("no workspace document at {}, seeding defaults", path.display());
            seeded_state()
        };
        Ok(Workspace { state, path })
    }

    fn read_document(path: &Path) -> Result<WorkspaceState, StoreError> {
        let mut buf = String::new();
        File::open(path)
            .and_then(|mut f| f.read_to_string(&mut buf))
            .map_err(|e| {
                StoreError::Persistence(format!("reading {}: {e}", path.display()))
            })?;
        let state: WorkspaceState = serde_json::from_str(&buf).map_err(|e| {
            StoreError::Persistence(format!("parsing {}: {e}", path.display()))
        })?;
        if state.schema > SCHEMA_VERSION {
            return Err(StoreError::Persistence(format!(
                "document schema {} is newer than supported schema {}",
                state.schema, SCHEMA_VERSION
            )));
        }
        Ok(state)
    }

    /// Persist the whole document atomically (temp file + rename).
    pub fn save(&self) -> Result<(), StoreError> {
        let tmp = self.path.with_extension("json.tmp");
        let data = serde_json::to_string_pretty(&self.state)?;
        let mut f = File::create(&tmp)?;
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    // ---- read access ----

    pub fn state(&self) -> &WorkspaceState {
        &self.state
    }

    pub fn tasks(&self) -> &[Task] {
        &self.state.tasks
    }

    pub fn projects(&self) -> &[Project] {
        &self.state.projects
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.state.tasks.iter().find(|t| t.id == id)
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.state.projects.iter().find(|p| p.id == id)
    }

    pub fn current_project(&self) -> Option<&ProjectId> {
        self.state.current_project.as_ref()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.state.view_mode
    }

    // ---- task mutations ----

    /// Create a task from caller input. Fails with `InvalidReference` when
    /// `project_id` names no existing project, and with `Validation` when
    /// `progress` falls outside [0, 1].
    pub fn add_task(&mut self, data: NewTask) -> Result<Task, StoreError> {
        if self.project(&data.project_id).is_none() {
            return Err(StoreError::InvalidReference(data.project_id));
        }
        validate_progress(data.progress)?;

        let now = Utc::now();
        let task = Task {
            id: fresh_id(),
            title: data.title,
            description: data.description,
            status: data.status.unwrap_or(Status::Todo),
            priority: data.priority.unwrap_or(Priority::Medium),
            start_date: data.start_date,
            due_date: data.due_date,
            assignee: data.assignee,
            tags: data.tags,
            subtasks: data.subtasks,
            dependencies: data.dependencies,
            progress: data.progress,
            project_id: data.project_id,
            created_at: now,
            updated_at: now,
        };
        debug!("add_task id={} project={}", task.id, task.project_id);
        self.state.tasks.push(task.clone());
        self.save()?;
        Ok(task)
    }

    /// Merge `patch` into the task named by `id` and refresh `updated_at`.
    /// Moving a task to another project requires that project to exist.
    pub fn update_task(&mut self, id: &str, patch: TaskPatch) -> Result<Task, StoreError> {
        if let Some(p) = patch.progress {
            validate_progress(p)?;
        }
        if let Some(ref pid) = patch.project_id {
            if self.project(pid).is_none() {
                return Err(StoreError::InvalidReference(pid.clone()));
            }
        }
        let task = self
            .state
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::task_not_found(id))?;

        if let Some(v) = patch.title {
            task.title = v;
        }
        if let Some(v) = patch.description {
            task.description = v;
        }
        if let Some(v) = patch.status {
            task.status = v;
        }
        if let Some(v) = patch.priority {
            task.priority = v;
        }
        if let Some(v) = patch.start_date {
            task.start_date = Some(v);
        }
        if let Some(v) = patch.due_date {
            task.due_date = Some(v);
        }
        if let Some(v) = patch.assignee {
            task.assignee = Some(v);
        }
        if let Some(v) = patch.tags {
            task.tags = v;
        }
        if let Some(v) = patch.subtasks {
            task.subtasks = v;
        }
        if let Some(v) = patch.dependencies {
            task.dependencies = v;
        }
        if let Some(v) = patch.progress {
            task.progress = v;
        }
        if let Some(v) = patch.project_id {
            task.project_id = v;
        }
        if patch.clear_start {
            task.start_date = None;
        }
        if patch.clear_due {
            task.due_date = None;
        }
        if patch.clear_assignee {
            task.assignee = None;
        }
        task.updated_at = next_stamp(task.updated_at);
        let updated = task.clone();
        debug!("update_task id={id}");
        self.save()?;
        Ok(updated)
    }

    /// Remove the task named by `id`. Deleting an absent id is a harmless
    /// no-op; returns whether anything was removed.
    pub fn delete_task(&mut self, id: &str) -> Result<bool, StoreError> {
        let before = self.state.tasks.len();
        self.state.tasks.retain(|t| t.id != id);
        if self.state.tasks.len() == before {
            return Ok(false);
        }
        debug!("delete_task id={id}");
        self.save()?;
        Ok(true)
    }

    /// Append a fresh subtask to the task named by `task_id`.
    pub fn add_subtask(&mut self, task_id: &str, title: String) -> Result<Subtask, StoreError> {
        let task = self
            .state
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| StoreError::task_not_found(task_id))?;
        let subtask = Subtask {
            id: fresh_id(),
            title,
            completed: false,
            created_at: Utc::now(),
        };
        task.subtasks.push(subtask.clone());
        task.updated_at = next_stamp(task.updated_at);
        self.save()?;
        Ok(subtask)
    }

    /// Mark a subtask complete or incomplete.
    pub fn set_subtask_completed(
        &mut self,
        task_id: &str,
        subtask_id: &str,
        completed: bool,
    ) -> Result<(), StoreError> {
        let task = self
            .state
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| StoreError::task_not_found(task_id))?;
        let subtask = task
            .subtasks
            .iter_mut()
            .find(|s| s.id == subtask_id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "subtask",
                id: subtask_id.to_string(),
            })?;
        subtask.completed = completed;
        task.updated_at = next_stamp(task.updated_at);
        self.save()?;
        Ok(())
    }

    // ---- project mutations ----

    /// Create a project from caller input.
    pub fn add_project(&mut self, data: NewProject) -> Result<Project, StoreError> {
        if data.title.trim().is_empty() {
            return Err(StoreError::Validation {
                field: "title",
                reason: "project title cannot be empty".to_string(),
            });
        }
        let now = Utc::now();
        let project = Project {
            id: fresh_id(),
            title: data.title,
            description: data.description,
            color: data.color.unwrap_or_else(|| DEFAULT_PROJECT_COLOR.to_string()),
            members: data.members,
            created_at: now,
            updated_at: now,
        };
        debug!("add_project id={}", project.id);
        self.state.projects.push(project.clone());
        self.save()?;
        Ok(project)
    }

    /// Merge `patch` into the project named by `id` and refresh `updated_at`.
    pub fn update_project(&mut self, id: &str, patch: ProjectPatch) -> Result<Project, StoreError> {
        let project = self
            .state
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::project_not_found(id))?;
        if let Some(v) = patch.title {
            project.title = v;
        }
        if let Some(v) = patch.description {
            project.description = v;
        }
        if let Some(v) = patch.color {
            project.color = v;
        }
        if let Some(v) = patch.members {
            project.members = v;
        }
        project.updated_at = next_stamp(project.updated_at);
        let updated = project.clone();
        debug!("update_project id={id}");
        self.save()?;
        Ok(updated)
    }

    /// Remove the project named by `id`, cascade-deleting every task that
    /// belongs to it and clearing the current selection if it pointed here.
    /// Deleting an absent id is a harmless no-op.
    pub fn delete_project(&mut self, id: &str) -> Result<bool, StoreError> {
        let before = self.state.projects.len();
        self.state.projects.retain(|p| p.id != id);
        if self.state.projects.len() == before {
            return Ok(false);
        }
        let task_count = self.state.tasks.len();
        self.state.tasks.retain(|t| t.project_id != id);
        let cascaded = task_count - self.state.tasks.len();
        if cascaded > 0 {
            warn!("delete_project id={id} cascaded {cascaded} task(s)");
        }
        if self.state.current_project.as_deref() == Some(id) {
            self.state.current_project = None;
        }
        self.save()?;
        Ok(true)
    }

    // ---- selection and view ----

    /// Select a project, or clear the selection with `None`. Selecting an
    /// id that names no project is rejected rather than left dangling.
    pub fn set_current_project(&mut self, id: Option<ProjectId>) -> Result<(), StoreError> {
        if let Some(ref pid) = id {
            if self.project(pid).is_none() {
                return Err(StoreError::InvalidReference(pid.clone()));
            }
        }
        self.state.current_project = id;
        self.save()
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) -> Result<(), StoreError> {
        self.state.view_mode = mode;
        self.save()
    }
}

/// Fresh, never-reused entity id.
fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

/// A stamp strictly after `prev`. The clock may not tick between two
/// mutations of the same entity, so fall forward by a nanosecond if needed.
fn next_stamp(prev: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > prev {
        now
    } else {
        prev + Duration::nanoseconds(1)
    }
}

fn validate_progress(progress: f64) -> Result<(), StoreError> {
    if !(0.0..=1.0).contains(&progress) || progress.is_nan() {
        return Err(StoreError::Validation {
            field: "progress",
            reason: format!("{progress} is outside [0, 1]"),
        });
    }
    Ok(())
}

/// Default project plus sample tasks, used on first run only.
fn seeded_state() -> WorkspaceState {
    let now = Utc::now();
    let default_project = Project {
        id: DEFAULT_PROJECT_ID.to_string(),
        title: "Personal Tasks".to_string(),
        description: "Your personal task workspace".to_string(),
        color: DEFAULT_PROJECT_COLOR.to_string(),
        members: Vec::new(),
        created_at: now,
        updated_at: now,
    };
    let subtask = |id: &str, title: &str, completed: bool| Subtask {
        id: id.to_string(),
        title: title.to_string(),
        completed,
        created_at: now,
    };
    let tasks = vec![
        Task {
            id: "1".to_string(),
            title: "Design landing page mockups".to_string(),
            description: "Create high-fidelity mockups for the new landing page with focus on conversion optimization.".to_string(),
            status: Status::InProgress,
            priority: Priority::High,
            start_date: Some(now),
            due_date: Some(now + Duration::days(7)),
            assignee: Some("current-user".to_string()),
            tags: vec!["design".into(), "ui/ux".into(), "landing".into()],
            subtasks: vec![
                subtask("sub-1", "Research competitor landing pages", true),
                subtask("sub-2", "Create wireframes", true),
                subtask("sub-3", "Design hero section", false),
            ],
            dependencies: Vec::new(),
            progress: 0.6,
            project_id: DEFAULT_PROJECT_ID.to_string(),
            created_at: now,
            updated_at: now,
        },
        Task {
            id: "2".to_string(),
            title: "Implement authentication system".to_string(),
            description: "Set up secure user authentication with email/password and social login options.".to_string(),
            status: Status::Todo,
            priority: Priority::Critical,
            start_date: Some(now + Duration::days(1)),
            due_date: Some(now + Duration::days(10)),
            assignee: Some("current-user".to_string()),
            tags: vec!["backend".into(), "security".into(), "auth".into()],
            subtasks: Vec::new(),
            dependencies: Vec::new(),
            progress: 0.0,
            project_id: DEFAULT_PROJECT_ID.to_string(),
            created_at: now,
            updated_at: now,
        },
        Task {
            id: "3".to_string(),
            title: "Write API documentation".to_string(),
            description: "Document all API endpoints with examples and response schemas.".to_string(),
            status: Status::Review,
            priority: Priority::Medium,
            start_date: Some(now - Duration::days(3)),
            due_date: Some(now + Duration::days(2)),
            assignee: Some("current-user".to_string()),
            tags: vec!["documentation".into(), "api".into()],
            subtasks: vec![
                subtask("sub-4", "Document authentication endpoints", true),
                subtask("sub-5", "Document task management endpoints", true),
                subtask("sub-6", "Add code examples", false),
            ],
            dependencies: vec!["2".to_string()],
            progress: 0.8,
            project_id: DEFAULT_PROJECT_ID.to_string(),
            created_at: now,
            updated_at: now,
        },
    ];
    WorkspaceState {
        schema: SCHEMA_VERSION,
        tasks,
        projects: vec![default_project],
        current_project: Some(DEFAULT_PROJECT_ID.to_string()),
        view_mode: ViewMode::List,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query;
    use tempfile::TempDir;

    fn bare_workspace() -> (TempDir, Workspace) {
        let dir = TempDir::new().unwrap();
        let mut ws = Workspace::open(dir.path()).unwrap();
        // Drop the sample tasks so tests start from a single empty project.
        let ids: Vec<String> = ws.tasks().iter().map(|t| t.id.clone()).collect();
        for id in ids {
            ws.delete_task(&id).unwrap();
        }
        (dir, ws)
    }

    fn new_task(project_id: &str, title: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            project_id: project_id.to_string(),
            ..NewTask::default()
        }
    }

    #[test]
    fn open_seeds_default_project_and_samples() {
        let dir = TempDir::new().unwrap();
        let ws = Workspace::open(dir.path()).unwrap();
        assert_eq!(ws.projects().len(), 1);
        assert_eq!(ws.projects()[0].id, "default");
        assert_eq!(ws.projects()[0].title, "Personal Tasks");
        assert_eq!(ws.tasks().len(), 3);
        assert!(ws.tasks().iter().all(|t| t.project_id == "default"));
        assert_eq!(ws.current_project().map(String::as_str), Some("default"));
    }

    #[test]
    fn add_task_into_seeded_default_project() {
        let (_dir, mut ws) = bare_workspace();
        let task = ws.add_task(new_task("default", "A")).unwrap();
        assert_eq!(ws.tasks().len(), 1);
        assert_eq!(task.project_id, "default");
        assert_eq!(task.status, Status::Todo);
        assert_eq!(query::project_task_ids(&ws, "default"), vec![task.id.clone()]);
    }

    #[test]
    fn add_task_rejects_unknown_project() {
        let (_dir, mut ws) = bare_workspace();
        let err = ws.add_task(new_task("nope", "A")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidReference(p) if p == "nope"));
        assert!(ws.tasks().is_empty());
    }

    #[test]
    fn add_task_rejects_out_of_range_progress() {
        let (_dir, mut ws) = bare_workspace();
        let mut data = new_task("default", "A");
        data.progress = 1.5;
        assert!(matches!(
            ws.add_task(data).unwrap_err(),
            StoreError::Validation { field: "progress", .. }
        ));
    }

    #[test]
    fn empty_update_restamps_updated_at_only() {
        let (_dir, mut ws) = bare_workspace();
        let task = ws.add_task(new_task("default", "A")).unwrap();
        let updated = ws.update_task(&task.id, TaskPatch::default()).unwrap();
        assert!(updated.updated_at > task.updated_at);
        assert_eq!(updated.created_at, task.created_at);
        assert_eq!(updated.title, task.title);
        assert_eq!(updated.status, task.status);
        assert_eq!(updated.progress, task.progress);
        assert_eq!(updated.project_id, task.project_id);
    }

    #[test]
    fn update_merges_partial_fields() {
        let (_dir, mut ws) = bare_workspace();
        let task = ws.add_task(new_task("default", "A")).unwrap();
        let patch = TaskPatch {
            status: Some(Status::Done),
            progress: Some(1.0),
            ..TaskPatch::default()
        };
        let updated = ws.update_task(&task.id, patch).unwrap();
        assert_eq!(updated.status, Status::Done);
        assert_eq!(updated.progress, 1.0);
        assert!(updated.updated_at > task.updated_at);
        assert_eq!(updated.title, "A");
        assert_eq!(updated.created_at, task.created_at);
    }

    #[test]
    fn update_absent_task_is_not_found() {
        let (_dir, mut ws) = bare_workspace();
        let err = ws.update_task("ghost", TaskPatch::default()).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: "task", .. }));
    }

    #[test]
    fn update_rejects_move_to_unknown_project() {
        let (_dir, mut ws) = bare_workspace();
        let task = ws.add_task(new_task("default", "A")).unwrap();
        let patch = TaskPatch {
            project_id: Some("nowhere".to_string()),
            ..TaskPatch::default()
        };
        assert!(matches!(
            ws.update_task(&task.id, patch).unwrap_err(),
            StoreError::InvalidReference(_)
        ));
        assert_eq!(ws.task(&task.id).unwrap().project_id, "default");
    }

    #[test]
    fn moving_a_task_updates_both_project_indexes() {
        let (_dir, mut ws) = bare_workspace();
        let other = ws
            .add_project(NewProject { title: "Other".into(), ..NewProject::default() })
            .unwrap();
        let task = ws.add_task(new_task("default", "A")).unwrap();
        let patch = TaskPatch {
            project_id: Some(other.id.clone()),
            ..TaskPatch::default()
        };
        ws.update_task(&task.id, patch).unwrap();
        assert!(query::project_task_ids(&ws, "default").is_empty());
        assert_eq!(query::project_task_ids(&ws, &other.id), vec![task.id]);
    }

    #[test]
    fn delete_task_is_idempotent() {
        let (_dir, mut ws) = bare_workspace();
        let task = ws.add_task(new_task("default", "A")).unwrap();
        assert!(ws.delete_task(&task.id).unwrap());
        let after_first = ws.state().clone();
        assert!(!ws.delete_task(&task.id).unwrap());
        assert_eq!(ws.state(), &after_first);
        assert!(query::project_task_ids(&ws, "default").is_empty());
    }

    #[test]
    fn delete_project_cascades_and_clears_selection() {
        let (_dir, mut ws) = bare_workspace();
        ws.add_task(new_task("default", "A")).unwrap();
        ws.add_task(new_task("default", "B")).unwrap();
        ws.set_current_project(Some("default".to_string())).unwrap();
        assert!(ws.delete_project("default").unwrap());
        assert!(ws.projects().is_empty());
        assert!(ws.tasks().is_empty());
        assert!(ws.current_project().is_none());
    }

    #[test]
    fn delete_project_leaves_other_projects_tasks() {
        let (_dir, mut ws) = bare_workspace();
        let other = ws
            .add_project(NewProject { title: "Other".into(), ..NewProject::default() })
            .unwrap();
        ws.add_task(new_task("default", "A")).unwrap();
        let kept = ws.add_task(new_task(&other.id, "B")).unwrap();
        ws.delete_project("default").unwrap();
        assert_eq!(ws.tasks().len(), 1);
        assert_eq!(ws.tasks()[0].id, kept.id);
    }

    #[test]
    fn delete_absent_project_is_noop() {
        let (_dir, mut ws) = bare_workspace();
        assert!(!ws.delete_project("ghost").unwrap());
        assert_eq!(ws.projects().len(), 1);
    }

    #[test]
    fn referential_closure_under_mixed_mutations() {
        let (_dir, mut ws) = bare_workspace();
        let p1 = ws
            .add_project(NewProject { title: "One".into(), ..NewProject::default() })
            .unwrap();
        let p2 = ws
            .add_project(NewProject { title: "Two".into(), ..NewProject::default() })
            .unwrap();
        let a = ws.add_task(new_task(&p1.id, "a")).unwrap();
        ws.add_task(new_task(&p1.id, "b")).unwrap();
        ws.add_task(new_task(&p2.id, "c")).unwrap();
        ws.delete_task(&a.id).unwrap();
        ws.delete_project(&p1.id).unwrap();
        ws.add_task(new_task(&p2.id, "d")).unwrap();

        for task in ws.tasks() {
            assert!(ws.project(&task.project_id).is_some());
        }
        for project in ws.projects() {
            let index = query::project_task_ids(&ws, &project.id);
            let expected: Vec<String> = ws
                .tasks()
                .iter()
                .filter(|t| t.project_id == project.id)
                .map(|t| t.id.clone())
                .collect();
            assert_eq!(index, expected);
        }
    }

    #[test]
    fn set_current_project_validates_reference() {
        let (_dir, mut ws) = bare_workspace();
        assert!(matches!(
            ws.set_current_project(Some("ghost".to_string())).unwrap_err(),
            StoreError::InvalidReference(_)
        ));
        ws.set_current_project(Some("default".to_string())).unwrap();
        assert_eq!(ws.current_project().map(String::as_str), Some("default"));
        ws.set_current_project(None).unwrap();
        assert!(ws.current_project().is_none());
    }

    #[test]
    fn subtasks_are_owned_and_stamped() {
        let (_dir, mut ws) = bare_workspace();
        let task = ws.add_task(new_task("default", "A")).unwrap();
        let sub = ws.add_subtask(&task.id, "step one".to_string()).unwrap();
        assert!(!sub.completed);
        ws.set_subtask_completed(&task.id, &sub.id, true).unwrap();
        let task = ws.task(&task.id).unwrap();
        assert_eq!(task.subtasks.len(), 1);
        assert!(task.subtasks[0].completed);
        assert!(matches!(
            ws.set_subtask_completed("ghost", &sub.id, true).unwrap_err(),
            StoreError::NotFound { kind: "task", .. }
        ));
    }

    #[test]
    fn save_load_round_trip_preserves_everything() {
        let dir = TempDir::new().unwrap();
        let mut ws = Workspace::open(dir.path()).unwrap();
        let p = ws
            .add_project(NewProject { title: "Side".into(), ..NewProject::default() })
            .unwrap();
        ws.add_task(new_task(&p.id, "extra")).unwrap();
        ws.set_current_project(Some(p.id.clone())).unwrap();
        ws.set_view_mode(ViewMode::Kanban).unwrap();
        let saved = ws.state().clone();

        let reloaded = Workspace::open(dir.path()).unwrap();
        assert_eq!(reloaded.state(), &saved);
    }

    #[test]
    fn load_rejects_newer_schema() {
        let dir = TempDir::new().unwrap();
        let ws = Workspace::open(dir.path()).unwrap();
        ws.save().unwrap();
        let path = dir.path().join(format!("{STORAGE_KEY}.json"));
        let mut doc: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        doc["schema"] = serde_json::json!(SCHEMA_VERSION + 1);
        std::fs::write(&path, serde_json::to_string(&doc).unwrap()).unwrap();
        assert!(matches!(
            Workspace::open(dir.path()).unwrap_err(),
            StoreError::Persistence(_)
        ));
    }

    #[test]
    fn load_rejects_corrupt_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(format!("{STORAGE_KEY}.json"));
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Workspace::open(dir.path()).unwrap_err(),
            StoreError::Persistence(_)
        ));
    }

    #[test]
    fn timestamps_are_strictly_monotonic_per_entity() {
        let (_dir, mut ws) = bare_workspace();
        let task = ws.add_task(new_task("default", "A")).unwrap();
        let mut prev = task.updated_at;
        for _ in 0..5 {
            let updated = ws.update_task(&task.id, TaskPatch::default()).unwrap();
            assert!(updated.updated_at > prev);
            prev = updated.updated_at;
        }
    }
}
