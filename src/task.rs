//! Task data structures.
//!
//! This module defines the `Task` struct, its exclusively-owned `Subtask`
//! checklist items, and the caller-facing input shapes (`NewTask`,
//! `TaskPatch`) used by the workspace store's add/update operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fields::{Priority, Status};

pub type TaskId = String;
pub type ProjectId = String;

/// A unit of trackable work belonging to exactly one project.
///
/// `id`, `created_at` and `updated_at` are set by the store and never by
/// callers; `project_id` is the authoritative back-reference from which the
/// per-project membership index is derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub start_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub assignee: Option<String>,
    pub tags: Vec<String>,
    pub subtasks: Vec<Subtask>,
    pub dependencies: Vec<TaskId>,
    /// Completion fraction in [0, 1], caller-supplied (not derived from
    /// subtasks).
    pub progress: f64,
    pub project_id: ProjectId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A checklist item owned by a single task. No independent lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Caller input for creating a task; the store supplies id and timestamps.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub start_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub assignee: Option<String>,
    pub tags: Vec<String>,
    pub subtasks: Vec<Subtask>,
    pub dependencies: Vec<TaskId>,
    pub progress: f64,
    pub project_id: ProjectId,
}

/// Partial field set merged into an existing task by `update_task`.
///
/// `None` leaves a field untouched; the `clear_*` flags reset the optional
/// fields, mirroring how the CLI exposes them.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub start_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub assignee: Option<String>,
    pub tags: Option<Vec<String>>,
    pub subtasks: Option<Vec<Subtask>>,
    pub dependencies: Option<Vec<TaskId>>,
    pub progress: Option<f64>,
    pub project_id: Option<ProjectId>,
    pub clear_start: bool,
    pub clear_due: bool,
    pub clear_assignee: bool,
}

impl TaskPatch {
    /// True when the patch carries no field changes at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.start_date.is_none()
            && self.due_date.is_none()
            && self.assignee.is_none()
            && self.tags.is_none()
            && self.subtasks.is_none()
            && self.dependencies.is_none()
            && self.progress.is_none()
            && self.project_id.is_none()
            && !self.clear_start
            && !self.clear_due
            && !self.clear_assignee
    }
}
