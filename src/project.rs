//! Project data structures.
//!
//! A project is a named grouping of tasks. Membership is not stored here:
//! the task's `project_id` is authoritative and the per-project index is
//! computed on read (see `query::project_task_ids`), so there is no
//! denormalized list to keep in sync.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::ProjectId;

/// A named grouping of tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    /// Display colour, e.g. "#3b82f6".
    pub color: String,
    /// Member identifiers; carried for the UI, unused by any invariant.
    pub members: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller input for creating a project; the store supplies id and timestamps.
#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub color: Option<String>,
    pub members: Vec<String>,
}

/// Partial field set merged into an existing project by `update_project`.
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub members: Option<Vec<String>>,
}
