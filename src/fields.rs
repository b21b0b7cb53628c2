//! Enumerations and field types for the workspace.
//!
//! This module defines the structured values used to categorise tasks and to
//! select the active presentation: status, priority, and view mode.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Workflow state of a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Todo,
    InProgress,
    Review,
    Done,
    Blocked,
}

impl Status {
    /// All statuses in board-column order.
    pub const ALL: [Status; 5] = [
        Status::Todo,
        Status::InProgress,
        Status::Review,
        Status::Done,
        Status::Blocked,
    ];
}

/// Priority classification for task importance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

/// Active presentation of the workspace.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    #[default]
    List,
    Kanban,
    Calendar,
    Gantt,
}

/// Format a task status for display.
pub fn format_status(s: Status) -> &'static str {
    match s {
        Status::Todo => "Todo",
        Status::InProgress => "InProgress",
        Status::Review => "Review",
        Status::Done => "Done",
        Status::Blocked => "Blocked",
    }
}

/// Format a priority level for display.
pub fn format_priority(p: Priority) -> &'static str {
    match p {
        Priority::Low => "Low",
        Priority::Medium => "Medium",
        Priority::High => "High",
        Priority::Critical => "Critical",
    }
}

/// Format a view mode for display.
pub fn format_view_mode(m: ViewMode) -> &'static str {
    match m {
        ViewMode::List => "list",
        ViewMode::Kanban => "kanban",
        ViewMode::Calendar => "calendar",
        ViewMode::Gantt => "gantt",
    }
}
