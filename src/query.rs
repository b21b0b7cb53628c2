//! Read-only projections over the workspace.
//!
//! Everything here derives a view from the store without mutating it: the
//! filtered task lists the list view reads, per-status grouping for the
//! kanban board, date buckets for the calendar, span rows for the gantt
//! chart, and the per-project membership index.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::fields::{Priority, Status};
use crate::store::Workspace;
use crate::task::{Task, TaskId};

/// Filter criteria for task listings. `None` fields match everything.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub project: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(ref p) = self.project {
            if task.project_id != *p {
                return false;
            }
        }
        if let Some(s) = self.status {
            if task.status != s {
                return false;
            }
        }
        if let Some(p) = self.priority {
            if task.priority != p {
                return false;
            }
        }
        true
    }
}

/// Tasks matching `filter`, in insertion order.
pub fn filter_tasks<'a>(ws: &'a Workspace, filter: &TaskFilter) -> Vec<&'a Task> {
    ws.tasks().iter().filter(|t| filter.matches(t)).collect()
}

/// The ids of tasks belonging to `project_id`, in insertion order.
///
/// This is the per-project membership index: derived from the authoritative
/// `Task.project_id` on every read, never stored.
pub fn project_task_ids(ws: &Workspace, project_id: &str) -> Vec<TaskId> {
    ws.tasks()
        .iter()
        .filter(|t| t.project_id == project_id)
        .map(|t| t.id.clone())
        .collect()
}

/// Kanban columns: every status mapped to its tasks, in board-column order.
/// Statuses with no tasks still appear with an empty column.
pub fn board_columns<'a>(
    ws: &'a Workspace,
    project: Option<&str>,
) -> BTreeMap<Status, Vec<&'a Task>> {
    let mut columns: BTreeMap<Status, Vec<&Task>> = BTreeMap::new();
    for status in Status::ALL {
        columns.insert(status, Vec::new());
    }
    for task in ws.tasks() {
        if let Some(p) = project {
            if task.project_id != p {
                continue;
            }
        }
        columns.entry(task.status).or_default().push(task);
    }
    columns
}

/// Task counts per status for the kanban header row.
pub fn board_counts(ws: &Workspace, project: Option<&str>) -> BTreeMap<Status, usize> {
    board_columns(ws, project)
        .into_iter()
        .map(|(status, tasks)| (status, tasks.len()))
        .collect()
}

/// Calendar view: tasks bucketed by due date. Undated tasks are omitted.
pub fn calendar_buckets<'a>(
    ws: &'a Workspace,
    project: Option<&str>,
) -> BTreeMap<NaiveDate, Vec<&'a Task>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<&Task>> = BTreeMap::new();
    for task in ws.tasks() {
        if let Some(p) = project {
            if task.project_id != p {
                continue;
            }
        }
        if let Some(due) = task.due_date {
            buckets.entry(due.date_naive()).or_default().push(task);
        }
    }
    buckets
}

/// Gantt view: tasks carrying both a start and a due date, ordered by start
/// date then id for a stable chart.
pub fn gantt_rows<'a>(ws: &'a Workspace, project: Option<&str>) -> Vec<&'a Task> {
    let mut rows: Vec<&Task> = ws
        .tasks()
        .iter()
        .filter(|t| {
            if let Some(p) = project {
                if t.project_id != p {
                    return false;
                }
            }
            t.start_date.is_some() && t.due_date.is_some()
        })
        .collect();
    rows.sort_by(|a, b| {
        a.start_date
            .cmp(&b.start_date)
            .then_with(|| a.id.cmp(&b.id))
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::NewProject;
    use crate::task::NewTask;
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    fn ws_with_two_projects() -> (TempDir, Workspace, String) {
        let dir = TempDir::new().unwrap();
        let mut ws = Workspace::open(dir.path()).unwrap();
        let ids: Vec<String> = ws.tasks().iter().map(|t| t.id.clone()).collect();
        for id in ids {
            ws.delete_task(&id).unwrap();
        }
        let other = ws
            .add_project(NewProject { title: "Side".into(), ..NewProject::default() })
            .unwrap();
        (dir, ws, other.id)
    }

    fn task_in(project: &str, title: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            project_id: project.to_string(),
            ..NewTask::default()
        }
    }

    #[test]
    fn filter_by_project_status_priority() {
        let (_dir, mut ws, other) = ws_with_two_projects();
        ws.add_task(NewTask {
            status: Some(Status::Done),
            priority: Some(Priority::High),
            ..task_in("default", "a")
        })
        .unwrap();
        ws.add_task(task_in("default", "b")).unwrap();
        ws.add_task(task_in(&other, "c")).unwrap();

        let by_project = filter_tasks(
            &ws,
            &TaskFilter { project: Some("default".into()), ..TaskFilter::default() },
        );
        assert_eq!(by_project.len(), 2);

        let by_status = filter_tasks(
            &ws,
            &TaskFilter { status: Some(Status::Done), ..TaskFilter::default() },
        );
        assert_eq!(by_status.len(), 1);
        assert_eq!(by_status[0].title, "a");

        let combined = filter_tasks(
            &ws,
            &TaskFilter {
                project: Some("default".into()),
                priority: Some(Priority::High),
                status: None,
            },
        );
        assert_eq!(combined.len(), 1);
    }

    #[test]
    fn board_counts_cover_every_status() {
        let (_dir, mut ws, _other) = ws_with_two_projects();
        ws.add_task(NewTask { status: Some(Status::Blocked), ..task_in("default", "a") })
            .unwrap();
        ws.add_task(task_in("default", "b")).unwrap();
        let counts = board_counts(&ws, Some("default"));
        assert_eq!(counts.len(), Status::ALL.len());
        assert_eq!(counts[&Status::Blocked], 1);
        assert_eq!(counts[&Status::Todo], 1);
        assert_eq!(counts[&Status::Review], 0);
    }

    #[test]
    fn calendar_buckets_group_by_due_day_and_skip_undated() {
        let (_dir, mut ws, _other) = ws_with_two_projects();
        let due = Utc::now() + Duration::days(2);
        ws.add_task(NewTask { due_date: Some(due), ..task_in("default", "a") })
            .unwrap();
        ws.add_task(NewTask { due_date: Some(due), ..task_in("default", "b") })
            .unwrap();
        ws.add_task(task_in("default", "undated")).unwrap();
        let buckets = calendar_buckets(&ws, None);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[&due.date_naive()].len(), 2);
    }

    #[test]
    fn gantt_rows_require_span_and_sort_by_start() {
        let (_dir, mut ws, _other) = ws_with_two_projects();
        let now = Utc::now();
        ws.add_task(NewTask {
            start_date: Some(now + Duration::days(5)),
            due_date: Some(now + Duration::days(9)),
            ..task_in("default", "later")
        })
        .unwrap();
        ws.add_task(NewTask {
            start_date: Some(now),
            due_date: Some(now + Duration::days(3)),
            ..task_in("default", "sooner")
        })
        .unwrap();
        ws.add_task(NewTask { start_date: Some(now), ..task_in("default", "no-due") })
            .unwrap();
        let rows = gantt_rows(&ws, None);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title, "sooner");
        assert_eq!(rows[1].title, "later");
    }

    #[test]
    fn projections_do_not_mutate_state() {
        let (_dir, mut ws, _other) = ws_with_two_projects();
        ws.add_task(task_in("default", "a")).unwrap();
        let before = ws.state().clone();
        let _ = filter_tasks(&ws, &TaskFilter::default());
        let _ = board_columns(&ws, None);
        let _ = calendar_buckets(&ws, None);
        let _ = gantt_rows(&ws, None);
        let _ = project_task_ids(&ws, "default");
        assert_eq!(ws.state(), &before);
    }
}
