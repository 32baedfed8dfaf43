//! Aggregation Engine
//!
//! Pure functions over a fetched snapshot. `now` is always passed in.

use chrono::{DateTime, Utc};

use crate::domain::{Project, ProjectStatus, Task};

/// Default length of the activity feed
pub const RECENT_ACTIVITY_LIMIT: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskCounts {
    pub total: usize,
    pub completed: usize,
    /// Always `total - completed`
    pub pending: usize,
    pub overdue: usize,
}

pub fn task_counts(tasks: &[Task], now: DateTime<Utc>) -> TaskCounts {
    let completed = tasks.iter().filter(|t| t.is_completed()).count();
    let overdue = tasks.iter().filter(|t| t.is_overdue(now)).count();
    TaskCounts {
        total: tasks.len(),
        completed,
        pending: tasks.len() - completed,
        overdue,
    }
}

/// Most recently touched tasks first (`updated_at`, else `created_at`).
/// Tasks with neither are left out; ties keep their input order.
pub fn recent_activity(tasks: &[Task], limit: usize) -> Vec<Task> {
    let mut touched: Vec<(DateTime<Utc>, &Task)> = tasks
        .iter()
        .filter_map(|task| task.last_touched().map(|at| (at, task)))
        .collect();
    touched.sort_by(|a, b| b.0.cmp(&a.0));
    touched
        .into_iter()
        .take(limit)
        .map(|(_, task)| task.clone())
        .collect()
}

pub fn project_status_counts(projects: &[Project], status: ProjectStatus) -> usize {
    projects.iter().filter(|p| p.status == status).count()
}

/// Count per status, in `ProjectStatus::ALL` order
pub fn project_status_breakdown(projects: &[Project]) -> Vec<(ProjectStatus, usize)> {
    ProjectStatus::ALL
        .iter()
        .map(|status| (*status, project_status_counts(projects, *status)))
        .collect()
}
