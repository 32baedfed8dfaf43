//! Badge and label helpers shared by the pages.

use chrono::{DateTime, Utc};
use leptos::prelude::*;
use techflow_core::{ProjectStatus, Task, TaskPriority, TaskStatus};

pub fn priority_class(priority: TaskPriority) -> &'static str {
    match priority {
        TaskPriority::Urgent => "badge priority-urgent",
        TaskPriority::High => "badge priority-high",
        TaskPriority::Medium => "badge priority-medium",
        TaskPriority::Low => "badge priority-low",
    }
}

pub fn task_status_label(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Todo => "To do",
        TaskStatus::InProgress => "In progress",
        TaskStatus::Completed => "Completed",
    }
}

pub fn project_status_class(status: ProjectStatus) -> &'static str {
    match status {
        ProjectStatus::Active => "badge status-active",
        ProjectStatus::Completed => "badge status-completed",
        ProjectStatus::OnHold => "badge status-on-hold",
    }
}

pub fn format_date_time(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

/// "Updated ..." when an update time is known, else "Created ..."
pub fn activity_label(task: &Task) -> Option<String> {
    match (task.updated_at, task.created_at) {
        (Some(updated), _) => Some(format!("Updated {}", format_date_time(updated))),
        (None, Some(created)) => Some(format!("Created {}", format_date_time(created))),
        (None, None) => None,
    }
}

#[component]
pub fn PriorityBadge(priority: TaskPriority) -> impl IntoView {
    view! { <span class=priority_class(priority)>{priority.as_str()}</span> }
}

#[component]
pub fn TaskStatusBadge(status: TaskStatus) -> impl IntoView {
    view! { <span class="badge status">{task_status_label(status)}</span> }
}

#[component]
pub fn ProjectStatusBadge(status: ProjectStatus) -> impl IntoView {
    view! { <span class=project_status_class(status)>{status.label()}</span> }
}
