//! Task Entity
//!
//! A task belongs to exactly one project (`project_id`). Referential
//! integrity is the server's job; the embedded `project` snapshot is a
//! display hint and may lag behind the live project.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::project::ProjectStatus;
use super::timestamp;

/// Task workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Completed => "COMPLETED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "TODO" => Some(TaskStatus::Todo),
            "IN_PROGRESS" => Some(TaskStatus::InProgress),
            "COMPLETED" => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

/// Task priority, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 4] = [
        TaskPriority::Low,
        TaskPriority::Medium,
        TaskPriority::High,
        TaskPriority::Urgent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "LOW",
            TaskPriority::Medium => "MEDIUM",
            TaskPriority::High => "HIGH",
            TaskPriority::Urgent => "URGENT",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "LOW" => Some(TaskPriority::Low),
            "MEDIUM" => Some(TaskPriority::Medium),
            "HIGH" => Some(TaskPriority::High),
            "URGENT" => Some(TaskPriority::Urgent),
            _ => None,
        }
    }
}

/// Denormalized project data the server embeds in task responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSnapshot {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub status: Option<ProjectStatus>,
}

/// A task as returned by `/tasks`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub project_id: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    /// Kept in the sender's offset; see [`Task::due_day`]
    #[serde(default, deserialize_with = "timestamp::lenient_local")]
    pub due_date: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "timestamp::lenient")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::lenient")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectSnapshot>,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            project_id: project_id.into(),
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            due_date: None,
            created_at: None,
            updated_at: None,
            project: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Incomplete with a due date strictly before `now`
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        match self.due_date {
            Some(due) => !self.is_completed() && due.with_timezone(&Utc) < now,
            None => false,
        }
    }

    /// Calendar date of the due date as the server wrote it
    pub fn due_day(&self) -> Option<NaiveDate> {
        self.due_date.map(|due| due.date_naive())
    }

    /// `updated_at`, falling back to `created_at`
    pub fn last_touched(&self) -> Option<DateTime<Utc>> {
        self.updated_at.or(self.created_at)
    }

    /// Name of the owning project if embedded, otherwise its id
    pub fn project_label(&self) -> &str {
        self.project
            .as_ref()
            .map(|p| p.name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(self.project_id.as_str())
    }
}

impl Entity for Task {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 20, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_deserialize_task_with_embedded_project() {
        let json = r#"{
            "id": "t1",
            "title": "Wire up API",
            "projectId": "p1",
            "status": "IN_PROGRESS",
            "priority": "URGENT",
            "dueDate": "2025-11-19",
            "updatedAt": "2025-11-18T08:00:00Z",
            "project": {"name": "Website", "status": "ACTIVE"}
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.priority, TaskPriority::Urgent);
        assert_eq!(task.project_label(), "Website");
        assert!(task.is_overdue(now()));
        assert_eq!(task.last_touched(), task.updated_at);
    }

    #[test]
    fn test_project_label_falls_back_to_id() {
        let task = Task::new("t1", "Docs", "p9");
        assert_eq!(task.project_label(), "p9");
    }

    #[test]
    fn test_completed_task_is_never_overdue() {
        let mut task = Task::new("t1", "Ship", "p1");
        task.due_date = Some((now() - Duration::days(3)).fixed_offset());
        task.status = TaskStatus::Completed;
        assert!(!task.is_overdue(now()));
    }

    #[test]
    fn test_due_now_is_not_overdue() {
        let mut task = Task::new("t1", "Ship", "p1");
        task.due_date = Some(now().fixed_offset());
        assert!(!task.is_overdue(now()));
    }

    #[test]
    fn test_priority_ordering() {
        assert!(TaskPriority::Urgent > TaskPriority::High);
        assert!(TaskPriority::Low < TaskPriority::Medium);
        assert_eq!(TaskPriority::parse("HIGH"), Some(TaskPriority::High));
        assert_eq!(TaskStatus::parse("DONE"), None);
    }
}
