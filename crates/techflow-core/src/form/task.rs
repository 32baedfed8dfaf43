use chrono::NaiveDate;

use super::EntityForm;
use crate::client::{TaskDraft, TaskPatch};
use crate::domain::{Task, TaskPriority};

/// Format of the date input
const DATE_INPUT: &str = "%Y-%m-%d";

/// Fields of the task create/edit form
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub project_id: String,
    pub priority: TaskPriority,
    /// `YYYY-MM-DD` or empty
    pub due_date: String,
}

impl TaskForm {
    /// `Some(None)` when blank, `None` when not a date
    fn parsed_due_date(&self) -> Option<Option<NaiveDate>> {
        let raw = self.due_date.trim();
        if raw.is_empty() {
            return Some(None);
        }
        NaiveDate::parse_from_str(raw, DATE_INPUT).ok().map(Some)
    }

    fn due_date_value(&self) -> Option<NaiveDate> {
        self.parsed_due_date().flatten()
    }
}

impl EntityForm for TaskForm {
    type Entity = Task;
    type Draft = TaskDraft;
    type Patch = TaskPatch;

    fn from_entity(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            project_id: task.project_id.clone(),
            priority: task.priority,
            due_date: task
                .due_day()
                .map(|day| day.format(DATE_INPUT).to_string())
                .unwrap_or_default(),
        }
    }

    fn is_submittable(&self) -> bool {
        !self.title.trim().is_empty()
            && !self.project_id.trim().is_empty()
            && self.parsed_due_date().is_some()
    }

    fn to_draft(&self) -> TaskDraft {
        let description = self.description.trim();
        TaskDraft {
            title: self.title.trim().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            project_id: self.project_id.trim().to_string(),
            priority: self.priority,
            due_date: self.due_date_value(),
        }
    }

    /// Status is changed through the narrow status call, never here.
    /// A blank due date leaves the stored one unchanged.
    fn to_patch(&self) -> TaskPatch {
        TaskPatch {
            title: Some(self.title.trim().to_string()),
            description: Some(self.description.trim().to_string()),
            project_id: Some(self.project_id.trim().to_string()),
            status: None,
            priority: Some(self.priority),
            due_date: self.due_date_value(),
        }
    }
}
