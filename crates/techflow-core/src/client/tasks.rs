//! Task Client
//!
//! `/tasks` collection, plus the narrow `PATCH /tasks/{id}/status`
//! transition used for "mark complete" style moves.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{
    active_text, first_page, FilterSet, HttpClient, ListPage, ListRequest, ResourceClient,
    StatusClient,
};
use crate::config::ApiConfig;
use crate::domain::{Task, TaskPriority, TaskStatus};
use crate::error::ApiResult;

const COLLECTION: &str = "tasks";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskFilters {
    pub project_id: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}

impl FilterSet for TaskFilters {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(project_id) = active_text(&self.project_id) {
            pairs.push(("projectId", project_id.to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(priority) = self.priority {
            pairs.push(("priority", priority.as_str().to_string()));
        }
        pairs
    }
}

/// Body of `POST /tasks`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub project_id: String,
    pub priority: TaskPriority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

/// Body of `PUT /tasks/{id}`
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

#[derive(Serialize)]
struct StatusBody {
    status: TaskStatus,
}

/// The task listing omits `currentPage`; tolerate either shape.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskListResponse {
    tasks: Vec<Task>,
    #[serde(default = "first_page")]
    total_pages: u32,
    #[serde(default)]
    current_page: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct TaskClient {
    http: HttpClient,
}

impl TaskClient {
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        Ok(Self::from_http(HttpClient::new(config)?))
    }

    pub fn from_http(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait(?Send)]
impl ResourceClient for TaskClient {
    type Entity = Task;
    type Filters = TaskFilters;
    type Draft = TaskDraft;
    type Patch = TaskPatch;

    const DEFAULT_LIMIT: u32 = 20;

    async fn list(&self, request: &ListRequest<TaskFilters>) -> ApiResult<ListPage<Task>> {
        let response: TaskListResponse = self
            .http
            .get_json(&[COLLECTION], &request.query_pairs())
            .await?;
        Ok(ListPage {
            items: response.tasks,
            total_pages: response.total_pages,
            current_page: response.current_page.unwrap_or(request.page),
        })
    }

    async fn create(&self, draft: &TaskDraft) -> ApiResult<Task> {
        self.http.send_json(Method::POST, &[COLLECTION], draft).await
    }

    async fn update(&self, id: &str, patch: &TaskPatch) -> ApiResult<Task> {
        self.http.send_json(Method::PUT, &[COLLECTION, id], patch).await
    }

    async fn remove(&self, id: &str) -> ApiResult<()> {
        self.http.delete(&[COLLECTION, id]).await
    }
}

#[async_trait(?Send)]
impl StatusClient for TaskClient {
    type Status = TaskStatus;

    async fn update_status(&self, id: &str, status: TaskStatus) -> ApiResult<Task> {
        self.http
            .send_json(Method::PATCH, &[COLLECTION, id, "status"], &StatusBody { status })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_render_only_active_pairs() {
        let filters = TaskFilters {
            project_id: Some(String::new()),
            status: Some(TaskStatus::InProgress),
            priority: None,
        };
        assert_eq!(
            filters.query_pairs(),
            vec![("status", "IN_PROGRESS".to_string())]
        );
        assert!(TaskFilters::default().is_empty());
    }

    #[test]
    fn test_list_request_renders_all_filters() {
        let request = ListRequest::new(
            1,
            TaskClient::DEFAULT_LIMIT,
            TaskFilters {
                project_id: Some("p1".into()),
                status: Some(TaskStatus::Todo),
                priority: Some(TaskPriority::Urgent),
            },
        );
        assert_eq!(
            request.query_pairs(),
            vec![
                ("projectId", "p1".to_string()),
                ("status", "TODO".to_string()),
                ("priority", "URGENT".to_string()),
                ("page", "1".to_string()),
                ("limit", "20".to_string()),
            ]
        );
    }

    #[test]
    fn test_draft_serializes_due_date_as_calendar_date() {
        let draft = TaskDraft {
            title: "Deploy".into(),
            description: None,
            project_id: "p1".into(),
            priority: TaskPriority::High,
            due_date: NaiveDate::from_ymd_opt(2025, 12, 1),
        };
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            serde_json::json!({
                "title": "Deploy",
                "projectId": "p1",
                "priority": "HIGH",
                "dueDate": "2025-12-01"
            })
        );
    }
}
