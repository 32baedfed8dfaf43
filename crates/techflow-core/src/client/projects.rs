//! Project Client
//!
//! `/projects` collection: list with search, create, update, delete.

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{active_text, first_page, FilterSet, HttpClient, ListPage, ListRequest, ResourceClient};
use crate::config::ApiConfig;
use crate::domain::{Project, ProjectStatus};
use crate::error::ApiResult;

const COLLECTION: &str = "projects";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProjectFilters {
    /// Substring match on the project name
    pub search: Option<String>,
}

impl ProjectFilters {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
        }
    }
}

impl FilterSet for ProjectFilters {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        active_text(&self.search)
            .map(|term| vec![("search", term.to_string())])
            .unwrap_or_default()
    }
}

/// Body of `POST /projects`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: ProjectStatus,
}

/// Body of `PUT /projects/{id}`
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectListResponse {
    projects: Vec<Project>,
    #[serde(default = "first_page")]
    total_pages: u32,
    #[serde(default)]
    current_page: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct ProjectClient {
    http: HttpClient,
}

impl ProjectClient {
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        Ok(Self::from_http(HttpClient::new(config)?))
    }

    pub fn from_http(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait(?Send)]
impl ResourceClient for ProjectClient {
    type Entity = Project;
    type Filters = ProjectFilters;
    type Draft = ProjectDraft;
    type Patch = ProjectPatch;

    const DEFAULT_LIMIT: u32 = 10;

    async fn list(&self, request: &ListRequest<ProjectFilters>) -> ApiResult<ListPage<Project>> {
        let response: ProjectListResponse = self
            .http
            .get_json(&[COLLECTION], &request.query_pairs())
            .await?;
        Ok(ListPage {
            items: response.projects,
            total_pages: response.total_pages,
            current_page: response.current_page.unwrap_or(request.page),
        })
    }

    async fn create(&self, draft: &ProjectDraft) -> ApiResult<Project> {
        self.http.send_json(Method::POST, &[COLLECTION], draft).await
    }

    async fn update(&self, id: &str, patch: &ProjectPatch) -> ApiResult<Project> {
        self.http.send_json(Method::PUT, &[COLLECTION, id], patch).await
    }

    async fn remove(&self, id: &str) -> ApiResult<()> {
        self.http.delete(&[COLLECTION, id]).await
    }
}
