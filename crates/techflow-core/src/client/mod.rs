//! Resource Clients
//!
//! One client per remote collection. Clients own no state: every call is
//! exactly one request, with no retries, caching or deduplication.

mod http;
mod projects;
mod tasks;

use async_trait::async_trait;

use crate::domain::Entity;
use crate::error::ApiResult;

pub use http::HttpClient;
pub use projects::{ProjectClient, ProjectDraft, ProjectFilters, ProjectPatch};
pub use tasks::{TaskClient, TaskDraft, TaskFilters, TaskPatch};

/// A resource-specific set of list filters.
///
/// Only active filters are rendered: `None` and blank strings produce no
/// query pair, so `search=""` is the same request as no search at all.
pub trait FilterSet: Clone + PartialEq + Default + std::fmt::Debug + 'static {
    fn query_pairs(&self) -> Vec<(&'static str, String)>;

    fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }
}

/// Trimmed value of an optional text filter, `None` when blank
pub(crate) fn active_text(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Pagination plus filters for one list call
#[derive(Debug, Clone, PartialEq)]
pub struct ListRequest<F> {
    /// 1-based page number
    pub page: u32,
    pub limit: u32,
    pub filters: F,
}

impl<F: FilterSet> ListRequest<F> {
    /// Page is clamped to >= 1 and limit to > 0.
    pub fn new(page: u32, limit: u32, filters: F) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
            filters,
        }
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.filters.query_pairs();
        pairs.push(("page", self.page.to_string()));
        pairs.push(("limit", self.limit.to_string()));
        pairs
    }
}

/// One page of a remote collection
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<E> {
    pub items: Vec<E>,
    pub total_pages: u32,
    pub current_page: u32,
}

fn first_page() -> u32 {
    1
}

/// CRUD contract of a remote collection
///
/// Futures are `?Send`: in the browser everything runs on one thread.
#[async_trait(?Send)]
pub trait ResourceClient {
    type Entity: Entity;
    type Filters: FilterSet;
    /// Body of a create call
    type Draft;
    /// Body of a partial update; omitted fields stay unchanged server-side
    type Patch;

    /// Page size used when the caller has no preference
    const DEFAULT_LIMIT: u32;

    async fn list(&self, request: &ListRequest<Self::Filters>) -> ApiResult<ListPage<Self::Entity>>;

    async fn create(&self, draft: &Self::Draft) -> ApiResult<Self::Entity>;

    async fn update(&self, id: &str, patch: &Self::Patch) -> ApiResult<Self::Entity>;

    /// Idempotent from the caller's point of view
    async fn remove(&self, id: &str) -> ApiResult<()>;
}

/// Collections with a narrow status-transition endpoint
#[async_trait(?Send)]
pub trait StatusClient: ResourceClient {
    type Status: Copy + std::fmt::Debug;

    async fn update_status(&self, id: &str, status: Self::Status) -> ApiResult<Self::Entity>;
}
