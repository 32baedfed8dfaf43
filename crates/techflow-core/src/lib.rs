//! TechFlow Core
//!
//! Layered data access for the dashboard frontend:
//! - domain: entities, closed status/priority enums
//! - client: HTTP resource clients (one per collection)
//! - view_store / form: per-page view state and edit forms
//! - stats / dashboard: derived statistics over fetched snapshots
//!
//! Nothing here touches the DOM, so the whole layer runs natively under test.

pub mod client;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod error;
pub mod form;
pub mod stats;
pub mod view_store;

#[cfg(test)]
mod testing;

pub use client::{
    FilterSet, HttpClient, ListPage, ListRequest, ProjectClient, ProjectDraft, ProjectFilters,
    ProjectPatch, ResourceClient, StatusClient, TaskClient, TaskDraft, TaskFilters, TaskPatch,
};
pub use config::ApiConfig;
pub use domain::{Entity, Project, ProjectSnapshot, ProjectStatus, Task, TaskPriority, TaskStatus};
pub use error::{ApiError, ApiResult};
pub use form::{EntityForm, FormController, FormMode, FormState, ProjectForm, SubmitOutcome, TaskForm};
pub use view_store::{RefreshOutcome, ViewState, ViewStore};
