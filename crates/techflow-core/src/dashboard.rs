//! Dashboard loading and summary.

use chrono::{DateTime, Utc};
use futures::future::join;
use log::debug;

use crate::client::{ListRequest, ResourceClient};
use crate::domain::{Project, ProjectStatus, Task};
use crate::error::ApiResult;
use crate::stats::{self, TaskCounts, RECENT_ACTIVITY_LIMIT};

/// Projects shown by name in the summary panel
pub const FEATURED_PROJECTS: usize = 5;

/// Raw snapshot the dashboard is computed from
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardData {
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
}

/// Fetch the first `limit` projects and tasks concurrently.
///
/// Both calls must succeed; a single failure fails the whole load.
pub async fn load<P, T>(projects: &P, tasks: &T, limit: u32) -> ApiResult<DashboardData>
where
    P: ResourceClient<Entity = Project>,
    T: ResourceClient<Entity = Task>,
{
    let project_request = ListRequest::new(1, limit, P::Filters::default());
    let task_request = ListRequest::new(1, limit, T::Filters::default());
    let (project_page, task_page) =
        join(projects.list(&project_request), tasks.list(&task_request)).await;
    let data = DashboardData {
        projects: project_page?.items,
        tasks: task_page?.items,
    };
    debug!(
        "dashboard loaded {} projects, {} tasks",
        data.projects.len(),
        data.tasks.len()
    );
    Ok(data)
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub counts: TaskCounts,
    pub recent: Vec<Task>,
    pub project_total: usize,
    pub projects_by_status: Vec<(ProjectStatus, usize)>,
    pub featured_projects: Vec<Project>,
}

impl DashboardSummary {
    pub fn compute(data: &DashboardData, now: DateTime<Utc>) -> Self {
        Self {
            counts: stats::task_counts(&data.tasks, now),
            recent: stats::recent_activity(&data.tasks, RECENT_ACTIVITY_LIMIT),
            project_total: data.projects.len(),
            projects_by_status: stats::project_status_breakdown(&data.projects),
            featured_projects: data.projects.iter().take(FEATURED_PROJECTS).cloned().collect(),
        }
    }
}
