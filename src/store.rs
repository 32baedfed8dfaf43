//! Dashboard State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Each dashboard
//! mount creates its own store, so the snapshot goes away with the page.

use chrono::{DateTime, Utc};
use reactive_stores::Store;
use techflow_core::dashboard::DashboardData;
use techflow_core::{ApiResult, Project, Task};

/// Snapshot the dashboard statistics are derived from
#[derive(Clone, Debug, Default, Store)]
pub struct DashboardState {
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
    /// A load is in flight
    pub loading: bool,
    /// Message of the last failed load
    pub error: Option<String>,
    pub loaded_at: Option<DateTime<Utc>>,
    /// Number of the latest load; older results are ignored
    generation: u64,
}

impl DashboardState {
    /// Mark a load as started and return its generation
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.generation
    }

    /// Apply the result of load `generation` unless a newer one was started.
    ///
    /// A failed load empties the display.
    pub fn finish_load(
        &mut self,
        generation: u64,
        result: ApiResult<DashboardData>,
        at: DateTime<Utc>,
    ) -> bool {
        if generation != self.generation {
            return false;
        }
        self.loading = false;
        match result {
            Ok(data) => {
                self.projects = data.projects;
                self.tasks = data.tasks;
                self.error = None;
                self.loaded_at = Some(at);
            }
            Err(e) => {
                self.projects.clear();
                self.tasks.clear();
                self.error = Some(e.to_string());
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use techflow_core::{ApiError, ProjectStatus};

    fn data(projects: &[&str]) -> DashboardData {
        DashboardData {
            projects: projects
                .iter()
                .map(|id| Project::new(*id, *id, ProjectStatus::Active))
                .collect(),
            tasks: vec![Task::new("t1", "Ship", "p1")],
        }
    }

    #[test]
    fn test_latest_load_wins() {
        let mut state = DashboardState::default();
        let first = state.begin_load();
        let second = state.begin_load();

        assert!(state.finish_load(second, Ok(data(&["new"])), Utc::now()));
        assert!(!state.finish_load(first, Ok(data(&["old"])), Utc::now()));
        assert_eq!(state.projects[0].id, "new");
        assert!(!state.loading);
    }

    #[test]
    fn test_stale_result_keeps_loading_for_newer_one() {
        let mut state = DashboardState::default();
        let first = state.begin_load();
        state.begin_load();

        assert!(!state.finish_load(first, Ok(data(&["old"])), Utc::now()));
        assert!(state.loading);
        assert!(state.projects.is_empty());
    }

    #[test]
    fn test_failed_load_empties_display() {
        let mut state = DashboardState::default();
        let generation = state.begin_load();
        state.finish_load(generation, Ok(data(&["p1"])), Utc::now());

        let generation = state.begin_load();
        let failed = Err(ApiError::rejected(500, "boom"));
        assert!(state.finish_load(generation, failed, Utc::now()));
        assert!(state.projects.is_empty());
        assert!(state.tasks.is_empty());
        assert_eq!(state.error.as_deref(), Some("server rejected request (500): boom"));
    }
}
