//! Dashboard Page
//!
//! Task counters, recent activity and a project summary, all derived from
//! one concurrent fetch of the first page of projects and tasks.

use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, error, info};
use reactive_stores::Store;
use techflow_core::dashboard::{self, DashboardData, DashboardSummary};

use crate::components::{
    activity_label, PriorityBadge, ProjectStatusBadge, StatCard, TaskStatusBadge,
};
use crate::context::{use_app_context, Page};
use crate::store::{DashboardState, DashboardStateStoreFields};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = Store::new(DashboardState::default());
    let limit = ctx.config.with_value(|config| config.dashboard_limit);

    let load = move || {
        // None once the page is gone
        let Some(generation) = store.try_update(DashboardState::begin_load) else {
            return;
        };
        let projects = ctx.project_client();
        let tasks = ctx.task_client();
        spawn_local(async move {
            let result = dashboard::load(&projects, &tasks, limit).await;
            match &result {
                Ok(data) => info!(
                    "[Dashboard] Loaded {} projects, {} tasks",
                    data.projects.len(),
                    data.tasks.len()
                ),
                Err(e) => error!("[Dashboard] Load failed: {}", e),
            }
            let applied = store.try_update(|state| state.finish_load(generation, result, Utc::now()));
            if applied != Some(true) {
                debug!("[Dashboard] Dropped result of load {}", generation);
            }
        });
    };

    // Load on mount
    Effect::new(move |_| load());

    let summary = Signal::derive(move || {
        let data = DashboardData {
            projects: store.projects().get(),
            tasks: store.tasks().get(),
        };
        DashboardSummary::compute(&data, Utc::now())
    });
    let first_load = move || store.loading().get() && store.loaded_at().get().is_none();

    view! {
        <section class="page dashboard-page">
            <header class="page-header">
                <div>
                    <h2>"Dashboard"</h2>
                    <p class="page-subtitle">"Overview of your TechFlow projects and tasks."</p>
                </div>
                <div class="page-actions">
                    <button type="button" on:click=move |_| ctx.navigate(Page::Tasks)>"+ New task"</button>
                    <button type="button" class="outline" on:click=move |_| ctx.navigate(Page::Projects)>
                        "View projects"
                    </button>
                    <button type="button" class="outline" disabled=move || store.loading().get() on:click=move |_| load()>
                        "Refresh"
                    </button>
                </div>
            </header>

            {move || store.error().get().map(|message| view! {
                <p class="error-banner">{format!("Could not load the dashboard: {}", message)}</p>
            })}

            <Show
                when=move || !first_load()
                fallback=|| view! { <p class="loading">"Loading dashboard..."</p> }
            >
                {move || {
                    let summary = summary.get();
                    let counts = summary.counts;
                    view! {
                        <div class="stat-grid">
                            <StatCard title="Total tasks" value=counts.total />
                            <StatCard title="Completed" value=counts.completed />
                            <StatCard title="Pending" value=counts.pending />
                            <StatCard title="Overdue" value=counts.overdue alert={counts.overdue > 0} />
                        </div>

                        <div class="dashboard-columns">
                            <div class="panel activity-feed">
                                <div class="panel-header">
                                    <h3>"Recent activity"</h3>
                                    <span class="muted">{format!("Last {} tasks", summary.recent.len())}</span>
                                </div>
                                {if summary.recent.is_empty() {
                                    view! {
                                        <p class="muted">"No recent activity yet. Create or update tasks to see them here."</p>
                                    }.into_any()
                                } else {
                                    view! {
                                        <ul class="activity-list">
                                            {summary.recent.iter().map(|task| view! {
                                                <li class="activity-item">
                                                    <div>
                                                        <p class="activity-title">{task.title.clone()}</p>
                                                        <p class="muted">{format!("Project: {}", task.project_label())}</p>
                                                        {activity_label(task).map(|label| view! { <p class="muted small">{label}</p> })}
                                                    </div>
                                                    <div class="activity-badges">
                                                        <TaskStatusBadge status=task.status />
                                                        <PriorityBadge priority=task.priority />
                                                    </div>
                                                </li>
                                            }).collect_view()}
                                        </ul>
                                    }.into_any()
                                }}
                            </div>

                            <div class="panel project-summary">
                                <h3>"Project summary"</h3>
                                <p class="muted">"Total projects: " <strong>{summary.project_total}</strong></p>
                                <div class="status-lines">
                                    {summary.projects_by_status.iter().map(|(status, count)| view! {
                                        <p>{format!("{}: ", status.label())}<strong>{*count}</strong></p>
                                    }).collect_view()}
                                </div>
                                <h4>"Some projects"</h4>
                                <ul class="featured-projects">
                                    {summary.featured_projects.iter().map(|project| view! {
                                        <li>
                                            <span class="truncate">{project.name.clone()}</span>
                                            <ProjectStatusBadge status=project.status />
                                        </li>
                                    }).collect_view()}
                                    {summary.featured_projects.is_empty().then(|| view! {
                                        <li class="muted">"No projects yet. Create one from the Projects page."</li>
                                    })}
                                </ul>
                            </div>
                        </div>
                    }
                }}
            </Show>
        </section>
    }
}
