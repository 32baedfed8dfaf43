//! Tasks Page
//!
//! Filterable task list with a create/edit form, mark-complete and delete.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{error, info, warn};
use techflow_core::{
    Entity, ListRequest, Project, ProjectFilters, ResourceClient, SubmitOutcome, Task, TaskClient,
    TaskFilters, TaskForm, TaskPriority, TaskStatus, ViewStore,
};

use super::PageHandles;
use crate::components::{ConfirmDelete, Pagination, PriorityBadge, TaskStatusBadge};
use crate::context::use_app_context;

type Handles = PageHandles<TaskClient, TaskForm>;

/// Filter selections as typed; applied only on request
#[derive(Debug, Clone, Default, PartialEq)]
struct FilterInput {
    status: String,
    priority: String,
    project_id: String,
}

impl FilterInput {
    fn to_filters(&self) -> TaskFilters {
        TaskFilters {
            project_id: Some(self.project_id.clone()).filter(|id| !id.is_empty()),
            status: TaskStatus::parse(&self.status),
            priority: TaskPriority::parse(&self.priority),
        }
    }
}

#[component]
pub fn TasksPage() -> impl IntoView {
    let ctx = use_app_context();
    let (page_size, project_limit) =
        ctx.config.with_value(|config| (config.task_page_size, config.dashboard_limit));
    let handles = Handles::bind(ViewStore::new(Rc::new(ctx.task_client()), page_size));
    let state = handles.state;

    let (projects, set_projects) = signal(Vec::<Project>::new());
    let (filter_input, set_filter_input) = signal(FilterInput::default());

    // Load tasks and the project options on mount
    Effect::new(move |_| {
        handles.with_store(|store| async move {
            store.refresh(1, TaskFilters::default()).await;
        });
        let client = ctx.project_client();
        spawn_local(async move {
            let request = ListRequest::new(1, project_limit, ProjectFilters::default());
            match client.list(&request).await {
                Ok(page) => {
                    info!("[Tasks] Loaded {} project options", page.items.len());
                    let _ = set_projects.try_set(page.items);
                }
                Err(e) => error!("[Tasks] Could not load projects: {}", e),
            }
        });
    });

    let on_apply = move |_: web_sys::MouseEvent| {
        let filters = filter_input.with_untracked(FilterInput::to_filters);
        handles.with_store(|store| async move {
            store.apply_filters(filters).await;
        });
    };

    let on_page = Callback::new(move |delta: i64| {
        handles.with_store(|store| async move {
            store.change_page(delta).await;
        });
    });

    view! {
        <section class="page tasks-page">
            <header class="page-header">
                <h2>"Tasks"</h2>
            </header>

            <div class="panel filter-bar">
                <label>
                    "Status"
                    <select
                        prop:value=move || filter_input.with(|f| f.status.clone())
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            set_filter_input.update(|f| f.status = value);
                        }
                    >
                        <option value="">"All"</option>
                        {TaskStatus::ALL.iter().map(|status| view! {
                            <option value=status.as_str()>{status.as_str()}</option>
                        }).collect_view()}
                    </select>
                </label>
                <label>
                    "Priority"
                    <select
                        prop:value=move || filter_input.with(|f| f.priority.clone())
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            set_filter_input.update(|f| f.priority = value);
                        }
                    >
                        <option value="">"All"</option>
                        {TaskPriority::ALL.iter().map(|priority| view! {
                            <option value=priority.as_str()>{priority.as_str()}</option>
                        }).collect_view()}
                    </select>
                </label>
                <label>
                    "Project"
                    <select
                        prop:value=move || filter_input.with(|f| f.project_id.clone())
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            set_filter_input.update(|f| f.project_id = value);
                        }
                    >
                        <option value="">"All"</option>
                        <ProjectOptions projects=projects />
                    </select>
                </label>
                <button type="button" on:click=on_apply>"Apply filters"</button>
            </div>

            <TaskFormPanel handles=handles projects=projects />

            {move || state.with(|s| s.last_error.clone()).map(|message| view! {
                <p class="error-banner">{message}</p>
            })}

            {move || {
                let (loading, tasks) = state.with(|s| (s.loading, s.entities.clone()));
                if loading && tasks.is_empty() {
                    view! { <p class="loading">"Loading tasks..."</p> }.into_any()
                } else if tasks.is_empty() {
                    view! { <p class="muted">"No tasks."</p> }.into_any()
                } else {
                    view! {
                        <div class="card-grid" class:refreshing=loading>
                            {tasks.into_iter().map(|task| view! {
                                <TaskCard task=task handles=handles />
                            }).collect_view()}
                        </div>
                    }.into_any()
                }
            }}

            <Pagination
                page=Signal::derive(move || state.with(|s| s.page))
                total_pages=Signal::derive(move || state.with(|s| s.total_pages))
                disabled=Signal::derive(move || state.with(|s| s.loading))
                on_change=on_page
            />
        </section>
    }
}

#[component]
fn ProjectOptions(projects: ReadSignal<Vec<Project>>) -> impl IntoView {
    view! {
        <For
            each=move || projects.get()
            key=|project| project.id.clone()
            children=move |project| view! {
                <option value=project.id.clone()>{project.name.clone()}</option>
            }
        />
    }
}

#[component]
fn TaskFormPanel(handles: Handles, projects: ReadSignal<Vec<Project>>) -> impl IntoView {
    let form_state = handles.form_state;
    let fields = move || form_state.with(|s| s.fields.clone());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        handles.with_form(|form| async move {
            match form.submit().await {
                SubmitOutcome::Saved(task) => info!("[Tasks] Saved {}", task.id()),
                SubmitOutcome::Failed(e) => warn!("[Tasks] Save failed: {}", e),
                SubmitOutcome::Invalid | SubmitOutcome::InFlight => {}
            }
        });
    };

    view! {
        <form class="panel entity-form" on:submit=on_submit>
            <label>
                "Title"
                <input
                    type="text"
                    required=true
                    prop:value=move || fields().title
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        handles.edit_form(|form| form.update_fields(|f| f.title = value));
                    }
                />
            </label>
            <label>
                "Description"
                <input
                    type="text"
                    prop:value=move || fields().description
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        handles.edit_form(|form| form.update_fields(|f| f.description = value));
                    }
                />
            </label>
            <label>
                "Project"
                <select
                    required=true
                    prop:value=move || fields().project_id
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        handles.edit_form(|form| form.update_fields(|f| f.project_id = value));
                    }
                >
                    <option value="">"Select a project"</option>
                    <ProjectOptions projects=projects />
                </select>
            </label>
            <label>
                "Priority"
                <select
                    prop:value=move || fields().priority.as_str()
                    on:change=move |ev| {
                        if let Some(priority) = TaskPriority::parse(&event_target_value(&ev)) {
                            handles.edit_form(|form| form.update_fields(|f| f.priority = priority));
                        }
                    }
                >
                    {TaskPriority::ALL.iter().map(|priority| view! {
                        <option value=priority.as_str()>{priority.as_str()}</option>
                    }).collect_view()}
                </select>
            </label>
            <label>
                "Due date"
                <input
                    type="date"
                    prop:value=move || fields().due_date
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        handles.edit_form(|form| form.update_fields(|f| f.due_date = value));
                    }
                />
            </label>
            <div class="form-actions">
                <button type="submit" disabled=move || form_state.with(|s| s.submitting)>
                    {move || if form_state.with(|s| s.mode.is_editing()) { "Save changes" } else { "Create task" }}
                </button>
                <Show when=move || form_state.with(|s| s.mode.is_editing())>
                    <button
                        type="button"
                        class="outline"
                        on:click=move |_| handles.edit_form(|form| form.cancel_edit())
                    >
                        "Cancel"
                    </button>
                </Show>
            </div>
            {move || form_state.with(|s| s.error.clone()).map(|message| view! {
                <p class="form-error">{message}</p>
            })}
        </form>
    }
}

#[component]
fn TaskCard(task: Task, handles: Handles) -> impl IntoView {
    let editing = {
        let id = task.id.clone();
        move || handles.form_state.with(|s| s.mode.editing_id() == Some(id.as_str()))
    };
    let on_edit = {
        let task = task.clone();
        move |_: web_sys::MouseEvent| handles.edit_form(|form| form.start_edit(&task))
    };
    let on_complete = {
        let id = task.id.clone();
        move |_: web_sys::MouseEvent| {
            let id = id.clone();
            handles.with_store(|store| async move {
                if let Err(e) = store.set_status(&id, TaskStatus::Completed).await {
                    warn!("[Tasks] Completing {} failed: {}", id, e);
                }
            });
        }
    };
    let on_delete = {
        let id = task.id.clone();
        Callback::new(move |_: ()| {
            let id = id.clone();
            handles.with_store(|store| async move {
                if let Err(e) = store.remove(&id).await {
                    warn!("[Tasks] Delete of {} failed: {}", id, e);
                }
            });
        })
    };

    view! {
        <div class="card task-card" class:editing=editing>
            <div class="card-header">
                <div>
                    <h3>{task.title.clone()}</h3>
                    <p class="muted">"Project: " <strong>{task.project_label().to_string()}</strong></p>
                    {task.due_day().map(|day| view! {
                        <p class="muted">{format!("Due: {}", day)}</p>
                    })}
                </div>
                <div class="card-badges">
                    <TaskStatusBadge status=task.status />
                    <PriorityBadge priority=task.priority />
                </div>
            </div>
            {task.description.clone().map(|text| view! { <p class="card-body">{text}</p> })}
            <div class="card-actions">
                {(!task.is_completed()).then(move || view! {
                    <button type="button" on:click=on_complete>"Mark completed"</button>
                })}
                <button type="button" class="outline" on:click=on_edit>"Edit"</button>
                <ConfirmDelete
                    noun="task"
                    name=task.title.clone()
                    busy=Signal::derive(move || handles.state.with(|s| s.loading))
                    on_confirm=on_delete
                />
            </div>
        </div>
    }
}
