//! Projects Page
//!
//! Search, create/edit form and a paginated project list.

use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use techflow_core::{
    Entity, Project, ProjectClient, ProjectFilters, ProjectForm, ProjectStatus, SubmitOutcome,
    ViewStore,
};

use super::PageHandles;
use crate::components::{ConfirmDelete, Pagination, ProjectStatusBadge};
use crate::context::use_app_context;

type Handles = PageHandles<ProjectClient, ProjectForm>;

#[component]
pub fn ProjectsPage() -> impl IntoView {
    let ctx = use_app_context();
    let page_size = ctx.config.with_value(|config| config.project_page_size);
    let handles = Handles::bind(ViewStore::new(Rc::new(ctx.project_client()), page_size));
    let state = handles.state;

    let (search, set_search) = signal(String::new());

    // Load on mount
    Effect::new(move |_| {
        handles.with_store(|store| async move {
            store.refresh(1, ProjectFilters::default()).await;
        });
    });

    let on_search = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let filters = ProjectFilters::search(search.get_untracked());
        handles.with_store(|store| async move {
            store.apply_filters(filters).await;
        });
    };

    let on_clear = move |_: web_sys::MouseEvent| {
        set_search.set(String::new());
        handles.with_store(|store| async move {
            store.apply_filters(ProjectFilters::default()).await;
        });
    };

    let on_page = Callback::new(move |delta: i64| {
        handles.with_store(|store| async move {
            store.change_page(delta).await;
        });
    });

    view! {
        <section class="page projects-page">
            <header class="page-header">
                <h2>"Projects"</h2>
            </header>

            <form class="panel search-bar" on:submit=on_search>
                <input
                    type="search"
                    placeholder="Search projects..."
                    prop:value=move || search.get()
                    on:input=move |ev| set_search.set(event_target_value(&ev))
                />
                <button type="submit">"Search"</button>
                <Show when=move || !search.get().is_empty()>
                    <button type="button" class="outline" on:click=on_clear>"Clear"</button>
                </Show>
            </form>

            <ProjectFormPanel handles=handles />

            {move || state.with(|s| s.last_error.clone()).map(|message| view! {
                <p class="error-banner">{message}</p>
            })}

            {move || {
                let (loading, projects) = state.with(|s| (s.loading, s.entities.clone()));
                if loading && projects.is_empty() {
                    view! { <p class="loading">"Loading projects..."</p> }.into_any()
                } else if projects.is_empty() {
                    view! { <p class="muted">"No projects found."</p> }.into_any()
                } else {
                    view! {
                        <div class="card-grid" class:refreshing=loading>
                            {projects.into_iter().map(|project| view! {
                                <ProjectCard project=project handles=handles />
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
fn ProjectFormPanel(handles: Handles) -> impl IntoView {
    let form_state = handles.form_state;
    let fields = move || form_state.with(|s| s.fields.clone());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        handles.with_form(|form| async move {
            match form.submit().await {
                SubmitOutcome::Saved(project) => info!("[Projects] Saved {}", project.id()),
                SubmitOutcome::Failed(e) => warn!("[Projects] Save failed: {}", e),
                SubmitOutcome::Invalid | SubmitOutcome::InFlight => {}
            }
        });
    };

    view! {
        <form class="panel entity-form" on:submit=on_submit>
            <label>
                "Name"
                <input
                    type="text"
                    required=true
                    prop:value=move || fields().name
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        handles.edit_form(|form| form.update_fields(|f| f.name = value));
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
                "Status"
                <select
                    prop:value=move || fields().status.as_str()
                    on:change=move |ev| {
                        if let Some(status) = ProjectStatus::parse(&event_target_value(&ev)) {
                            handles.edit_form(|form| form.update_fields(|f| f.status = status));
                        }
                    }
                >
                    {ProjectStatus::ALL.iter().map(|status| view! {
                        <option value=status.as_str()>{status.label()}</option>
                    }).collect_view()}
                </select>
            </label>
            <div class="form-actions">
                <button type="submit" disabled=move || form_state.with(|s| s.submitting)>
                    {move || if form_state.with(|s| s.mode.is_editing()) { "Save changes" } else { "Create project" }}
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
fn ProjectCard(project: Project, handles: Handles) -> impl IntoView {
    let editing = {
        let id = project.id.clone();
        move || handles.form_state.with(|s| s.mode.editing_id() == Some(id.as_str()))
    };
    let on_edit = {
        let project = project.clone();
        move |_: web_sys::MouseEvent| handles.edit_form(|form| form.start_edit(&project))
    };
    let on_delete = {
        let id = project.id.clone();
        Callback::new(move |_: ()| {
            let id = id.clone();
            handles.with_store(|store| async move {
                if let Err(e) = store.remove(&id).await {
                    warn!("[Projects] Delete of {} failed: {}", id, e);
                }
            });
        })
    };

    view! {
        <div class="card project-card" class:editing=editing>
            <div class="card-header">
                <h3>{project.name.clone()}</h3>
                <ProjectStatusBadge status=project.status />
            </div>
            {project.description.clone().map(|text| view! { <p class="card-body">{text}</p> })}
            <div class="card-actions">
                <button type="button" class="outline" on:click=on_edit>"Edit"</button>
                <ConfirmDelete
                    noun="project"
                    name=project.name.clone()
                    busy=Signal::derive(move || handles.state.with(|s| s.loading))
                    on_confirm=on_delete
                />
            </div>
        </div>
    }
}
