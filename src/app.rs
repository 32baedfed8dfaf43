//! TechFlow Frontend App
//!
//! Navigation shell: tab bar plus the active page.

use leptos::prelude::*;
use log::{error, info};

use crate::components::NavTabBar;
use crate::context::{build_config, use_app_context, AppContext, Page};
use crate::pages::{DashboardPage, ProjectsPage, TasksPage};

#[component]
pub fn App() -> impl IntoView {
    let current_page = signal(Page::default());

    let context = build_config().and_then(|config| {
        info!("[APP] Using API at {}", config.root());
        AppContext::new(config, current_page)
    });

    match context {
        Ok(ctx) => {
            provide_context(ctx);
            view! { <AppLayout /> }.into_any()
        }
        Err(e) => {
            error!("[APP] Invalid configuration: {}", e);
            view! {
                <div class="config-error">
                    <h1>"TechFlow"</h1>
                    <p>{format!("The dashboard is not configured correctly: {}", e)}</p>
                </div>
            }
            .into_any()
        }
    }
}

#[component]
fn AppLayout() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="app-layout">
            <aside class="sidebar">
                <h1 class="brand">"TechFlow"</h1>
                <NavTabBar />
            </aside>
            <main class="main-content">
                {move || match ctx.current_page.get() {
                    Page::Dashboard => view! { <DashboardPage /> }.into_any(),
                    Page::Projects => view! { <ProjectsPage /> }.into_any(),
                    Page::Tasks => view! { <TasksPage /> }.into_any(),
                }}
            </main>
        </div>
    }
}
