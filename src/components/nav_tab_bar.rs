//! Navigation Tab Bar Component
//!
//! Switches the active page through the context signal.

use leptos::prelude::*;

use crate::context::{use_app_context, Page};

#[component]
pub fn NavTabBar() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <nav class="nav-tab-bar">
            {Page::ALL.iter().map(|&page| {
                let is_active = move || ctx.current_page.get() == page;
                let tab_class = move || {
                    if is_active() { "nav-tab active" } else { "nav-tab" }
                };
                view! {
                    <button
                        type="button"
                        class=tab_class
                        on:click=move |_| ctx.navigate(page)
                    >
                        {page.label()}
                    </button>
                }
            }).collect_view()}
        </nav>
    }
}
