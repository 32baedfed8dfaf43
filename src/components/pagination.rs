//! Pagination Component
//!
//! Previous/next controls; the callback receives the page delta.

use leptos::prelude::*;

/// Whether moving `delta` pages from `page` stays inside `1..=total_pages`
pub fn can_step(page: u32, total_pages: u32, delta: i64) -> bool {
    let target = i64::from(page) + delta;
    (1..=i64::from(total_pages.max(1))).contains(&target)
}

#[component]
pub fn Pagination(
    #[prop(into)] page: Signal<u32>,
    #[prop(into)] total_pages: Signal<u32>,
    #[prop(into)] disabled: Signal<bool>,
    #[prop(into)] on_change: Callback<i64>,
) -> impl IntoView {
    let blocked = move |delta: i64| {
        disabled.get() || !can_step(page.get(), total_pages.get(), delta)
    };

    view! {
        <div class="pagination">
            <button
                type="button"
                disabled=move || { blocked(-1) }
                on:click=move |_| on_change.run(-1)
            >
                "Previous"
            </button>
            <span class="pagination-label">
                {move || format!("Page {} of {}", page.get(), total_pages.get().max(1))}
            </span>
            <button
                type="button"
                disabled=move || { blocked(1) }
                on:click=move |_| on_change.run(1)
            >
                "Next"
            </button>
        </div>
    }
}
