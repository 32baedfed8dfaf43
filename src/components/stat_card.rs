use leptos::prelude::*;

/// One dashboard counter; `alert` switches to the warning style
#[component]
pub fn StatCard(
    title: &'static str,
    value: usize,
    #[prop(optional)] alert: bool,
) -> impl IntoView {
    view! {
        <div class="stat-card" class:alert=alert>
            <p class="stat-title">{title}</p>
            <p class="stat-value">{value}</p>
        </div>
    }
}
