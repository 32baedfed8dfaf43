//! Card delete action with an inline "Delete task 'X'?" prompt.

use leptos::prelude::*;

/// Names longer than this are shortened in the prompt
const PROMPT_NAME_CHARS: usize = 40;

pub fn confirm_prompt(noun: &str, name: &str) -> String {
    let name = name.trim();
    let shown = if name.chars().count() > PROMPT_NAME_CHARS {
        let cut: String = name.chars().take(PROMPT_NAME_CHARS).collect();
        format!("{}...", cut.trim_end())
    } else {
        name.to_string()
    };
    format!("Delete {} '{}'?", noun, shown)
}

/// Delete button of a project/task card.
///
/// The first click only asks; `on_confirm` runs on the second. While
/// `busy` is set (the list is refreshing) the action is disabled.
#[component]
pub fn ConfirmDelete(
    noun: &'static str,
    #[prop(into)] name: String,
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (asking, set_asking) = signal(false);
    let prompt = confirm_prompt(noun, &name);

    move || {
        if asking.get() {
            view! {
                <span class="delete-confirm" role="alertdialog">
                    <span class="delete-confirm-text">{prompt.clone()}</span>
                    <button
                        type="button"
                        class="danger"
                        disabled=move || busy.get()
                        on:click=move |_| {
                            set_asking.set(false);
                            on_confirm.run(());
                        }
                    >
                        "Delete"
                    </button>
                    <button type="button" class="outline" on:click=move |_| set_asking.set(false)>
                        "Keep"
                    </button>
                </span>
            }
            .into_any()
        } else {
            view! {
                <button
                    type="button"
                    class="outline danger"
                    title=format!("Delete this {}", noun)
                    disabled=move || busy.get()
                    on:click=move |_| set_asking.set(true)
                >
                    "Delete"
                </button>
            }
            .into_any()
        }
    }
}
