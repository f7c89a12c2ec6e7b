//! Delete Confirm Button Component
//!
//! Trash button on a task row. The first click asks "Delete “title”?" in
//! place; only the confirm button runs the delete.

use leptos::prelude::*;

/// Prompt shown while confirming; long titles are cut at a word boundary
pub fn confirm_prompt(task_title: &str) -> String {
    const MAX_CHARS: usize = 32;
    let title = task_title.trim();
    if title.chars().count() > MAX_CHARS {
        let cut: String = title.chars().take(MAX_CHARS).collect();
        let short = cut.rsplit_once(' ').map_or(cut.as_str(), |(head, _)| head);
        format!("Delete “{}…”?", short.trim_end())
    } else {
        format!("Delete “{}”?", title)
    }
}

#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] task_title: String,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let confirming = RwSignal::new(false);
    let prompt = confirm_prompt(&task_title);
    let hover = format!("Delete {}", task_title.trim());

    let trash = move || {
        view! {
            <button
                class="delete-btn"
                title=hover.clone()
                on:click=move |ev| {
                    ev.stop_propagation();
                    confirming.set(true);
                }
            >
                "×"
            </button>
        }
    };

    view! {
        <Show when=move || confirming.get() fallback=trash>
            <span class="delete-confirm" on:click=|ev| ev.stop_propagation()>
                <span class="delete-confirm-text">{prompt.clone()}</span>
                <button
                    class="confirm-btn"
                    title="Delete task"
                    on:click=move |_| {
                        confirming.set(false);
                        on_confirm.run(());
                    }
                >
                    "✓"
                </button>
                <button class="cancel-btn" title="Keep task" on:click=move |_| confirming.set(false)>
                    "✗"
                </button>
            </span>
        </Show>
    }
}
