//! Undo Toast Component
//!
//! Offers to reverse the last completion while its window is open.

use leptos::prelude::*;

use crate::task_list::TaskList;

#[component]
pub fn UndoToast(list: RwSignal<TaskList>, on_undo: Callback<()>) -> impl IntoView {
    let title = move || {
        list.with(|l| l.undo_target().and_then(|id| l.find(id)).map(|t| t.title.clone()))
    };

    view! {
        {move || title().map(|title| view! {
            <div class="undo-toast" role="status">
                <span>{format!("\"{}\" completed", title)}</span>
                <button class="link-btn" on:click=move |_| on_undo.run(())>"Undo"</button>
            </div>
        })}
    }
}
