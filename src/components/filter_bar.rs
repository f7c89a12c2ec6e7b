//! Filter Bar Component
//!
//! Search box and completion tabs with counts over the loaded tasks.

use leptos::prelude::*;

use crate::task_list::{CompletionFilter, TaskList};

#[component]
pub fn FilterBar(
    list: RwSignal<TaskList>,
    search: RwSignal<String>,
    /// `None` hides the completion tabs (today view)
    completion: Option<RwSignal<CompletionFilter>>,
) -> impl IntoView {
    let counts = move || {
        list.with(|l| {
            let total = l.tasks().len();
            let active = l.active_count();
            (total, active, total - active)
        })
    };

    view! {
        <div class="filter-bar">
            <input
                type="search"
                class="input search"
                placeholder="Search tasks…"
                prop:value=move || search.get()
                on:input=move |ev| search.set(event_target_value(&ev))
            />
            {completion.map(|completion| view! {
                <div class="filter-tabs">
                    {[CompletionFilter::All, CompletionFilter::Active, CompletionFilter::Completed].into_iter().map(|filter| {
                        let count = move || {
                            let (total, active, done) = counts();
                            match filter {
                                CompletionFilter::All => total,
                                CompletionFilter::Active => active,
                                CompletionFilter::Completed => done,
                            }
                        };
                        let label = match filter {
                            CompletionFilter::All => "All",
                            CompletionFilter::Active => "Active",
                            CompletionFilter::Completed => "Completed",
                        };
                        view! {
                            <button
                                class=move || if completion.get() == filter { "tab-btn active" } else { "tab-btn" }
                                on:click=move |_| completion.set(filter)
                            >
                                {label} " " <span class="count">{count}</span>
                            </button>
                        }
                    }).collect_view()}
                </div>
            })}
        </div>
    }
}
