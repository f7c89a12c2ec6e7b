//! Task Row Component
//!
//! One task: completion checkbox, title, description, due date, priority
//! badge and row actions.

use chrono::Utc;
use leptos::prelude::*;

use crate::components::DeleteConfirmButton;
use crate::models::Task;
use crate::store::{use_app_store, AppStateStoreFields};
use crate::time::{format_for_user, DisplayStyle};

/// Row callbacks, all keyed by task id
#[derive(Clone, Copy)]
pub struct TaskActions {
    pub toggle: Callback<String>,
    pub edit: Callback<String>,
    pub delete: Callback<String>,
    pub cycle_priority: Callback<String>,
}

#[component]
pub fn TaskRow(task: Task, actions: TaskActions) -> impl IntoView {
    let store = use_app_store();

    let overdue = !task.completed && task.due_date.is_some_and(|due| due < Utc::now());
    let due_label = task.due_date.map(|due| {
        let formatted = store.preferences().with(|prefs| format_for_user(due, prefs, DisplayStyle::DateTime));
        if overdue { format!("Overdue · {}", formatted) } else { formatted }
    });

    let id = task.id.clone();
    let toggle_id = id.clone();
    let edit_id = id.clone();
    let edit_btn_id = id.clone();
    let priority_id = id.clone();
    let row_class = if task.completed { "task-row completed" } else { "task-row" };

    view! {
        <div class=row_class>
            <input
                type="checkbox"
                class="task-check"
                prop:checked=task.completed
                on:change=move |_| actions.toggle.run(toggle_id.clone())
            />
            <div class="task-main" on:dblclick=move |_| actions.edit.run(edit_id.clone())>
                <span class="task-title">{task.title.clone()}</span>
                {task.description.clone().map(|d| view! { <span class="task-description">{d}</span> })}
                {due_label.map(|label| view! {
                    <span class=if overdue { "task-due overdue" } else { "task-due" }>{label}</span>
                })}
            </div>
            <button
                class=format!("priority-badge {}", task.priority.as_str())
                title="Change priority"
                on:click=move |_| actions.cycle_priority.run(priority_id.clone())
            >
                {task.priority.label()}
            </button>
            <button class="edit-btn" title="Edit task" on:click=move |_| actions.edit.run(edit_btn_id.clone())>
                "✎"
            </button>
            <DeleteConfirmButton
                task_title=task.title.clone()
                on_confirm=Callback::new(move |_: ()| actions.delete.run(id.clone()))
            />
        </div>
    }
}
