//! Edit Task Modal Component

use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{input_class, FieldMessage};
use crate::context::use_app_context;
use crate::error::FieldErrors;
use crate::models::{Priority, Task};
use crate::notifications::Notification;
use crate::task_list::{TaskDraft, TaskList};
use crate::time::{parse_due_input, to_local_input};

/// Shown while `editing` holds a task; closing clears it
#[component]
pub fn EditTaskModal(list: RwSignal<TaskList>, editing: RwSignal<Option<Task>>) -> impl IntoView {
    view! {
        {move || editing.get().map(|task| view! { <EditTaskDialog list=list editing=editing task=task /> })}
    }
}

#[component]
fn EditTaskDialog(list: RwSignal<TaskList>, editing: RwSignal<Option<Task>>, task: Task) -> impl IntoView {
    let ctx = use_app_context();
    let id = task.id.clone();

    let title = RwSignal::new(task.title.clone());
    let description = RwSignal::new(task.description.clone().unwrap_or_default());
    let priority = RwSignal::new(task.priority);
    let due = RwSignal::new(task.due_date.map(to_local_input).unwrap_or_default());
    let errors = RwSignal::new(FieldErrors::new());
    let saving = RwSignal::new(false);

    let close = move || editing.set(None);

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let draft = TaskDraft {
            title: title.get_untracked(),
            description: description.get_untracked(),
            priority: priority.get_untracked(),
            due: parse_due_input(&due.get_untracked()),
        };
        let prepared = list.with_untracked(|l| l.prepare_update(&id, &draft, Utc::now()));
        let payload = match prepared {
            Ok(payload) => payload,
            Err(field_errors) => {
                errors.set(field_errors);
                return;
            }
        };
        saving.set(true);
        let id = id.clone();
        let client = ctx.client();
        spawn_local(async move {
            let result = api::update_todo(&client, &id, &payload).await;
            saving.set(false);
            match list.try_update(|l| l.finish_update(&id, result)) {
                Some(Ok(())) => {
                    editing.set(None);
                    ctx.notify(Notification::success("Task updated"));
                }
                Some(Err(err)) => match err.field_errors() {
                    Some(field_errors) => errors.set(field_errors.clone()),
                    None => ctx.report_error("Could not update task", &err),
                },
                None => {}
            }
        });
    };

    view! {
        <div class="modal-backdrop" on:click=move |_| close()>
            <form class="modal" on:click=|ev| ev.stop_propagation() on:submit=save>
                <h2>"Edit task"</h2>
                <label>"Title"</label>
                <input
                    type="text"
                    class=input_class(errors, "title")
                    prop:value=move || title.get()
                    on:input=move |ev| title.set(event_target_value(&ev))
                />
                <FieldMessage errors=errors field="title" />

                <label>"Description"</label>
                <textarea
                    class="input"
                    prop:value=move || description.get()
                    on:input=move |ev| description.set(event_target_value(&ev))
                ></textarea>

                <label>"Priority"</label>
                <select
                    class="input"
                    prop:value=move || priority.get().as_str()
                    on:change=move |ev| priority.set(Priority::parse(&event_target_value(&ev)).unwrap_or_default())
                >
                    {Priority::ALL.iter().map(|p| view! {
                        <option value=p.as_str()>{p.label()}</option>
                    }).collect_view()}
                </select>

                <label>"Due date"</label>
                <input
                    type="datetime-local"
                    class=input_class(errors, "due_date")
                    prop:value=move || due.get()
                    on:input=move |ev| due.set(event_target_value(&ev))
                />
                <FieldMessage errors=errors field="due_date" />

                <div class="modal-actions">
                    <button type="button" class="secondary-btn" on:click=move |_| close()>"Cancel"</button>
                    <button type="submit" class="primary-btn" disabled=move || saving.get()>
                        {move || if saving.get() { "Saving…" } else { "Save" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
