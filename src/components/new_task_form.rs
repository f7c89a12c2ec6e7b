//! New Task Form Component
//!
//! Title, description, priority and due date with quick picks. Due dates
//! are checked before anything is sent.

use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{input_class, FieldMessage};
use crate::context::use_app_context;
use crate::error::FieldErrors;
use crate::models::Priority;
use crate::notifications::Notification;
use crate::task_list::{TaskDraft, TaskList};
use crate::time::{parse_due_input, quick_pick, QuickPick};

#[component]
pub fn NewTaskForm(list: RwSignal<TaskList>) -> impl IntoView {
    let ctx = use_app_context();

    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let priority = RwSignal::new(Priority::default());
    let due = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let submitting = RwSignal::new(false);

    let create_task = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let draft = TaskDraft {
            title: title.get_untracked(),
            description: description.get_untracked(),
            priority: priority.get_untracked(),
            due: parse_due_input(&due.get_untracked()),
        };
        let payload = match TaskList::prepare_create(&draft, Utc::now()) {
            Ok(payload) => payload,
            Err(field_errors) => {
                errors.set(field_errors);
                return;
            }
        };
        errors.set(FieldErrors::new());
        submitting.set(true);
        let client = ctx.client();
        spawn_local(async move {
            let result = api::create_todo(&client, &payload).await;
            submitting.set(false);
            match list.try_update(|l| l.finish_create(result)) {
                Some(Ok(())) => {
                    title.set(String::new());
                    description.set(String::new());
                    priority.set(Priority::default());
                    due.set(String::new());
                    ctx.notify(Notification::success("Task created"));
                }
                Some(Err(err)) => match err.field_errors() {
                    Some(field_errors) => errors.set(field_errors.clone()),
                    None => ctx.report_error("Could not create task", &err),
                },
                // Page left before the response arrived
                None => {}
            }
        });
    };

    view! {
        <form class="new-task-form" on:submit=create_task>
            <div class="form-row">
                <input
                    type="text"
                    class=input_class(errors, "title")
                    placeholder="What needs to be done?"
                    prop:value=move || title.get()
                    on:input=move |ev| title.set(event_target_value(&ev))
                />
                <button type="submit" class="primary-btn" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Adding…" } else { "Add" }}
                </button>
            </div>
            <FieldMessage errors=errors field="title" />

            <textarea
                class="input"
                placeholder="Description (optional)"
                prop:value=move || description.get()
                on:input=move |ev| description.set(event_target_value(&ev))
            ></textarea>

            <div class="form-row">
                <select
                    class="input"
                    prop:value=move || priority.get().as_str()
                    on:change=move |ev| priority.set(Priority::parse(&event_target_value(&ev)).unwrap_or_default())
                >
                    {Priority::ALL.iter().map(|p| view! {
                        <option value=p.as_str()>{p.label()}</option>
                    }).collect_view()}
                </select>
                <input
                    type="datetime-local"
                    class=input_class(errors, "due_date")
                    prop:value=move || due.get()
                    on:input=move |ev| due.set(event_target_value(&ev))
                />
            </div>
            <FieldMessage errors=errors field="due_date" />

            <div class="quick-picks">
                {QuickPick::ALL.iter().map(|pick| {
                    let pick = *pick;
                    view! {
                        <button type="button" class="chip-btn" on:click=move |_| due.set(quick_pick(pick))>
                            {pick.label()}
                        </button>
                    }
                }).collect_view()}
                <Show when=move || !due.with(|d| d.is_empty())>
                    <button type="button" class="chip-btn" on:click=move |_| due.set(String::new())>
                        "Clear"
                    </button>
                </Show>
            </div>
        </form>
    }
}
