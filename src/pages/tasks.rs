//! Task Pages
//!
//! Dashboard and today views. Both drive a page-local `TaskList`: user
//! actions run the controller's begin step, the gateway call runs in a
//! spawned task, and its result goes through the matching finish step.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::DropTarget;

use crate::api;
use crate::components::{EditTaskModal, FilterBar, NewTaskForm, TaskActions, TaskListView, UndoToast};
use crate::config::{PAGE_SIZE, SCROLL_TRIGGER_PX, UNDO_WINDOW_MS};
use crate::context::{use_app_context, AppContext};
use crate::error::ApiError;
use crate::models::{Priority, Task};
use crate::notifications::Notification;
use crate::task_list::{CompletionFilter, Criteria, ListView, PageOutcome, PageRequest, TaskList, ToggleTicket};

/// Toast plus inline banner for a failed mutation
fn report_failure(ctx: AppContext, list: RwSignal<TaskList>, title: &str, err: &ApiError) {
    ctx.report_error(title, err);
    if *err != ApiError::SessionExpired {
        list.update(|l| l.set_banner(err.user_message(title)));
    }
}

fn fetch_page(ctx: AppContext, list: RwSignal<TaskList>, request: PageRequest, append: bool) {
    let client = ctx.client();
    spawn_local(async move {
        let result = match request.view {
            ListView::All => api::list_todos(&client, &request.query).await,
            ListView::Today => api::list_today_todos(&client, &request.query).await,
        };
        let outcome = list.try_update(|l| {
            if append {
                l.finish_load_more(&request, result)
            } else {
                l.finish_load(&request, result)
            }
        });
        if let Some(PageOutcome::Failed(err)) = outcome {
            ctx.report_error("Could not load tasks", &err);
        }
    });
}

fn load_more(ctx: AppContext, list: RwSignal<TaskList>) {
    if let Some(request) = list.try_update(|l| l.begin_load_more()).flatten() {
        tracing::debug!("loading page {}", request.page());
        fetch_page(ctx, list, request, true);
    }
}

fn send_toggle(ctx: AppContext, list: RwSignal<TaskList>, ticket: ToggleTicket) {
    if let Some(token) = ticket.undo_token {
        spawn_local(async move {
            TimeoutFuture::new(UNDO_WINDOW_MS).await;
            list.try_update(|l| l.expire_undo(token));
        });
    }
    let client = ctx.client();
    spawn_local(async move {
        let result = api::set_todo_completed(&client, &ticket.id, ticket.completed).await;
        if let Some(Err(err)) = list.try_update(|l| l.finish_toggle(&ticket, result)) {
            report_failure(ctx, list, "Could not update task", &err);
        }
    });
}

fn near_page_bottom() -> bool {
    let Some(window) = web_sys::window() else { return false };
    let scrolled = window.scroll_y().unwrap_or(0.0);
    let viewport = window.inner_height().ok().and_then(|h| h.as_f64()).unwrap_or(0.0);
    let height = window
        .document()
        .and_then(|d| d.document_element())
        .map(|e| e.scroll_height() as f64)
        .unwrap_or(0.0);
    scrolled + viewport >= height - SCROLL_TRIGGER_PX
}

fn heading(kind: ListView, completion: CompletionFilter, priority: Option<Priority>) -> String {
    let base = match kind {
        ListView::All => completion.title().to_string(),
        ListView::Today => "Today".to_string(),
    };
    match priority {
        Some(p) => format!("{} · {} priority", base, p.label()),
        None => base,
    }
}

#[component]
pub fn TasksPage(kind: ListView, priority: Option<Priority>) -> impl IntoView {
    let ctx = use_app_context();

    let list = RwSignal::new(TaskList::new(kind, PAGE_SIZE));
    let search = RwSignal::new(String::new());
    let completion = RwSignal::new(CompletionFilter::All);
    let editing = RwSignal::new(None::<Task>);

    // Criteria changes reload page 1 (or filter locally in the today view)
    Effect::new(move |_| {
        let criteria = Criteria {
            completion: completion.get(),
            search: search.get(),
            priority,
        };
        if let Some(request) = list.try_update(|l| l.set_criteria(criteria)).flatten() {
            fetch_page(ctx, list, request, false);
        }
    });

    let scroll_handle = window_event_listener(leptos::ev::scroll, move |_| {
        if near_page_bottom() {
            load_more(ctx, list);
        }
    });
    on_cleanup(move || scroll_handle.remove());

    let actions = TaskActions {
        toggle: Callback::new(move |id: String| {
            if let Some(ticket) = list.try_update(|l| l.begin_toggle(&id)).flatten() {
                send_toggle(ctx, list, ticket);
            }
        }),
        edit: Callback::new(move |id: String| {
            editing.set(list.with_untracked(|l| l.find(&id).cloned()));
        }),
        delete: Callback::new(move |id: String| {
            let Some(ticket) = list.try_update(|l| l.begin_delete(&id)).flatten() else { return };
            let client = ctx.client();
            spawn_local(async move {
                let result = api::delete_todo(&client, &ticket.id).await;
                match list.try_update(|l| l.finish_delete(ticket, result)) {
                    Some(Ok(())) => ctx.notify(Notification::success("Task deleted")),
                    Some(Err(err)) => report_failure(ctx, list, "Could not delete task", &err),
                    None => {}
                }
            });
        }),
        cycle_priority: Callback::new(move |id: String| {
            list.update(|l| l.cycle_priority(&id));
        }),
    };

    let on_reorder = Callback::new(move |(id, target): (String, DropTarget<String>)| {
        let Some(ticket) = list.try_update(|l| l.begin_drop(&id, &target)).flatten() else {
            tracing::debug!("drop of {} ignored", id);
            return;
        };
        let client = ctx.client();
        spawn_local(async move {
            let result = api::update_todo_order(&client, &ticket.id, ticket.order).await;
            match list.try_update(|l| l.finish_reorder(&ticket, result)) {
                Some(Ok(())) => ctx.notify(Notification::success("Task reordered")),
                Some(Err(err)) => report_failure(ctx, list, "Could not reorder tasks", &err),
                None => {}
            }
        });
    });

    let on_undo = Callback::new(move |_: ()| {
        if let Some(ticket) = list.try_update(|l| l.undo()).flatten() {
            send_toggle(ctx, list, ticket);
        }
    });

    let visible = Signal::derive(move || list.with(|l| l.visible()));
    let can_reorder = Signal::derive(move || list.with(|l| l.can_reorder()));
    let loading = move || list.with(|l| l.is_loading());
    let title = move || heading(kind, completion.get(), priority);
    let remaining = move || {
        let count = list.with(|l| l.active_count());
        format!("{} task{} remaining", count, if count == 1 { "" } else { "s" })
    };

    view! {
        <div class="tasks-page">
            <header class="page-header">
                <h1>{title}</h1>
                <p class="page-subtitle">{remaining}</p>
            </header>

            {move || list.with(|l| l.banner().map(str::to_string)).map(|message| view! {
                <div class="banner error">
                    <span>{message}</span>
                    <button class="link-btn" on:click=move |_| list.update(|l| l.dismiss_banner())>"Dismiss"</button>
                </div>
            })}

            // Today lists what the server considers due today; new tasks start on the dashboard
            <Show when=move || kind == ListView::All>
                <NewTaskForm list=list />
            </Show>

            <FilterBar
                list=list
                search=search
                completion={(kind == ListView::All).then_some(completion)}
            />

            // Mounted once so the drag listeners are bound once per page
            <TaskListView tasks=visible can_reorder=can_reorder actions=actions on_reorder=on_reorder />

            <Show when=move || !loading() fallback=|| view! { <p class="loading">"Loading tasks…"</p> }>
                <Show when=move || visible.with(|v| v.is_empty())>
                    <div class="empty-state">
                        <p class="empty-title">"No tasks found"</p>
                        <p class="empty-hint">
                            {move || if search.with(|s| s.trim().is_empty()) {
                                "Add a task above to get started"
                            } else {
                                "Try adjusting your search terms"
                            }}
                        </p>
                    </div>
                </Show>
            </Show>

            <div class="list-footer">
                {move || {
                    let (more, loading_more, any) = list.with(|l| (l.cursor().has_more, l.is_loading_more(), !l.tasks().is_empty()));
                    if loading_more {
                        view! { <p class="loading">"Loading more…"</p> }.into_any()
                    } else if more {
                        view! {
                            <button class="secondary-btn" on:click=move |_| load_more(ctx, list)>"Load more"</button>
                        }.into_any()
                    } else if any {
                        view! { <p class="list-end">"You've reached the end of the list"</p> }.into_any()
                    } else {
                        ().into_any()
                    }
                }}
            </div>

            <UndoToast list=list on_undo=on_undo />
            <EditTaskModal list=list editing=editing />
        </div>
    }
}
