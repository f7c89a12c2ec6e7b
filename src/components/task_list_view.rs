//! Task List View Component
//!
//! Renders the visible tasks with drag-and-drop reordering.
//! Uses leptos-dragdrop with a trailing drop zone after the last row.

use leptos::prelude::*;
use leptos_dragdrop::*;

use crate::components::{TaskActions, TaskRow};
use crate::models::Task;

#[component]
pub fn TaskListView(
    #[prop(into)] tasks: Signal<Vec<Task>>,
    #[prop(into)] can_reorder: Signal<bool>,
    actions: TaskActions,
    /// (dragged task id, where it was dropped)
    on_reorder: Callback<(String, DropTarget<String>)>,
) -> impl IntoView {
    let dnd = create_dnd_signals::<String>();

    // Indices are resolved by the controller over every loaded task
    bind_global_mouseup(dnd, move |dragged, target| on_reorder.run((dragged, target)));

    let on_end_mouseenter = make_on_end_mouseenter(dnd);
    let on_end_mouseleave = make_on_mouseleave(dnd);
    let end_class = move || {
        if dnd.drop_target_read.get() == Some(DropTarget::End) { "drop-zone-end active" } else { "drop-zone-end" }
    };

    view! {
        <div class="task-list" class:reorderable=move || can_reorder.get()>
            <For
                each=move || tasks.get()
                key=|task| {
                    // Every field a row renders, so edits re-render the row
                    (
                        task.id.clone(),
                        task.title.clone(),
                        task.description.clone(),
                        task.completed,
                        task.due_date,
                        task.order,
                        task.priority,
                    )
                }
                children=move |task| {
                    let id = task.id.clone();
                    let on_mousedown = make_on_mousedown(dnd, id.clone(), move || can_reorder.get_untracked());
                    let on_mouseenter = make_on_item_mouseenter(dnd, id.clone());
                    let on_mouseleave = make_on_mouseleave(dnd);

                    let dragging_id = id.clone();
                    let is_dragging = move || dnd.dragging_id_read.with(|d| d.as_deref() == Some(dragging_id.as_str()));
                    let target_id = id.clone();
                    let is_drop_target = move || {
                        dnd.drop_target_read.with(|t| matches!(t, Some(DropTarget::Item(tid)) if *tid == target_id))
                    };
                    let wrapper_class = move || {
                        let mut c = String::from("task-row-wrapper");
                        if is_dragging() { c.push_str(" dragging"); }
                        if is_drop_target() { c.push_str(" drop-target"); }
                        c
                    };

                    view! {
                        <div
                            class=wrapper_class
                            on:mousedown=on_mousedown
                            on:mouseenter=on_mouseenter
                            on:mouseleave=on_mouseleave
                        >
                            <TaskRow task=task actions=actions />
                        </div>
                    }
                }
            />
            <Show when=move || dnd.dragging_id_read.with(|d| d.is_some())>
                <div class=end_class on:mouseenter=on_end_mouseenter on:mouseleave=on_end_mouseleave></div>
            </Show>
        </div>
    }
}
