//! Leptos DragDrop Utilities
//!
//! Drag-and-drop reordering for flat Leptos lists using mouse events.
//! Uses movement threshold to distinguish click from drag.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Drop target types
#[derive(Clone, Debug, PartialEq)]
pub enum DropTarget<K> {
    /// Drop on a row (take its position)
    Item(K),
    /// Drop on the zone after the last row
    End,
}

/// DnD state signals, keyed by the row identifier type
pub struct DndSignals<K: Send + Sync + 'static> {
    pub dragging_id_read: ReadSignal<Option<K>>,
    pub dragging_id_write: WriteSignal<Option<K>>,
    pub drop_target_read: ReadSignal<Option<DropTarget<K>>>,
    pub drop_target_write: WriteSignal<Option<DropTarget<K>>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending row key (mousedown but not yet dragging)
    pub pending_id_read: ReadSignal<Option<K>>,
    pub pending_id_write: WriteSignal<Option<K>>,
    /// Start position for movement detection
    pub start_read: ReadSignal<(i32, i32)>,
    pub start_write: WriteSignal<(i32, i32)>,
}

impl<K: Send + Sync + 'static> Clone for DndSignals<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: Send + Sync + 'static> Copy for DndSignals<K> {}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

/// How long `drag_just_ended` stays set so the trailing click can be ignored
const DRAG_END_GRACE_MS: i32 = 100;

pub fn create_dnd_signals<K: Clone + Send + Sync + 'static>() -> DndSignals<K> {
    let (dragging_id_read, dragging_id_write) = signal(None::<K>);
    let (drop_target_read, drop_target_write) = signal(None::<DropTarget<K>>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_id_read, pending_id_write) = signal(None::<K>);
    let (start_read, start_write) = signal((0i32, 0i32));
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        drop_target_read,
        drop_target_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_id_read,
        pending_id_write,
        start_read,
        start_write,
    }
}

/// Whether a pointer moved far enough from `start` to count as a drag
pub fn exceeds_threshold(start: (i32, i32), current: (i32, i32)) -> bool {
    (current.0 - start.0).abs() > DRAG_THRESHOLD_PX || (current.1 - start.1).abs() > DRAG_THRESHOLD_PX
}

/// Resolve a drop target into the destination index within `keys`.
///
/// Returns `None` when the dragged row or the target row is not in the list.
pub fn target_index<K: PartialEq>(keys: &[K], dragged: &K, target: &DropTarget<K>) -> Option<usize> {
    if !keys.iter().any(|k| k == dragged) {
        return None;
    }
    match target {
        DropTarget::Item(key) => keys.iter().position(|k| k == key),
        DropTarget::End => keys.len().checked_sub(1),
    }
}

/// End drag operation
pub fn end_drag<K: Send + Sync + 'static>(dnd: &DndSignals<K>) {
    dnd.dragging_id_write.try_set(None);
    dnd.drop_target_write.try_set(None);
    dnd.pending_id_write.try_set(None);
    dnd.drag_just_ended_write.try_set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.try_set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), DRAG_END_GRACE_MS);
        cb.forget();
    }
}

/// Create mousedown handler for draggable rows.
/// Records pending drag with start position; `enabled` gates it per render.
pub fn make_on_mousedown<K>(
    dnd: DndSignals<K>,
    key: K,
    enabled: impl Fn() -> bool + Clone + 'static,
) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    K: Clone + Send + Sync + 'static,
{
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 || !enabled() {
            return;
        }
        // Controls inside the row keep their own click behaviour
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlSelectElement>().is_some() { return; }
        }
        dnd.pending_id_write.set(Some(key.clone()));
        dnd.start_write.set((ev.client_x(), ev.client_y()));
    }
}

/// Create mouseenter handler for rows
pub fn make_on_item_mouseenter<K>(dnd: DndSignals<K>, key: K) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    K: Clone + PartialEq + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if let Some(dragging) = dnd.dragging_id_read.get_untracked() {
            // Don't allow dropping on self
            if dragging != key {
                dnd.drop_target_write.set(Some(DropTarget::Item(key.clone())));
            }
        }
    }
}

/// Create mouseenter handler for the trailing drop zone
pub fn make_on_end_mouseenter<K>(dnd: DndSignals<K>) -> impl Fn(web_sys::MouseEvent) + Copy + 'static
where
    K: Clone + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.with_untracked(|d| d.is_some()) {
            dnd.drop_target_write.set(Some(DropTarget::End));
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave<K>(dnd: DndSignals<K>) -> impl Fn(web_sys::MouseEvent) + Copy + 'static
where
    K: Clone + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.with_untracked(|d| d.is_some()) {
            dnd.drop_target_write.set(None);
        }
    }
}

/// Bind document mousemove handler - starts drag if moved enough
fn bind_global_mousemove<K>(dnd: DndSignals<K>)
where
    K: Clone + Send + Sync + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        // Signals are gone once the owning view is unmounted
        let Some(pending) = dnd.pending_id_read.try_get_untracked().flatten() else { return };
        if dnd.dragging_id_read.try_with_untracked(|d| d.is_some()).unwrap_or(true) {
            return;
        }
        let start = dnd.start_read.get_untracked();
        if exceeds_threshold(start, (ev.client_x(), ev.client_y())) {
            dnd.dragging_id_write.set(Some(pending));
        }
    });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
    }
    on_mousemove.forget();
}

/// Bind global mouseup handler for drop detection
pub fn bind_global_mouseup<K, F>(dnd: DndSignals<K>, on_drop: F)
where
    K: Clone + Send + Sync + 'static,
    F: Fn(K, DropTarget<K>) + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let Some(dragging_id) = dnd.dragging_id_read.try_get_untracked() else { return };
        let drop_target = dnd.drop_target_read.get_untracked();

        end_drag(&dnd);
        // Only an actual drag (not a click) with a hovered target drops
        if let (Some(dragged), Some(target)) = (dragging_id, drop_target) {
            on_drop(dragged, target);
        }
    });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
    }
    on_mouseup.forget();

    bind_global_mousemove(dnd);
}
