//! Notification Stack Component
//!
//! Renders the toast queue from the global store.

use leptos::prelude::*;

use crate::store::{store_dismiss, use_app_store, AppStateStoreFields};

#[component]
pub fn NotificationStack() -> impl IntoView {
    let store = use_app_store();
    let items = move || store.notifications().with(|queue| queue.items().to_vec());

    view! {
        <div class="notification-stack">
            <For
                each=items
                key=|n| n.id
                children=move |n| {
                    let id = n.id;
                    view! {
                        <div class=n.kind.class() role="status">
                            <div class="notification-body">
                                <p class="notification-title">{n.title.clone()}</p>
                                {n.description.clone().map(|d| view! { <p class="notification-description">{d}</p> })}
                            </div>
                            <button
                                class="notification-close"
                                title="Dismiss"
                                on:click=move |_| store_dismiss(&store, id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
