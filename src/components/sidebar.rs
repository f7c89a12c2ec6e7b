//! Sidebar Component
//!
//! Navigation for signed-in pages: task views, priority shortcuts,
//! settings and sign-out.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::models::Priority;
use crate::routes::{Route, SettingsTab};
use crate::store::AppStateStoreFields;

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store();

    let route = move || Route::parse(&store.location().get());
    let nav_class = move |active: fn(&Route) -> bool| {
        move || if active(&route()) { "nav-btn active" } else { "nav-btn" }
    };
    let user_name = move || {
        store
            .session()
            .with(|s| s.user().map(|u| u.name.clone()))
            .unwrap_or_else(|| "…".to_string())
    };

    view! {
        <aside class="sidebar">
            <div class="sidebar-brand">"Tasklane"</div>
            <nav class="sidebar-nav">
                <button
                    class=nav_class(|r| matches!(r, Route::Dashboard { .. }))
                    on:click=move |_| ctx.navigate(&Route::Dashboard { priority: None }.to_path())
                >
                    "All tasks"
                </button>
                <div class="priority-links">
                    {[Priority::High, Priority::Medium, Priority::Low].into_iter().map(|priority| {
                        let is_active = move || route() == Route::Dashboard { priority: Some(priority) };
                        view! {
                            <button
                                class=move || if is_active() { "nav-sub-btn active" } else { "nav-sub-btn" }
                                on:click=move |_| ctx.navigate(&Route::Dashboard { priority: Some(priority) }.to_path())
                            >
                                <span class=format!("priority-dot {}", priority.as_str())></span>
                                {format!("{} priority", priority.label())}
                            </button>
                        }
                    }).collect_view()}
                </div>
                <button
                    class=nav_class(|r| matches!(r, Route::Today { .. }))
                    on:click=move |_| ctx.navigate(&Route::Today { priority: None }.to_path())
                >
                    "Today"
                </button>
                <button
                    class=nav_class(|r| matches!(r, Route::Settings | Route::SettingsTab(_)))
                    on:click=move |_| ctx.navigate(&Route::SettingsTab(SettingsTab::Profile).to_path())
                >
                    "Settings"
                </button>
            </nav>
            <div class="sidebar-footer">
                <span class="sidebar-user">{user_name}</span>
                <button class="link-btn" on:click=move |_| ctx.navigate(&Route::Index.to_path())>
                    "Back to Home"
                </button>
                <button class="link-btn" on:click=move |_| ctx.logout()>
                    "Sign Out"
                </button>
            </div>
        </aside>
    }
}
