//! Tasklane Frontend App
//!
//! Root component: provides the store and context, applies route guards
//! and renders the page for the current location.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{NotificationStack, Sidebar};
use crate::context::AppContext;
use crate::pages::{IndexPage, LoginPage, RegisterPage, SettingsPage, TasksPage};
use crate::routes::{resolve, Resolution, Route};
use crate::storage;
use crate::store::{AppState, AppStateStoreFields};
use crate::task_list::ListView;

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::new());
    provide_context(store);
    let ctx = AppContext::new(store);
    provide_context(ctx);

    // Back/forward buttons
    let popstate = window_event_listener(leptos::ev::popstate, move |_| ctx.sync_location());
    on_cleanup(move || popstate.remove());

    // Initial profile load, once per signed-in session
    Effect::new(move |_| {
        if store.session().with(|s| s.is_authenticated()) {
            ctx.load_profile_once();
        }
    });

    // Guards run before anything renders
    let resolution = Memo::new(move |_| {
        let location = store.location().get();
        let authenticated = store.session().with(|s| s.is_authenticated());
        resolve(&location, authenticated)
    });

    Effect::new(move |_| {
        if let Resolution::Redirect { to, remember } = resolution.get() {
            if let Some(path) = remember {
                storage::save_next_path(&path);
            }
            tracing::debug!("redirecting to {}", to);
            ctx.redirect(&to);
        }
    });

    let page = move || match resolution.get() {
        Resolution::Render(route) => render_route(route),
        Resolution::Redirect { .. } => ().into_any(),
    };

    view! {
        {page}
        <NotificationStack />
    }
}

fn render_route(route: Route) -> AnyView {
    let signed_in = |content: AnyView| {
        view! {
            <div class="app-layout">
                <Sidebar />
                <main class="main-content">{content}</main>
            </div>
        }
        .into_any()
    };

    match route {
        Route::Index => view! { <IndexPage /> }.into_any(),
        Route::Login { next } => view! { <LoginPage next=next /> }.into_any(),
        Route::Register => view! { <RegisterPage /> }.into_any(),
        Route::Dashboard { priority } => signed_in(view! { <TasksPage kind=ListView::All priority=priority /> }.into_any()),
        Route::Today { priority } => signed_in(view! { <TasksPage kind=ListView::Today priority=priority /> }.into_any()),
        Route::SettingsTab(tab) => signed_in(view! { <SettingsPage tab=tab /> }.into_any()),
        // Both are redirected by the guards
        Route::Settings | Route::NotFound => ().into_any(),
    }
}
