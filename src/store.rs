//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Holds what
//! outlives a single page: session, display preferences, toasts and the
//! current location. Task lists are page-local.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::models::User;
use crate::notifications::{Notification, NotificationQueue};
use crate::prefs::Preferences;
use crate::routes;
use crate::session::Session;
use crate::storage;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    pub session: Session,
    pub preferences: Preferences,
    pub notifications: NotificationQueue,
    /// `pathname + search` of the page being shown
    pub location: String,
}

impl AppState {
    /// Restore persisted token and preference cookies
    pub fn new() -> Self {
        Self {
            session: Session::from_token(storage::load_token()),
            preferences: Preferences::load(),
            notifications: NotificationQueue::default(),
            location: routes::current_location(),
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Show a toast and schedule its removal
pub fn store_notify(store: &AppStore, notification: Notification) {
    let duration = notification.duration_ms;
    let id = store.notifications().write().push(notification);
    if duration > 0 {
        let store = *store;
        spawn_local(async move {
            TimeoutFuture::new(duration).await;
            store_dismiss(&store, id);
        });
    }
}

pub fn store_dismiss(store: &AppStore, id: u64) {
    // The store may be gone if the app unmounted meanwhile
    if let Some(mut queue) = store.notifications().try_write() {
        queue.remove(id);
    }
}

/// Persist the token and enter the authenticated state
pub fn store_sign_in(store: &AppStore, token: String) {
    storage::save_token(&token);
    store.session().write().sign_in(token);
}

/// Drop the token and return to the anonymous state
pub fn store_sign_out(store: &AppStore) {
    storage::clear_token();
    store.session().write().sign_out();
}

pub fn store_set_user(store: &AppStore, user: User) {
    store.session().write().set_user(user);
}

pub fn store_set_preferences(store: &AppStore, preferences: Preferences) {
    store.preferences().set(preferences);
}
