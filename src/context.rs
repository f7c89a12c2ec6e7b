//! Application Context
//!
//! Session transitions and navigation shared by every page, provided via
//! the Leptos Context API.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiClient};
use crate::error::ApiError;
use crate::notifications::Notification;
use crate::routes::{self, Route};
use crate::session::{login_target, logout_clears_session};
use crate::storage;
use crate::store::{store_notify, store_set_user, store_sign_in, store_sign_out, AppStateStoreFields, AppStore};

/// App-wide handle provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    store: AppStore,
}

impl AppContext {
    pub fn new(store: AppStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> AppStore {
        self.store
    }

    /// Client carrying the current bearer token
    pub fn client(&self) -> ApiClient {
        let token = self.store.session().with_untracked(|s| s.token().map(str::to_string));
        ApiClient::new(token)
    }

    // ========================
    // Navigation
    // ========================

    /// Push a new history entry and render it
    pub fn navigate(&self, path: &str) {
        if !routes::push_location(path) {
            tracing::warn!("pushState refused for {}", path);
        }
        self.store.location().set(path.to_string());
    }

    /// Replace the current history entry (redirects)
    pub fn redirect(&self, path: &str) {
        if !routes::replace_location(path) {
            tracing::warn!("replaceState refused for {}", path);
        }
        self.store.location().set(path.to_string());
    }

    /// Browser back/forward
    pub fn sync_location(&self) {
        self.store.location().set(routes::current_location());
    }

    // ========================
    // Notifications
    // ========================

    pub fn notify(&self, notification: Notification) {
        store_notify(&self.store, notification);
    }

    /// Toast for a failed call; an expired session signs the user out instead
    pub fn report_error(&self, title: &str, err: &ApiError) {
        if *err == ApiError::SessionExpired {
            self.expire_session();
            return;
        }
        tracing::warn!("{}: {}", title, err);
        self.notify(Notification::error(title).with_description(err.user_message("Please check your connection and try again.")));
    }

    // ========================
    // Session transitions
    // ========================

    /// Enter the authenticated state and go to the post-login target
    pub fn complete_login(&self, token: String, next_from_query: Option<String>) {
        store_sign_in(&self.store, token);
        let target = login_target(next_from_query.as_deref(), storage::load_next_path().as_deref());
        storage::clear_next_path();
        tracing::info!("signed in, continuing to {}", target);
        self.redirect(&target);
    }

    /// The backend no longer accepts the token: remember where the user was
    /// and send them to the login page
    pub fn expire_session(&self) {
        if !self.store.session().with_untracked(|s| s.is_authenticated()) {
            return;
        }
        let here = self.store.location().get_untracked();
        tracing::info!("session expired at {}", here);
        storage::save_next_path(&here);
        store_sign_out(&self.store);
        self.redirect(&Route::Login { next: Some(here) }.to_path());
        self.notify(Notification::warning("Session expired").with_description("Please sign in again.").sticky());
    }

    /// Explicit logout; a failed request keeps the session
    pub fn logout(&self) {
        let ctx = *self;
        let client = self.client();
        spawn_local(async move {
            let result = api::logout(&client).await;
            if logout_clears_session(&result) {
                // Signing back in returns to this page
                let here = ctx.store.location().get_untracked();
                storage::save_next_path(&here);
                store_sign_out(&ctx.store);
                ctx.redirect(&Route::Login { next: None }.to_path());
                ctx.notify(Notification::info("Signed out"));
            } else if let Err(err) = result {
                ctx.report_error("Could not sign out", &err);
            }
        });
    }

    /// Fetch the profile once per signed-in session
    pub fn load_profile_once(&self) {
        let should_load = self.store.session().try_update(|s| s.take_profile_request()).unwrap_or(false);
        if !should_load {
            return;
        }
        let ctx = *self;
        let client = self.client();
        spawn_local(async move {
            match api::current_user(&client).await {
                Ok(user) => store_set_user(&ctx.store, user),
                Err(err) => ctx.report_error("Could not load your profile", &err),
            }
        });
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
