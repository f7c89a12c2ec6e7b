//! Session Store
//!
//! Authentication state: the bearer token, the signed-in user and the
//! bookkeeping for returning to the page a user was on before being sent to
//! the login screen. Persistence (localStorage) is done by the caller.

use crate::config::DEFAULT_AUTHENTICATED_PATH;
use crate::error::ApiError;
use crate::models::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    Anonymous,
    Authenticated,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    token: Option<String>,
    user: Option<User>,
    /// Set once the initial profile fetch has been issued for this token
    profile_requested: bool,
}

impl Session {
    /// Authenticated iff a non-empty token was persisted
    pub fn from_token(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()),
            ..Self::default()
        }
    }

    pub fn status(&self) -> AuthStatus {
        if self.token.is_some() {
            AuthStatus::Authenticated
        } else {
            AuthStatus::Anonymous
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.status() == AuthStatus::Authenticated
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// anonymous -> authenticated after login or registration
    pub fn sign_in(&mut self, token: String) {
        self.token = Some(token);
        self.user = None;
        self.profile_requested = false;
    }

    /// authenticated -> anonymous
    pub fn sign_out(&mut self) {
        *self = Self::default();
    }

    /// True exactly once per signed-in session, when the profile is unknown
    pub fn take_profile_request(&mut self) -> bool {
        if !self.is_authenticated() || self.user.is_some() || self.profile_requested {
            return false;
        }
        self.profile_requested = true;
        true
    }

    pub fn set_user(&mut self, user: User) {
        if self.is_authenticated() {
            self.user = Some(user);
        }
    }
}

/// Only same-origin app paths are followed after login
fn usable_next(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.starts_with("/login")
        && !path.starts_with("/register")
}

/// Where to go after a successful login: `?next=`, then the stored path,
/// then the dashboard
pub fn login_target(query_next: Option<&str>, stored_next: Option<&str>) -> String {
    query_next
        .filter(|p| usable_next(p))
        .or(stored_next.filter(|p| usable_next(p)))
        .unwrap_or(DEFAULT_AUTHENTICATED_PATH)
        .to_string()
}

/// Whether a logout call's result ends the local session
pub fn logout_clears_session(result: &Result<(), ApiError>) -> bool {
    matches!(result, Ok(()) | Err(ApiError::SessionExpired))
}
