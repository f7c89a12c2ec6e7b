//! Client-side Routing
//!
//! Path <-> `Route` mapping, access guards, and History API navigation.

use crate::models::Priority;
use crate::storage::{decode_component, encode_component};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsTab {
    Profile,
    Security,
    Time,
}

impl SettingsTab {
    pub const ALL: [SettingsTab; 3] = [SettingsTab::Profile, SettingsTab::Security, SettingsTab::Time];

    pub fn label(self) -> &'static str {
        match self {
            SettingsTab::Profile => "Profile",
            SettingsTab::Security => "Security",
            SettingsTab::Time => "Time & Date",
        }
    }

    fn segment(self) -> &'static str {
        match self {
            SettingsTab::Profile => "profile",
            SettingsTab::Security => "security",
            SettingsTab::Time => "time",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Index,
    Login { next: Option<String> },
    Register,
    Dashboard { priority: Option<Priority> },
    Today { priority: Option<Priority> },
    /// Bare `/settings`, forwarded to the profile tab
    Settings,
    SettingsTab(SettingsTab),
    NotFound,
}

/// Value of `name` in a query string (with or without the leading `?`)
pub fn query_param(query: &str, name: &str) -> Option<String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(key, _)| *key == name)
        .and_then(|(_, value)| decode_component(&value.replace('+', " ")))
        .filter(|value| !value.is_empty())
}

impl Route {
    /// Parse `pathname` + `search` (as in `location`)
    pub fn parse(location: &str) -> Self {
        let (path, query) = location.split_once('?').unwrap_or((location, ""));
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        let priority = || query_param(query, "priority").as_deref().and_then(Priority::parse);

        match path {
            "/" => Route::Index,
            "/login" => Route::Login { next: query_param(query, "next") },
            "/register" => Route::Register,
            "/dashboard" => Route::Dashboard { priority: priority() },
            "/today" => Route::Today { priority: priority() },
            "/settings" => Route::Settings,
            "/settings/profile" => Route::SettingsTab(SettingsTab::Profile),
            "/settings/security" => Route::SettingsTab(SettingsTab::Security),
            "/settings/time" => Route::SettingsTab(SettingsTab::Time),
            _ => Route::NotFound,
        }
    }

    pub fn to_path(&self) -> String {
        let with_priority = |base: &str, priority: &Option<Priority>| match priority {
            Some(p) => format!("{}?priority={}", base, p.as_str()),
            None => base.to_string(),
        };
        match self {
            Route::Index => "/".to_string(),
            Route::Login { next: Some(next) } => format!("/login?next={}", encode_component(next)),
            Route::Login { next: None } => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Dashboard { priority } => with_priority("/dashboard", priority),
            Route::Today { priority } => with_priority("/today", priority),
            Route::Settings => "/settings".to_string(),
            Route::SettingsTab(tab) => format!("/settings/{}", tab.segment()),
            Route::NotFound => "/".to_string(),
        }
    }

    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            Route::Dashboard { .. } | Route::Today { .. } | Route::Settings | Route::SettingsTab(_)
        )
    }

    fn is_guest_only(&self) -> bool {
        matches!(self, Route::Login { .. } | Route::Register)
    }
}

/// What the router should do with a location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    Redirect {
        to: String,
        /// Path to remember as the post-login target
        remember: Option<String>,
    },
}

/// Apply the access guards
pub fn resolve(location: &str, authenticated: bool) -> Resolution {
    let route = Route::parse(location);
    let redirect = |to: Route| Resolution::Redirect { to: to.to_path(), remember: None };

    match route {
        route if route.is_protected() && !authenticated => Resolution::Redirect {
            to: Route::Login { next: Some(location.to_string()) }.to_path(),
            remember: Some(location.to_string()),
        },
        route if route.is_guest_only() && authenticated => redirect(Route::Dashboard { priority: None }),
        Route::Settings => redirect(Route::SettingsTab(SettingsTab::Profile)),
        Route::NotFound if authenticated => redirect(Route::Dashboard { priority: None }),
        Route::NotFound => redirect(Route::Index),
        route => Resolution::Render(route),
    }
}

// ========================
// History API
// ========================

/// `pathname + search` of the current page
pub fn current_location() -> String {
    let Some(location) = web_sys::window().map(|w| w.location()) else {
        return "/".to_string();
    };
    let path = location.pathname().unwrap_or_else(|_| "/".to_string());
    let search = location.search().unwrap_or_default();
    format!("{}{}", path, search)
}

fn history() -> Option<web_sys::History> {
    web_sys::window()?.history().ok()
}

/// `history.pushState`; false if the browser refused
pub fn push_location(path: &str) -> bool {
    history()
        .map(|h| h.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path)).is_ok())
        .unwrap_or(false)
}

/// `history.replaceState`, used for redirects
pub fn replace_location(path: &str) -> bool {
    history()
        .map(|h| h.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path)).is_ok())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routes() {
        assert_eq!(Route::parse("/"), Route::Index);
        assert_eq!(Route::parse(""), Route::Index);
        assert_eq!(Route::parse("/dashboard/"), Route::Dashboard { priority: None });
        assert_eq!(Route::parse("/today?priority=high"), Route::Today { priority: Some(Priority::High) });
        assert_eq!(Route::parse("/dashboard?priority=urgent"), Route::Dashboard { priority: None });
        assert_eq!(Route::parse("/settings/time"), Route::SettingsTab(SettingsTab::Time));
        assert_eq!(Route::parse("/nope"), Route::NotFound);
        assert_eq!(
            Route::parse("/login?next=%2Ftoday%3Fpriority%3Dlow"),
            Route::Login { next: Some("/today?priority=low".to_string()) }
        );
    }

    #[test]
    fn test_to_path_round_trips() {
        let routes = [
            Route::Index,
            Route::Register,
            Route::Dashboard { priority: Some(Priority::Low) },
            Route::Today { priority: None },
            Route::SettingsTab(SettingsTab::Security),
            Route::Login { next: Some("/settings/profile".to_string()) },
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.to_path()), route);
        }
    }

    #[test]
    fn test_protected_route_redirects_anonymous_user() {
        assert_eq!(
            resolve("/today?priority=high", false),
            Resolution::Redirect {
                to: "/login?next=%2Ftoday%3Fpriority%3Dhigh".to_string(),
                remember: Some("/today?priority=high".to_string()),
            }
        );
        assert_eq!(resolve("/today", true), Resolution::Render(Route::Today { priority: None }));
    }

    #[test]
    fn test_guest_pages_redirect_signed_in_user() {
        let to_dashboard = Resolution::Redirect { to: "/dashboard".to_string(), remember: None };
        assert_eq!(resolve("/login", true), to_dashboard);
        assert_eq!(resolve("/register", true), to_dashboard);
        assert_eq!(resolve("/login", false), Resolution::Render(Route::Login { next: None }));
    }

    #[test]
    fn test_unknown_and_bare_settings() {
        assert_eq!(resolve("/missing", true), Resolution::Redirect { to: "/dashboard".to_string(), remember: None });
        assert_eq!(resolve("/missing", false), Resolution::Redirect { to: "/".to_string(), remember: None });
        assert_eq!(
            resolve("/settings", true),
            Resolution::Redirect { to: "/settings/profile".to_string(), remember: None }
        );
        assert_eq!(resolve("/", true), Resolution::Render(Route::Index));
    }

    #[test]
    fn test_query_param_decoding() {
        assert_eq!(query_param("?search=buy+milk&x=1", "search").as_deref(), Some("buy milk"));
        assert_eq!(query_param("flag", "flag"), None);
        assert_eq!(query_param("", "next"), None);
    }
}
