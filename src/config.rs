//! Build-time Configuration
//!
//! Values are baked in at compile time (`TASKLANE_API_URL=... trunk build`).

/// Base URL of the REST API, without trailing slash
pub fn api_base_url() -> &'static str {
    option_env!("TASKLANE_API_URL")
        .unwrap_or("http://localhost:8000/v1")
        .trim_end_matches('/')
}

/// Log level name handed to the console logger
pub fn log_level() -> &'static str {
    option_env!("TASKLANE_LOG").unwrap_or("info")
}

/// Tasks requested per page
pub const PAGE_SIZE: u32 = 20;

/// How long a completed task can be restored with one click
pub const UNDO_WINDOW_MS: u32 = 5_000;

/// Default lifetime of a notification
pub const NOTIFICATION_MS: u32 = 5_000;

/// Remaining scroll distance that triggers the next page
pub const SCROLL_TRIGGER_PX: f64 = 300.0;

/// Lifetime of preference cookies
pub const PREFERENCE_COOKIE_DAYS: i64 = 365;

pub const TIMEZONE_COOKIE: &str = "todo_timezone";
pub const HOUR_FORMAT_COOKIE: &str = "todo_time_format";

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const NEXT_PATH_KEY: &str = "next_path";

/// Landing route after sign-in when nothing else was requested
pub const DEFAULT_AUTHENTICATED_PATH: &str = "/dashboard";
