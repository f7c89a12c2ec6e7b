//! Tasklane Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod error;
mod models;
mod notifications;
mod pages;
mod prefs;
mod routes;
mod session;
mod settings;
mod storage;
mod store;
mod task_list;
mod time;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_logger::init(config::log_level()) {
        web_sys::console::error_1(&format!("tracing subscriber already installed: {}", err).into());
    }
    tracing::info!("starting tasklane-ui against {}", config::api_base_url());
    mount_to_body(App);
}
