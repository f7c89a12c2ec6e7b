//! Browser Persistence
//!
//! `localStorage` for the access token and redirect target, cookies for
//! display preferences. Unavailable storage reads as empty.

use chrono::{DateTime, Duration, Utc};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use wasm_bindgen::JsCast;

use crate::config::{ACCESS_TOKEN_KEY, NEXT_PATH_KEY, PREFERENCE_COOKIE_DAYS};

/// Characters `encodeURIComponent` leaves alone
pub const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

pub fn decode_component(value: &str) -> Option<String> {
    percent_decode_str(value).decode_utf8().ok().map(|v| v.into_owned())
}

// ========================
// localStorage
// ========================

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn get_item(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

fn set_item(key: &str, value: &str) {
    match local_storage() {
        Some(storage) => {
            if storage.set_item(key, value).is_err() {
                tracing::warn!("could not persist {}", key);
            }
        }
        None => tracing::warn!("localStorage unavailable, {} not persisted", key),
    }
}

fn remove_item(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

pub fn load_token() -> Option<String> {
    get_item(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty())
}

pub fn save_token(token: &str) {
    set_item(ACCESS_TOKEN_KEY, token);
}

pub fn clear_token() {
    remove_item(ACCESS_TOKEN_KEY);
}

pub fn load_next_path() -> Option<String> {
    get_item(NEXT_PATH_KEY).filter(|p| !p.is_empty())
}

pub fn save_next_path(path: &str) {
    set_item(NEXT_PATH_KEY, path);
}

pub fn clear_next_path() {
    remove_item(NEXT_PATH_KEY);
}

// ========================
// Cookies
// ========================

fn html_document() -> Option<web_sys::HtmlDocument> {
    web_sys::window()?.document()?.dyn_into::<web_sys::HtmlDocument>().ok()
}

/// Raw `document.cookie`
pub fn read_cookies() -> String {
    html_document().and_then(|doc| doc.cookie().ok()).unwrap_or_default()
}

/// Find and decode one cookie in a `document.cookie` string
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .and_then(|(_, value)| decode_component(value))
        .filter(|value| !value.is_empty())
}

pub fn preference_cookie(name: &str, value: &str, expires: DateTime<Utc>) -> String {
    format!(
        "{}={}; path=/; expires={}",
        name,
        encode_component(value),
        expires.format("%a, %d %b %Y %H:%M:%S GMT")
    )
}

pub fn write_preference_cookie(name: &str, value: &str) {
    let cookie = preference_cookie(name, value, Utc::now() + Duration::days(PREFERENCE_COOKIE_DAYS));
    match html_document() {
        Some(doc) => {
            if doc.set_cookie(&cookie).is_err() {
                tracing::warn!("could not write cookie {}", name);
            }
        }
        None => tracing::warn!("document unavailable, cookie {} not written", name),
    }
}
