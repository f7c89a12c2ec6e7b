//! Display Preferences
//!
//! Timezone and hour format, persisted in cookies for a year.

use wasm_bindgen::JsValue;

use crate::config::{HOUR_FORMAT_COOKIE, TIMEZONE_COOKIE};
use crate::error::FieldErrors;
use crate::storage;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HourFormat {
    H12,
    #[default]
    H24,
}

impl HourFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            HourFormat::H12 => "12",
            HourFormat::H24 => "24",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "12" => Some(HourFormat::H12),
            "24" => Some(HourFormat::H24),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
    /// IANA zone name, e.g. `Europe/Lisbon`
    pub timezone: String,
    pub hour_format: HourFormat,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            hour_format: HourFormat::default(),
        }
    }
}

/// Zones offered in the settings dropdown besides the current one
pub const COMMON_TIMEZONES: &[&str] = &[
    "UTC",
    "Europe/Lisbon",
    "Europe/London",
    "Europe/Berlin",
    "America/Sao_Paulo",
    "America/New_York",
    "America/Los_Angeles",
    "America/Chicago",
    "Asia/Tokyo",
    "Asia/Shanghai",
    "Asia/Singapore",
    "Australia/Sydney",
];

impl Preferences {
    /// Build from raw cookie values, falling back to the detected zone and 24h
    pub fn from_cookie_values(timezone: Option<String>, hour_format: Option<String>, detected: impl FnOnce() -> String) -> Self {
        Self {
            timezone: timezone.filter(|tz| !tz.trim().is_empty()).unwrap_or_else(detected),
            hour_format: hour_format.as_deref().and_then(HourFormat::parse).unwrap_or_default(),
        }
    }

    /// Read the preference cookies
    pub fn load() -> Self {
        let cookies = storage::read_cookies();
        Self::from_cookie_values(
            storage::cookie_value(&cookies, TIMEZONE_COOKIE),
            storage::cookie_value(&cookies, HOUR_FORMAT_COOKIE),
            detect_timezone,
        )
    }

    /// Validate and write both cookies
    pub fn save(timezone: &str, hour_format: HourFormat) -> Result<Self, FieldErrors> {
        let timezone = timezone.trim();
        if timezone.is_empty() {
            return Err(FieldErrors::single("timezone", "Timezone cannot be empty."));
        }
        storage::write_preference_cookie(TIMEZONE_COOKIE, timezone);
        storage::write_preference_cookie(HOUR_FORMAT_COOKIE, hour_format.as_str());
        Ok(Self {
            timezone: timezone.to_string(),
            hour_format,
        })
    }
}

/// Browser timezone via `Intl.DateTimeFormat().resolvedOptions()`
pub fn detect_timezone() -> String {
    let format = js_sys::Intl::DateTimeFormat::new(&js_sys::Array::new(), &js_sys::Object::new());
    js_sys::Reflect::get(&format.resolved_options(), &JsValue::from_str("timeZone"))
        .ok()
        .and_then(|tz| tz.as_string())
        .filter(|tz| !tz.is_empty())
        .unwrap_or_else(|| "UTC".to_string())
}
