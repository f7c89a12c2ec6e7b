//! Date & Time Helpers
//!
//! Conversions between `datetime-local` inputs (browser local time) and the
//! UTC timestamps the API stores, due-date quick picks, and display formatting
//! in the user's preferred timezone.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc, Weekday};
use wasm_bindgen::{JsCast, JsValue};

use crate::prefs::{HourFormat, Preferences};

/// `datetime-local` value format
const LOCAL_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Result of reading a due-date input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DueInput {
    /// Left blank
    Empty,
    At(DateTime<Utc>),
    /// Not a date the browser could have produced
    Invalid,
}

pub fn parse_local_input(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, LOCAL_INPUT_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

/// Read a `datetime-local` value as browser local time
pub fn parse_due_input(value: &str) -> DueInput {
    if value.trim().is_empty() {
        return DueInput::Empty;
    }
    match parse_local_input(value).and_then(|naive| Local.from_local_datetime(&naive).earliest()) {
        Some(local) => DueInput::At(local.with_timezone(&Utc)),
        None => DueInput::Invalid,
    }
}

/// Inverse of `parse_due_input`, for pre-filling the edit form
pub fn to_local_input(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format(LOCAL_INPUT_FORMAT).to_string()
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(23, 59, 0).unwrap_or_else(|| date.and_time(chrono::NaiveTime::MIN))
}

/// Today at 23:59
pub fn today_end(now: NaiveDateTime) -> NaiveDateTime {
    end_of_day(now.date())
}

/// Tomorrow at 23:59
pub fn tomorrow_end(now: NaiveDateTime) -> NaiveDateTime {
    end_of_day(now.date() + Duration::days(1))
}

/// Next occurrence of `weekday` at 23:59, never today
pub fn next_weekday_end(now: NaiveDateTime, weekday: Weekday) -> NaiveDateTime {
    let current = now.weekday().num_days_from_sunday() as i64;
    let wanted = weekday.num_days_from_sunday() as i64;
    let mut diff = wanted - current;
    if diff <= 0 {
        diff += 7;
    }
    end_of_day(now.date() + Duration::days(diff))
}

pub fn format_local_input(at: NaiveDateTime) -> String {
    at.format(LOCAL_INPUT_FORMAT).to_string()
}

/// Quick-pick value for the new task form, relative to the browser clock
pub fn quick_pick(pick: QuickPick) -> String {
    let now = Local::now().naive_local();
    let at = match pick {
        QuickPick::Today => today_end(now),
        QuickPick::Tomorrow => tomorrow_end(now),
        QuickPick::NextMonday => next_weekday_end(now, Weekday::Mon),
        QuickPick::NextFriday => next_weekday_end(now, Weekday::Fri),
    };
    format_local_input(at)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuickPick {
    Today,
    Tomorrow,
    NextMonday,
    NextFriday,
}

impl QuickPick {
    pub const ALL: [QuickPick; 4] = [QuickPick::Today, QuickPick::Tomorrow, QuickPick::NextMonday, QuickPick::NextFriday];

    pub fn label(self) -> &'static str {
        match self {
            QuickPick::Today => "Today",
            QuickPick::Tomorrow => "Tomorrow",
            QuickPick::NextMonday => "Next Monday",
            QuickPick::NextFriday => "Next Friday",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayStyle {
    DateTime,
    DateOnly,
    TimeOnly,
}

/// Fallback when `Intl` rejects the options (unknown zone name)
pub fn format_utc(at: DateTime<Utc>, hour_format: HourFormat, style: DisplayStyle) -> String {
    let time = match hour_format {
        HourFormat::H12 => "%I:%M %p",
        HourFormat::H24 => "%H:%M",
    };
    let pattern = match style {
        DisplayStyle::DateTime => format!("%b %d, %Y {} UTC", time),
        DisplayStyle::DateOnly => "%b %d, %Y".to_string(),
        DisplayStyle::TimeOnly => format!("{} UTC", time),
    };
    at.format(&pattern).to_string()
}

/// Format a timestamp in the preferred timezone and hour format via `Intl`
pub fn format_for_user(at: DateTime<Utc>, prefs: &Preferences, style: DisplayStyle) -> String {
    let date = js_sys::Date::new(&JsValue::from_f64(at.timestamp_millis() as f64));
    let options = js_sys::Object::new();
    let set = |key: &str, value: JsValue| {
        let _ = js_sys::Reflect::set(&options, &JsValue::from_str(key), &value);
    };
    set("timeZone", JsValue::from_str(&prefs.timezone));
    if style != DisplayStyle::TimeOnly {
        set("year", JsValue::from_str("numeric"));
        set("month", JsValue::from_str("short"));
        set("day", JsValue::from_str("2-digit"));
    }
    if style != DisplayStyle::DateOnly {
        set("hour", JsValue::from_str("2-digit"));
        set("minute", JsValue::from_str("2-digit"));
        set("hour12", JsValue::from_bool(prefs.hour_format == HourFormat::H12));
    }

    // Called through Reflect so a RangeError comes back as Err
    let formatted = js_sys::Reflect::get(&date, &JsValue::from_str("toLocaleString"))
        .ok()
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
        .and_then(|f| {
            let args = js_sys::Array::of2(&JsValue::from_str("default"), &options);
            js_sys::Reflect::apply(&f, &date, &args).ok()
        })
        .and_then(|v| v.as_string());
    formatted.unwrap_or_else(|| {
        tracing::warn!("Intl rejected timezone {}, showing UTC", prefs.timezone);
        format_utc(at, prefs.hour_format, style)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        parse_local_input(s).unwrap()
    }

    #[test]
    fn test_parse_local_input() {
        assert_eq!(format_local_input(at("2030-01-02T09:05")), "2030-01-02T09:05");
        assert!(parse_local_input("2030-01-02T09:05:30").is_some());
        assert!(parse_local_input("tomorrow").is_none());
        assert_eq!(parse_due_input("   "), DueInput::Empty);
        assert_eq!(parse_due_input("not a date"), DueInput::Invalid);
    }

    #[test]
    fn test_today_and_tomorrow_end() {
        let now = at("2030-03-31T10:00");
        assert_eq!(format_local_input(today_end(now)), "2030-03-31T23:59");
        assert_eq!(format_local_input(tomorrow_end(now)), "2030-04-01T23:59");
    }

    #[test]
    fn test_next_weekday_skips_today() {
        // 2030-01-07 is a Monday
        let monday = at("2030-01-07T08:00");
        assert_eq!(format_local_input(next_weekday_end(monday, Weekday::Mon)), "2030-01-14T23:59");
        assert_eq!(format_local_input(next_weekday_end(monday, Weekday::Fri)), "2030-01-11T23:59");
        let saturday = at("2030-01-12T08:00");
        assert_eq!(format_local_input(next_weekday_end(saturday, Weekday::Sun)), "2030-01-13T23:59");
    }

    #[test]
    fn test_utc_fallback_format() {
        let at = Utc.with_ymd_and_hms(2030, 6, 15, 14, 30, 0).unwrap();
        assert_eq!(format_utc(at, HourFormat::H24, DisplayStyle::DateTime), "Jun 15, 2030 14:30 UTC");
        assert_eq!(format_utc(at, HourFormat::H12, DisplayStyle::TimeOnly), "02:30 PM UTC");
        assert_eq!(format_utc(at, HourFormat::H12, DisplayStyle::DateOnly), "Jun 15, 2030");
    }

    #[test]
    fn test_local_input_round_trip() {
        let due = match parse_due_input("2030-06-15T14:30") {
            DueInput::At(due) => due,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(to_local_input(due), "2030-06-15T14:30");
    }
}
