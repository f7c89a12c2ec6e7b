//! API Errors
//!
//! Error type shared by every gateway call, plus decoding of the backend's
//! `{"detail": ...}` error bodies.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

/// Per-field validation messages, keyed by backend field name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message; the first message for a field wins
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first_message(&self) -> Option<&str> {
        self.0.values().next().map(String::as_str)
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(field, message);
        errors
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// 422-style field errors, mapped back onto form inputs
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },
    /// Credential rejected outside `/profile/`; the session must end
    #[error("session expired")]
    SessionExpired,
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    /// Message suitable for a form or banner; `fallback` covers transport failures
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Validation(errors) => errors.first_message().unwrap_or(fallback).to_string(),
            ApiError::Server { message, .. } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// One entry of a validation `detail` array
#[derive(Debug, Clone, Deserialize)]
pub struct FieldIssue {
    #[serde(default)]
    pub loc: Vec<serde_json::Value>,
    pub msg: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl FieldIssue {
    /// `loc` is `["body", "<field>", ...]`; fall back to the last named segment
    pub fn field(&self) -> Option<&str> {
        self.loc
            .get(1)
            .and_then(|v| v.as_str())
            .or_else(|| self.loc.iter().rev().filter_map(|v| v.as_str()).find(|s| *s != "body"))
    }
}

/// Shape of `detail`: either field issues or a plain message
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Fields(Vec<FieldIssue>),
    Message(String),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<ErrorDetail>,
}

fn status_fallback(status: u16) -> String {
    match status {
        401 | 403 => "You are not allowed to do that.".to_string(),
        404 => "The requested resource was not found.".to_string(),
        500..=599 => "The server could not process the request.".to_string(),
        _ => format!("Request failed with status {}", status),
    }
}

/// Credential prompts whose 401 is a form error: the profile endpoints (wrong
/// current password) and the sign-in endpoints themselves
fn keeps_session_on_unauthorized(path: &str) -> bool {
    path.starts_with("/profile/") || path == "/auth/login" || path == "/auth/register"
}

/// Map a non-success response into an `ApiError`.
///
/// # Arguments
/// * `status` - HTTP status code
/// * `path` - request path relative to the API base (e.g. `/profile/update`)
/// * `body` - raw response body
pub fn decode_error(status: u16, path: &str, body: &str) -> ApiError {
    if status == 401 && !keeps_session_on_unauthorized(path) {
        return ApiError::SessionExpired;
    }

    let detail = serde_json::from_str::<ErrorBody>(body).ok().and_then(|b| b.detail);
    match detail {
        Some(ErrorDetail::Fields(issues)) => {
            let mut errors = FieldErrors::new();
            for issue in &issues {
                if let Some(field) = issue.field() {
                    errors.insert(field, issue.msg.clone());
                }
            }
            if errors.is_empty() {
                let message = issues.first().map(|i| i.msg.clone()).unwrap_or_else(|| status_fallback(status));
                ApiError::Server { status, message }
            } else {
                ApiError::Validation(errors)
            }
        }
        Some(ErrorDetail::Message(message)) => ApiError::Server { status, message },
        None => ApiError::Server { status, message: status_fallback(status) },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_from_validation_body() {
        let body = r#"{"detail":[
            {"loc":["body","title"],"msg":"Title is required","type":"value_error"},
            {"loc":["body","due_date"],"msg":"Due date must be in the future","type":"value_error"}
        ]}"#;
        let err = decode_error(422, "/todo/create", body);
        let fields = err.field_errors().expect("validation error");
        assert_eq!(fields.get("title"), Some("Title is required"));
        assert_eq!(fields.get("due_date"), Some("Due date must be in the future"));
    }

    #[test]
    fn test_message_detail() {
        let body = r#"{"detail":"Todo not found"}"#;
        assert_eq!(
            decode_error(404, "/todo/update/1", body),
            ApiError::Server { status: 404, message: "Todo not found".to_string() }
        );
    }

    #[test]
    fn test_unauthorized_outside_profile_expires_session() {
        assert_eq!(decode_error(401, "/todos", r#"{"detail":"Invalid token"}"#), ApiError::SessionExpired);
    }

    #[test]
    fn test_unauthorized_under_profile_is_form_error() {
        let err = decode_error(401, "/profile/password/update", r#"{"detail":"Old password is incorrect"}"#);
        assert_eq!(err.user_message("fallback"), "Old password is incorrect");
    }

    #[test]
    fn test_rejected_login_is_not_session_expiry() {
        let err = decode_error(401, "/auth/login", r#"{"detail":"Incorrect email or password"}"#);
        assert_eq!(err.user_message("Login failed"), "Incorrect email or password");
    }

    #[test]
    fn test_unparsable_body_uses_status_message() {
        let err = decode_error(500, "/todos", "<html>oops</html>");
        assert!(matches!(err, ApiError::Server { status: 500, .. }));
        assert_eq!(ApiError::Network("offline".into()).user_message("Try again"), "Try again");
    }

    #[test]
    fn test_issue_without_field_becomes_message() {
        let body = r#"{"detail":[{"loc":[],"msg":"Invalid credentials"}]}"#;
        assert_eq!(decode_error(400, "/auth/login", body).user_message("Login failed"), "Invalid credentials");
    }
}
