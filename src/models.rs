//! Frontend Models
//!
//! Data structures matching the REST API payloads.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// low -> medium -> high -> low
    pub fn cycle(self) -> Self {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        }
    }

    /// Wire / query-string value
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

/// Task (todo) as returned by the API
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "is_completed")]
    pub completed: bool,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub priority: Priority,
}

/// Accepts RFC 3339 timestamps and offset-less ones (read as UTC)
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(parsed.with_timezone(&Utc)));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Some(naive.and_utc()))
        .map_err(serde::de::Error::custom)
}

/// Signed-in user profile
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

/// One page of `/todos` or `/todos/today`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TodoPage {
    pub items: Vec<Task>,
    pub page: u32,
    pub page_size: u32,
    pub total: u32,
}

/// `{message, todo}` wrapper returned by todo mutations
#[derive(Debug, Deserialize)]
pub struct TodoEnvelope {
    pub todo: Task,
}

// ========================
// Request Payloads
// ========================

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Body of create and update
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TodoPayload {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct CompletedUpdate {
    pub is_completed: bool,
}

#[derive(Debug, Serialize)]
pub struct OrderUpdate {
    pub order: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub surname: String,
    pub email: String,
}

/// `/profile/update` answers with the saved user, or with only a message
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ProfileUpdateResponse {
    User(User),
    Message { message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordUpdate {
    pub old_password: String,
    pub password: String,
    pub password_confirm: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_from_api_shape() {
        let json = r#"{
            "id": "7f1c",
            "order": 3,
            "title": "Write report",
            "description": null,
            "is_completed": true,
            "due_date": "2030-05-01T18:30:00Z",
            "priority": "high"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, "7f1c");
        assert!(task.completed);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.due_date.unwrap().to_rfc3339(), "2030-05-01T18:30:00+00:00");
    }

    #[test]
    fn test_profile_update_response_shapes() {
        let saved: ProfileUpdateResponse =
            serde_json::from_str(r#"{"id": "u1", "name": "Ada Lovelace", "email": "ada@example.com"}"#).unwrap();
        assert!(matches!(saved, ProfileUpdateResponse::User(ref u) if u.name == "Ada Lovelace"));

        let message: ProfileUpdateResponse =
            serde_json::from_str(r#"{"message": "Profile updated successfully"}"#).unwrap();
        assert!(matches!(message, ProfileUpdateResponse::Message { .. }));
    }

    #[test]
    fn test_naive_due_date_is_utc() {
        let json = r#"{"id":"1","order":1,"title":"t","is_completed":false,"due_date":"2030-05-01T18:30:00","priority":"low"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.due_date.unwrap().to_rfc3339(), "2030-05-01T18:30:00+00:00");
    }

    #[test]
    fn test_payload_omits_empty_description() {
        let payload = TodoPayload {
            title: "Call".to_string(),
            description: None,
            priority: Priority::Low,
            due_date: None,
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(json, r#"{"title":"Call","priority":"low","due_date":null}"#);
    }

    #[test]
    fn test_priority_cycle() {
        assert_eq!(Priority::Low.cycle(), Priority::Medium);
        assert_eq!(Priority::Medium.cycle(), Priority::High);
        assert_eq!(Priority::High.cycle(), Priority::Low);
    }
}
