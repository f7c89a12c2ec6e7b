//! Todo Endpoints
//!
//! Bindings for listing and mutating the signed-in user's tasks.

use crate::error::ApiResult;
use crate::models::{CompletedUpdate, OrderUpdate, Priority, Task, TodoEnvelope, TodoPage, TodoPayload};

use super::{ApiClient, Verb};

/// Query for one page of tasks
#[derive(Debug, Clone, PartialEq)]
pub struct TodoQuery {
    pub page: u32,
    pub page_size: u32,
    pub completed: Option<bool>,
    pub search: Option<String>,
    pub priority: Option<Priority>,
}

impl TodoQuery {
    /// Query-string pairs; unset filters are omitted
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("page", self.page.to_string()), ("page_size", self.page_size.to_string())];
        if let Some(completed) = self.completed {
            params.push(("completed", completed.to_string()));
        }
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            params.push(("search", search.to_string()));
        }
        if let Some(priority) = self.priority {
            params.push(("priority", priority.as_str().to_string()));
        }
        params
    }

    /// `/todos/today` only understands paging and priority
    pub fn today_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("page", self.page.to_string()), ("page_size", self.page_size.to_string())];
        if let Some(priority) = self.priority {
            params.push(("priority", priority.as_str().to_string()));
        }
        params
    }
}

pub async fn list_todos(client: &ApiClient, query: &TodoQuery) -> ApiResult<TodoPage> {
    client.get("/todos", &query.params()).await
}

pub async fn list_today_todos(client: &ApiClient, query: &TodoQuery) -> ApiResult<TodoPage> {
    client.get("/todos/today", &query.today_params()).await
}

pub async fn create_todo(client: &ApiClient, payload: &TodoPayload) -> ApiResult<Task> {
    let envelope: TodoEnvelope = client.send(Verb::Post, "/todo/create", payload).await?;
    Ok(envelope.todo)
}

pub async fn update_todo(client: &ApiClient, id: &str, payload: &TodoPayload) -> ApiResult<Task> {
    let envelope: TodoEnvelope = client.send(Verb::Put, &format!("/todo/update/{}", id), payload).await?;
    Ok(envelope.todo)
}

pub async fn set_todo_completed(client: &ApiClient, id: &str, is_completed: bool) -> ApiResult<Task> {
    let envelope: TodoEnvelope = client
        .send(Verb::Put, &format!("/todo/completed/{}", id), &CompletedUpdate { is_completed })
        .await?;
    Ok(envelope.todo)
}

pub async fn update_todo_order(client: &ApiClient, id: &str, order: i64) -> ApiResult<()> {
    client.send_unit(Verb::Put, &format!("/todo/order-update/{}", id), Some(&OrderUpdate { order })).await
}

pub async fn delete_todo(client: &ApiClient, id: &str) -> ApiResult<()> {
    client.send_unit::<()>(Verb::Delete, &format!("/todo/delete/{}", id), None).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_omit_unset_filters() {
        let query = TodoQuery {
            page: 2,
            page_size: 20,
            completed: None,
            search: Some("   ".to_string()),
            priority: None,
        };
        assert_eq!(query.params(), vec![("page", "2".to_string()), ("page_size", "20".to_string())]);
    }

    #[test]
    fn test_params_with_filters() {
        let query = TodoQuery {
            page: 1,
            page_size: 20,
            completed: Some(false),
            search: Some(" report ".to_string()),
            priority: Some(Priority::High),
        };
        let params = query.params();
        assert!(params.contains(&("completed", "false".to_string())));
        assert!(params.contains(&("search", "report".to_string())));
        assert!(params.contains(&("priority", "high".to_string())));
    }

    #[test]
    fn test_today_params_ignore_search_and_completion() {
        let query = TodoQuery {
            page: 1,
            page_size: 20,
            completed: Some(true),
            search: Some("x".to_string()),
            priority: Some(Priority::Low),
        };
        assert_eq!(
            query.today_params(),
            vec![("page", "1".to_string()), ("page_size", "20".to_string()), ("priority", "low".to_string())]
        );
    }
}
