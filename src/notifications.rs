//! Notifications
//!
//! Toast queue shown in the top-right corner.

use crate::config::NOTIFICATION_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationKind {
    pub fn class(self) -> &'static str {
        match self {
            NotificationKind::Success => "notification success",
            NotificationKind::Error => "notification error",
            NotificationKind::Warning => "notification warning",
            NotificationKind::Info => "notification info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub title: String,
    pub kind: NotificationKind,
    pub description: Option<String>,
    /// 0 keeps the toast until dismissed
    pub duration_ms: u32,
}

impl Notification {
    pub fn new(kind: NotificationKind, title: impl Into<String>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            kind,
            description: None,
            duration_ms: NOTIFICATION_MS,
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(NotificationKind::Warning, title)
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, title)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn sticky(mut self) -> Self {
        self.duration_ms = 0;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationQueue {
    items: Vec<Notification>,
    last_id: u64,
}

impl NotificationQueue {
    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    /// Append and return the assigned id
    pub fn push(&mut self, mut notification: Notification) -> u64 {
        self.last_id += 1;
        notification.id = self.last_id;
        self.items.push(notification);
        self.last_id
    }

    pub fn remove(&mut self, id: u64) {
        self.items.retain(|n| n.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_increase_and_remove_by_id() {
        let mut queue = NotificationQueue::default();
        let first = queue.push(Notification::success("Saved"));
        let second = queue.push(Notification::error("Failed").with_description("offline"));
        assert!(second > first);

        queue.remove(first);
        assert_eq!(queue.items().len(), 1);
        assert_eq!(queue.items()[0].description.as_deref(), Some("offline"));

        let third = queue.push(Notification::success("Again"));
        assert!(third > second);
    }

    #[test]
    fn test_default_and_sticky_duration() {
        assert_eq!(Notification::success("x").duration_ms, NOTIFICATION_MS);
        assert_eq!(Notification::error("x").sticky().duration_ms, 0);
    }
}
