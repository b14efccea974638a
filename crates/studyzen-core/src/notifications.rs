//! Per-user notification records.
//!
//! The core only stores and lists notifications; rendering toasts or
//! badges is the presentation layer's concern.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;
use crate::storage::{keys, Store};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub username: String,
    /// Free-form category tag (e.g. "achievement", "reminder").
    pub kind: String,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Notification storage over a [`Store`].
pub struct Notifications<'a> {
    store: &'a Store,
}

impl<'a> Notifications<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Append a notification for a user.
    pub fn create(
        &self,
        username: &str,
        kind: &str,
        title: &str,
        message: &str,
    ) -> Result<Notification, StoreError> {
        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            kind: kind.to_string(),
            title: title.to_string(),
            message: message.to_string(),
            read: false,
            created_at: Utc::now(),
        };
        let mut all: Vec<Notification> = self.store.read_collection(keys::NOTIFICATIONS)?;
        all.push(notification.clone());
        self.store.write_collection(keys::NOTIFICATIONS, &all)?;
        Ok(notification)
    }

    /// A user's notifications, newest first.
    pub fn for_user(&self, username: &str) -> Result<Vec<Notification>, StoreError> {
        let all: Vec<Notification> = self.store.read_collection(keys::NOTIFICATIONS)?;
        let mut mine: Vec<Notification> = all
            .into_iter()
            .filter(|n| n.username == username)
            .collect();
        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(mine)
    }

    /// Unread notifications count for a user.
    pub fn unread_count(&self, username: &str) -> Result<usize, StoreError> {
        Ok(self
            .for_user(username)?
            .iter()
            .filter(|n| !n.read)
            .count())
    }

    /// Mark one notification read. Returns `None` for an unknown id.
    pub fn mark_read(&self, id: &str) -> Result<Option<Notification>, StoreError> {
        let mut all: Vec<Notification> = self.store.read_collection(keys::NOTIFICATIONS)?;
        let Some(notification) = all.iter_mut().find(|n| n.id == id) else {
            return Ok(None);
        };
        notification.read = true;
        let updated = notification.clone();
        self.store.write_collection(keys::NOTIFICATIONS, &all)?;
        Ok(Some(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_list_newest_first() {
        let store = Store::open_memory().unwrap();
        let notifications = Notifications::new(&store);
        let first = notifications
            .create("ada", "reminder", "Study time", "Back to Math?")
            .unwrap();
        let second = notifications
            .create("ada", "achievement", "First Hour", "1 hour studied")
            .unwrap();
        notifications
            .create("grace", "reminder", "Other user", "Not ada's")
            .unwrap();

        let mine = notifications.for_user("ada").unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().any(|n| n.id == first.id));
        assert!(mine[0].created_at >= mine[1].created_at);
        assert_eq!(notifications.unread_count("ada").unwrap(), 2);
        let _ = second;
    }

    #[test]
    fn mark_read() {
        let store = Store::open_memory().unwrap();
        let notifications = Notifications::new(&store);
        let n = notifications
            .create("ada", "reminder", "Study time", "Back to Math?")
            .unwrap();
        assert!(!n.read);

        let updated = notifications.mark_read(&n.id).unwrap().unwrap();
        assert!(updated.read);
        assert_eq!(notifications.unread_count("ada").unwrap(), 0);
        assert!(notifications.mark_read("no-such-id").unwrap().is_none());
    }
}
