use async_trait::async_trait;
use portal_mcp_server::error::{PortalApiError, PortalApiResult};
use portal_mcp_server::models::Notification;
use portal_mcp_server::repositories::NotificationRepository;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock notification repository for testing.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockNotificationRepository {
    notifications: Arc<Mutex<Vec<Notification>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockNotificationRepository {
    pub fn new() -> Self {
        Self {
            notifications: Arc::new(Mutex::new(Vec::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn add_notification(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    pub fn total_calls(&self) -> usize {
        self.call_counts.lock().unwrap().values().sum()
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl Default for MockNotificationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationRepository for MockNotificationRepository {
    async fn list(&self, unread_only: bool) -> PortalApiResult<Vec<Notification>> {
        self.track_call("list");

        let notifications = self.notifications.lock().unwrap();
        Ok(notifications
            .iter()
            .filter(|n| !unread_only || !n.is_read)
            .cloned()
            .collect())
    }

    async fn unread_count(&self) -> PortalApiResult<u64> {
        self.track_call("unread_count");

        let notifications = self.notifications.lock().unwrap();
        Ok(notifications.iter().filter(|n| !n.is_read).count() as u64)
    }

    async fn mark_read(&self, id: &str) -> PortalApiResult<()> {
        self.track_call("mark_read");

        let mut notifications = self.notifications.lock().unwrap();
        let notification = notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| PortalApiError::NotFound(format!("Notification {} not found", id)))?;
        notification.is_read = true;
        Ok(())
    }

    async fn mark_all_read(&self) -> PortalApiResult<()> {
        self.track_call("mark_all_read");

        for notification in self.notifications.lock().unwrap().iter_mut() {
            notification.is_read = true;
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> PortalApiResult<()> {
        self.track_call("delete");

        self.notifications.lock().unwrap().retain(|n| n.id != id);
        Ok(())
    }
}
