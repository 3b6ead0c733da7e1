use crate::client::AsyncPortalClient;
use crate::error::PortalApiResult;
use crate::models::Notification;
use crate::repositories::traits::NotificationRepository;
use async_trait::async_trait;
use std::sync::Arc;

pub struct PortalNotificationRepository {
    client: Arc<dyn AsyncPortalClient>,
}

impl PortalNotificationRepository {
    pub fn new(client: Arc<dyn AsyncPortalClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NotificationRepository for PortalNotificationRepository {
    async fn list(&self, unread_only: bool) -> PortalApiResult<Vec<Notification>> {
        self.client.get_notifications(unread_only).await
    }

    async fn unread_count(&self) -> PortalApiResult<u64> {
        self.client.get_unread_count().await
    }

    async fn mark_read(&self, id: &str) -> PortalApiResult<()> {
        self.client.mark_notification_read(id).await
    }

    async fn mark_all_read(&self) -> PortalApiResult<()> {
        self.client.mark_all_notifications_read().await
    }

    async fn delete(&self, id: &str) -> PortalApiResult<()> {
        self.client.delete_notification(id).await
    }
}
