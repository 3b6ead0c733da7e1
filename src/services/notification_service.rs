//! Notification service layer.

use crate::error::{PortalApiError, PortalApiResult};
use crate::models::Notification;
use crate::repositories::NotificationRepository;
use crate::services::AuthService;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn list(&self, unread_only: bool) -> PortalApiResult<Vec<Notification>>;

    async fn unread_count(&self) -> PortalApiResult<u64>;

    async fn mark_read(&self, id: &str) -> PortalApiResult<()>;

    async fn mark_all_read(&self) -> PortalApiResult<()>;

    async fn delete(&self, id: &str) -> PortalApiResult<()>;
}

/// Notifications belong to the signed-in user; nothing is requested
/// without a session.
pub struct NotificationServiceImpl {
    repository: Arc<dyn NotificationRepository>,
    auth: Arc<dyn AuthService>,
}

impl NotificationServiceImpl {
    pub fn new(repository: Arc<dyn NotificationRepository>, auth: Arc<dyn AuthService>) -> Self {
        Self { repository, auth }
    }

    async fn require_session(&self) -> PortalApiResult<()> {
        if self.auth.is_authenticated().await {
            Ok(())
        } else {
            Err(PortalApiError::Unauthorized)
        }
    }
}

#[async_trait]
impl NotificationService for NotificationServiceImpl {
    async fn list(&self, unread_only: bool) -> PortalApiResult<Vec<Notification>> {
        self.require_session().await?;
        self.repository.list(unread_only).await
    }

    async fn unread_count(&self) -> PortalApiResult<u64> {
        self.require_session().await?;
        self.repository.unread_count().await
    }

    async fn mark_read(&self, id: &str) -> PortalApiResult<()> {
        self.require_session().await?;
        self.repository.mark_read(id).await
    }

    async fn mark_all_read(&self) -> PortalApiResult<()> {
        self.require_session().await?;
        self.repository.mark_all_read().await
    }

    async fn delete(&self, id: &str) -> PortalApiResult<()> {
        self.require_session().await?;
        self.repository.delete(id).await
    }
}
