//! Async wrapper around the synchronous PortalClient.
//!
//! HTTP calls run on tokio's blocking pool via `tokio::task::spawn_blocking`
//! so the async runtime never waits on socket I/O.

use super::PortalClient;
use crate::error::{PortalApiError, PortalApiResult};
use crate::models::*;
use async_trait::async_trait;
use std::sync::Arc;

/// Async view of every backend operation.
#[async_trait]
pub trait AsyncPortalClient: Send + Sync {
    async fn register(&self, request: &RegisterRequest) -> PortalApiResult<AuthPayload>;
    async fn login(&self, request: &LoginRequest) -> PortalApiResult<AuthPayload>;
    async fn logout(&self) -> PortalApiResult<()>;
    async fn get_profile(&self) -> PortalApiResult<User>;
    async fn update_profile(&self, request: &ProfileUpdateRequest) -> PortalApiResult<User>;
    async fn change_password(&self, request: &ChangePasswordRequest) -> PortalApiResult<()>;
    async fn forgot_password(&self, email: &str) -> PortalApiResult<()>;

    async fn get_applications(&self, filters: &ApplicationFilters) -> PortalApiResult<Vec<Application>>;
    async fn get_application(&self, id: &str) -> PortalApiResult<Application>;
    async fn create_application(&self, request: &CreateApplicationRequest) -> PortalApiResult<Application>;
    async fn update_application(
        &self,
        id: &str,
        request: &CreateApplicationRequest,
    ) -> PortalApiResult<Application>;
    async fn update_application_priority(&self, id: &str, priority: Priority) -> PortalApiResult<Application>;
    async fn delete_application(&self, id: &str) -> PortalApiResult<()>;
    async fn submit_application(&self, id: &str) -> PortalApiResult<Application>;

    async fn get_application_notes(&self, application_id: &str) -> PortalApiResult<Vec<ApplicationNote>>;
    async fn create_note(
        &self,
        application_id: &str,
        request: &CreateNoteRequest,
    ) -> PortalApiResult<ApplicationNote>;
    async fn update_note(&self, note_id: &str, request: &CreateNoteRequest) -> PortalApiResult<ApplicationNote>;
    async fn delete_note(&self, note_id: &str) -> PortalApiResult<()>;
    async fn toggle_note_pin(&self, note_id: &str) -> PortalApiResult<ApplicationNote>;

    async fn admin_get_applications(&self, filters: &ApplicationFilters) -> PortalApiResult<Vec<Application>>;
    async fn admin_get_application(&self, id: &str) -> PortalApiResult<Application>;
    async fn admin_update_status(&self, id: &str, status: ApplicationStatus) -> PortalApiResult<()>;
    async fn admin_assign_manager(&self, id: &str, manager_id: &str) -> PortalApiResult<()>;
    async fn admin_add_note(&self, id: &str, request: &CreateNoteRequest) -> PortalApiResult<()>;
    async fn admin_reset_to_draft(&self, id: &str) -> PortalApiResult<()>;
    async fn admin_get_users(&self, role: Option<Role>) -> PortalApiResult<Vec<User>>;
    async fn admin_update_user_role(&self, user_id: &str, role: Role) -> PortalApiResult<()>;
    async fn admin_dashboard_stats(&self) -> PortalApiResult<DashboardStats>;

    async fn get_notifications(&self, unread_only: bool) -> PortalApiResult<Vec<Notification>>;
    async fn get_unread_count(&self) -> PortalApiResult<u64>;
    async fn mark_notification_read(&self, id: &str) -> PortalApiResult<()>;
    async fn mark_all_notifications_read(&self) -> PortalApiResult<()>;
    async fn delete_notification(&self, id: &str) -> PortalApiResult<()>;
}

#[derive(Clone)]
pub struct AsyncPortalClientImpl {
    client: Arc<PortalClient>,
}

impl AsyncPortalClientImpl {
    pub fn new(client: PortalClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Run a blocking client call on the blocking pool.
    async fn run<T, F>(&self, call: F) -> PortalApiResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&PortalClient) -> PortalApiResult<T> + Send + 'static,
    {
        let client = self.client.clone();
        tokio::task::spawn_blocking(move || call(&client))
            .await
            .map_err(|e| PortalApiError::HttpError(format!("Task join error: {}", e)))?
    }
}

#[async_trait]
impl AsyncPortalClient for AsyncPortalClientImpl {
    async fn register(&self, request: &RegisterRequest) -> PortalApiResult<AuthPayload> {
        let request = request.clone();
        self.run(move |c| c.register(&request)).await
    }

    async fn login(&self, request: &LoginRequest) -> PortalApiResult<AuthPayload> {
        let request = request.clone();
        self.run(move |c| c.login(&request)).await
    }

    async fn logout(&self) -> PortalApiResult<()> {
        self.run(|c| c.logout()).await
    }

    async fn get_profile(&self) -> PortalApiResult<User> {
        self.run(|c| c.get_profile()).await
    }

    async fn update_profile(&self, request: &ProfileUpdateRequest) -> PortalApiResult<User> {
        let request = request.clone();
        self.run(move |c| c.update_profile(&request)).await
    }

    async fn change_password(&self, request: &ChangePasswordRequest) -> PortalApiResult<()> {
        let request = request.clone();
        self.run(move |c| c.change_password(&request)).await
    }

    async fn forgot_password(&self, email: &str) -> PortalApiResult<()> {
        let email = email.to_string();
        self.run(move |c| c.forgot_password(&email)).await
    }

    async fn get_applications(&self, filters: &ApplicationFilters) -> PortalApiResult<Vec<Application>> {
        let filters = filters.clone();
        self.run(move |c| c.get_applications(&filters)).await
    }

    async fn get_application(&self, id: &str) -> PortalApiResult<Application> {
        let id = id.to_string();
        self.run(move |c| c.get_application(&id)).await
    }

    async fn create_application(&self, request: &CreateApplicationRequest) -> PortalApiResult<Application> {
        let request = request.clone();
        self.run(move |c| c.create_application(&request)).await
    }

    async fn update_application(
        &self,
        id: &str,
        request: &CreateApplicationRequest,
    ) -> PortalApiResult<Application> {
        let id = id.to_string();
        let request = request.clone();
        self.run(move |c| c.update_application(&id, &request)).await
    }

    async fn update_application_priority(&self, id: &str, priority: Priority) -> PortalApiResult<Application> {
        let id = id.to_string();
        self.run(move |c| c.update_application_priority(&id, priority))
            .await
    }

    async fn delete_application(&self, id: &str) -> PortalApiResult<()> {
        let id = id.to_string();
        self.run(move |c| c.delete_application(&id)).await
    }

    async fn submit_application(&self, id: &str) -> PortalApiResult<Application> {
        let id = id.to_string();
        self.run(move |c| c.submit_application(&id)).await
    }

    async fn get_application_notes(&self, application_id: &str) -> PortalApiResult<Vec<ApplicationNote>> {
        let application_id = application_id.to_string();
        self.run(move |c| c.get_application_notes(&application_id))
            .await
    }

    async fn create_note(
        &self,
        application_id: &str,
        request: &CreateNoteRequest,
    ) -> PortalApiResult<ApplicationNote> {
        let application_id = application_id.to_string();
        let request = request.clone();
        self.run(move |c| c.create_note(&application_id, &request))
            .await
    }

    async fn update_note(&self, note_id: &str, request: &CreateNoteRequest) -> PortalApiResult<ApplicationNote> {
        let note_id = note_id.to_string();
        let request = request.clone();
        self.run(move |c| c.update_note(&note_id, &request)).await
    }

    async fn delete_note(&self, note_id: &str) -> PortalApiResult<()> {
        let note_id = note_id.to_string();
        self.run(move |c| c.delete_note(&note_id)).await
    }

    async fn toggle_note_pin(&self, note_id: &str) -> PortalApiResult<ApplicationNote> {
        let note_id = note_id.to_string();
        self.run(move |c| c.toggle_note_pin(&note_id)).await
    }

    async fn admin_get_applications(&self, filters: &ApplicationFilters) -> PortalApiResult<Vec<Application>> {
        let filters = filters.clone();
        self.run(move |c| c.admin_get_applications(&filters)).await
    }

    async fn admin_get_application(&self, id: &str) -> PortalApiResult<Application> {
        let id = id.to_string();
        self.run(move |c| c.admin_get_application(&id)).await
    }

    async fn admin_update_status(&self, id: &str, status: ApplicationStatus) -> PortalApiResult<()> {
        let id = id.to_string();
        self.run(move |c| c.admin_update_status(&id, status)).await
    }

    async fn admin_assign_manager(&self, id: &str, manager_id: &str) -> PortalApiResult<()> {
        let id = id.to_string();
        let manager_id = manager_id.to_string();
        self.run(move |c| c.admin_assign_manager(&id, &manager_id))
            .await
    }

    async fn admin_add_note(&self, id: &str, request: &CreateNoteRequest) -> PortalApiResult<()> {
        let id = id.to_string();
        let request = request.clone();
        self.run(move |c| c.admin_add_note(&id, &request)).await
    }

    async fn admin_reset_to_draft(&self, id: &str) -> PortalApiResult<()> {
        let id = id.to_string();
        self.run(move |c| c.admin_reset_to_draft(&id)).await
    }

    async fn admin_get_users(&self, role: Option<Role>) -> PortalApiResult<Vec<User>> {
        self.run(move |c| c.admin_get_users(role)).await
    }

    async fn admin_update_user_role(&self, user_id: &str, role: Role) -> PortalApiResult<()> {
        let user_id = user_id.to_string();
        self.run(move |c| c.admin_update_user_role(&user_id, role))
            .await
    }

    async fn admin_dashboard_stats(&self) -> PortalApiResult<DashboardStats> {
        self.run(|c| c.admin_dashboard_stats()).await
    }

    async fn get_notifications(&self, unread_only: bool) -> PortalApiResult<Vec<Notification>> {
        self.run(move |c| c.get_notifications(unread_only)).await
    }

    async fn get_unread_count(&self) -> PortalApiResult<u64> {
        self.run(|c| c.get_unread_count()).await
    }

    async fn mark_notification_read(&self, id: &str) -> PortalApiResult<()> {
        let id = id.to_string();
        self.run(move |c| c.mark_notification_read(&id)).await
    }

    async fn mark_all_notifications_read(&self) -> PortalApiResult<()> {
        self.run(|c| c.mark_all_notifications_read()).await
    }

    async fn delete_notification(&self, id: &str) -> PortalApiResult<()> {
        let id = id.to_string();
        self.run(move |c| c.delete_notification(&id)).await
    }
}
