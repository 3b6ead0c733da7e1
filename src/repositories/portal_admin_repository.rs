use crate::client::AsyncPortalClient;
use crate::error::PortalApiResult;
use crate::models::{
    Application, ApplicationFilters, ApplicationStatus, CreateNoteRequest, DashboardStats, Role,
    User,
};
use crate::repositories::traits::AdminRepository;
use async_trait::async_trait;
use std::sync::Arc;

pub struct PortalAdminRepository {
    client: Arc<dyn AsyncPortalClient>,
}

impl PortalAdminRepository {
    pub fn new(client: Arc<dyn AsyncPortalClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AdminRepository for PortalAdminRepository {
    async fn list_applications(&self, filters: &ApplicationFilters) -> PortalApiResult<Vec<Application>> {
        self.client.admin_get_applications(filters).await
    }

    async fn get_application(&self, id: &str) -> PortalApiResult<Application> {
        self.client.admin_get_application(id).await
    }

    async fn update_status(&self, id: &str, status: ApplicationStatus) -> PortalApiResult<()> {
        self.client.admin_update_status(id, status).await
    }

    async fn assign_manager(&self, id: &str, manager_id: &str) -> PortalApiResult<()> {
        self.client.admin_assign_manager(id, manager_id).await
    }

    async fn add_internal_note(&self, id: &str, request: &CreateNoteRequest) -> PortalApiResult<()> {
        self.client.admin_add_note(id, request).await
    }

    async fn reset_to_draft(&self, id: &str) -> PortalApiResult<()> {
        self.client.admin_reset_to_draft(id).await
    }

    async fn list_users(&self, role: Option<Role>) -> PortalApiResult<Vec<User>> {
        self.client.admin_get_users(role).await
    }

    async fn update_user_role(&self, user_id: &str, role: Role) -> PortalApiResult<()> {
        self.client.admin_update_user_role(user_id, role).await
    }

    async fn dashboard_stats(&self) -> PortalApiResult<DashboardStats> {
        self.client.admin_dashboard_stats().await
    }
}
