use crate::error::PortalApiResult;
use crate::models::*;
use async_trait::async_trait;

/// Account operations for the signed-in user.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn register(&self, request: &RegisterRequest) -> PortalApiResult<AuthPayload>;

    async fn login(&self, request: &LoginRequest) -> PortalApiResult<AuthPayload>;

    async fn logout(&self) -> PortalApiResult<()>;

    /// Profile of whoever the current bearer token belongs to.
    async fn profile(&self) -> PortalApiResult<User>;

    async fn update_profile(&self, request: &ProfileUpdateRequest) -> PortalApiResult<User>;

    async fn change_password(&self, request: &ChangePasswordRequest) -> PortalApiResult<()>;

    async fn forgot_password(&self, email: &str) -> PortalApiResult<()>;
}

/// The client's own applications and their notes.
///
/// Abstracts the backend so services can be tested against an in-memory
/// implementation.
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn list(&self, filters: &ApplicationFilters) -> PortalApiResult<Vec<Application>>;

    async fn get(&self, id: &str) -> PortalApiResult<Application>;

    async fn create(&self, request: &CreateApplicationRequest) -> PortalApiResult<Application>;

    async fn update(&self, id: &str, request: &CreateApplicationRequest) -> PortalApiResult<Application>;

    async fn update_priority(&self, id: &str, priority: Priority) -> PortalApiResult<Application>;

    async fn delete(&self, id: &str) -> PortalApiResult<()>;

    /// Move a draft into review. Returns the application with its new status.
    async fn submit(&self, id: &str) -> PortalApiResult<Application>;

    async fn notes(&self, application_id: &str) -> PortalApiResult<Vec<ApplicationNote>>;

    async fn create_note(
        &self,
        application_id: &str,
        request: &CreateNoteRequest,
    ) -> PortalApiResult<ApplicationNote>;

    async fn update_note(&self, note_id: &str, request: &CreateNoteRequest) -> PortalApiResult<ApplicationNote>;

    async fn delete_note(&self, note_id: &str) -> PortalApiResult<()>;

    async fn toggle_note_pin(&self, note_id: &str) -> PortalApiResult<ApplicationNote>;
}

/// Staff-only endpoints under `/admin`.
#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn list_applications(&self, filters: &ApplicationFilters) -> PortalApiResult<Vec<Application>>;

    async fn get_application(&self, id: &str) -> PortalApiResult<Application>;

    async fn update_status(&self, id: &str, status: ApplicationStatus) -> PortalApiResult<()>;

    async fn assign_manager(&self, id: &str, manager_id: &str) -> PortalApiResult<()>;

    async fn add_internal_note(&self, id: &str, request: &CreateNoteRequest) -> PortalApiResult<()>;

    async fn reset_to_draft(&self, id: &str) -> PortalApiResult<()>;

    async fn list_users(&self, role: Option<Role>) -> PortalApiResult<Vec<User>>;

    async fn update_user_role(&self, user_id: &str, role: Role) -> PortalApiResult<()>;

    async fn dashboard_stats(&self) -> PortalApiResult<DashboardStats>;
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn list(&self, unread_only: bool) -> PortalApiResult<Vec<Notification>>;

    async fn unread_count(&self) -> PortalApiResult<u64>;

    async fn mark_read(&self, id: &str) -> PortalApiResult<()>;

    async fn mark_all_read(&self) -> PortalApiResult<()>;

    async fn delete(&self, id: &str) -> PortalApiResult<()>;
}
