//! Admin service layer.
//!
//! Every operation checks the signed-in user's role before anything is sent
//! to the backend. Staff (managers and admins) may work with applications
//! and notes; user management is reserved for admins.

use crate::error::{PortalApiError, PortalApiResult};
use crate::models::note::sort_for_display;
use crate::models::{
    Application, ApplicationFilters, ApplicationNote, ApplicationStatus, CreateNoteRequest,
    DashboardStats, NoteType, Priority, Role, User,
};
use crate::repositories::{AdminRepository, ApplicationRepository};
use crate::services::AuthService;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// An application together with its notes, as shown in the details view.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationDetails {
    pub application: Application,
    pub notes: Vec<ApplicationNote>,
}

#[async_trait]
pub trait AdminService: Send + Sync {
    async fn list_applications(&self, filters: &ApplicationFilters) -> PortalApiResult<Vec<Application>>;

    async fn application_details(&self, id: &str) -> PortalApiResult<ApplicationDetails>;

    /// `status` is the wire name, e.g. `in_review`.
    async fn update_status(&self, id: &str, status: &str) -> PortalApiResult<()>;

    async fn update_priority(&self, id: &str, priority: Priority) -> PortalApiResult<Application>;

    async fn assign_manager(&self, id: &str, manager_id: &str) -> PortalApiResult<()>;

    async fn add_internal_note(&self, id: &str, content: &str) -> PortalApiResult<()>;

    async fn reset_to_draft(&self, id: &str) -> PortalApiResult<()>;

    async fn list_users(&self, role: Option<Role>) -> PortalApiResult<Vec<User>>;

    async fn update_user_role(&self, user_id: &str, role: Role) -> PortalApiResult<()>;

    async fn dashboard_stats(&self) -> PortalApiResult<DashboardStats>;

    /// Notes ordered pinned first, then newest first.
    async fn notes(&self, application_id: &str) -> PortalApiResult<Vec<ApplicationNote>>;

    async fn create_note(
        &self,
        application_id: &str,
        content: &str,
        note_type: NoteType,
    ) -> PortalApiResult<ApplicationNote>;

    async fn update_note(
        &self,
        note_id: &str,
        content: &str,
        note_type: NoteType,
    ) -> PortalApiResult<ApplicationNote>;

    async fn delete_note(&self, note_id: &str) -> PortalApiResult<()>;

    async fn toggle_note_pin(&self, note_id: &str) -> PortalApiResult<ApplicationNote>;
}

pub struct AdminServiceImpl {
    admin: Arc<dyn AdminRepository>,
    applications: Arc<dyn ApplicationRepository>,
    auth: Arc<dyn AuthService>,
}

impl AdminServiceImpl {
    pub fn new(
        admin: Arc<dyn AdminRepository>,
        applications: Arc<dyn ApplicationRepository>,
        auth: Arc<dyn AuthService>,
    ) -> Self {
        Self {
            admin,
            applications,
            auth,
        }
    }

    async fn require_role(&self, allowed: &[Role]) -> PortalApiResult<User> {
        let user = self
            .auth
            .current_user()
            .await
            .ok_or(PortalApiError::Unauthorized)?;

        if !allowed.contains(&user.role) {
            tracing::warn!("Role {} denied for admin operation", user.role);
            return Err(PortalApiError::Forbidden(format!(
                "Role '{}' may not perform this operation",
                user.role
            )));
        }
        Ok(user)
    }

    async fn require_staff(&self) -> PortalApiResult<User> {
        self.require_role(&[Role::Manager, Role::Admin]).await
    }

    async fn require_admin(&self) -> PortalApiResult<User> {
        self.require_role(&[Role::Admin]).await
    }

    fn validate_id(id: &str) -> PortalApiResult<()> {
        if id.trim().is_empty() {
            return Err(PortalApiError::InvalidRequest("ID cannot be empty".to_string()));
        }
        Ok(())
    }

    fn validate_note_content(content: &str) -> PortalApiResult<()> {
        if content.trim().is_empty() {
            return Err(PortalApiError::InvalidRequest(
                "Note content cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl AdminService for AdminServiceImpl {
    async fn list_applications(&self, filters: &ApplicationFilters) -> PortalApiResult<Vec<Application>> {
        self.require_staff().await?;
        self.admin.list_applications(filters).await
    }

    async fn application_details(&self, id: &str) -> PortalApiResult<ApplicationDetails> {
        self.require_staff().await?;
        Self::validate_id(id)?;

        let (application, mut notes) = futures::try_join!(
            self.admin.get_application(id),
            self.applications.notes(id)
        )?;
        sort_for_display(&mut notes);

        Ok(ApplicationDetails { application, notes })
    }

    async fn update_status(&self, id: &str, status: &str) -> PortalApiResult<()> {
        self.require_staff().await?;
        Self::validate_id(id)?;
        let status = status
            .parse::<ApplicationStatus>()
            .map_err(|e| PortalApiError::InvalidRequest(e.to_string()))?;

        tracing::info!("Updating application {} to {}", id, status.as_str());
        self.admin.update_status(id, status).await
    }

    async fn update_priority(&self, id: &str, priority: Priority) -> PortalApiResult<Application> {
        self.require_staff().await?;
        Self::validate_id(id)?;
        self.applications.update_priority(id, priority).await
    }

    async fn assign_manager(&self, id: &str, manager_id: &str) -> PortalApiResult<()> {
        self.require_staff().await?;
        Self::validate_id(id)?;
        Self::validate_id(manager_id)?;
        self.admin.assign_manager(id, manager_id).await
    }

    async fn add_internal_note(&self, id: &str, content: &str) -> PortalApiResult<()> {
        self.require_staff().await?;
        Self::validate_id(id)?;
        Self::validate_note_content(content)?;

        let request = CreateNoteRequest {
            content: content.to_string(),
            note_type: NoteType::Internal,
        };
        self.admin.add_internal_note(id, &request).await
    }

    async fn reset_to_draft(&self, id: &str) -> PortalApiResult<()> {
        self.require_staff().await?;
        Self::validate_id(id)?;
        self.admin.reset_to_draft(id).await
    }

    async fn list_users(&self, role: Option<Role>) -> PortalApiResult<Vec<User>> {
        self.require_admin().await?;
        self.admin.list_users(role).await
    }

    async fn update_user_role(&self, user_id: &str, role: Role) -> PortalApiResult<()> {
        let admin = self.require_admin().await?;
        Self::validate_id(user_id)?;
        if role == Role::Unknown {
            return Err(PortalApiError::InvalidRequest(
                "Cannot assign an unknown role".to_string(),
            ));
        }

        tracing::info!("{} sets role of {} to {}", admin.email, user_id, role);
        self.admin.update_user_role(user_id, role).await
    }

    async fn dashboard_stats(&self) -> PortalApiResult<DashboardStats> {
        self.require_staff().await?;
        self.admin.dashboard_stats().await
    }

    async fn notes(&self, application_id: &str) -> PortalApiResult<Vec<ApplicationNote>> {
        self.require_staff().await?;
        Self::validate_id(application_id)?;
        let mut notes = self.applications.notes(application_id).await?;
        sort_for_display(&mut notes);
        Ok(notes)
    }

    async fn create_note(
        &self,
        application_id: &str,
        content: &str,
        note_type: NoteType,
    ) -> PortalApiResult<ApplicationNote> {
        self.require_staff().await?;
        Self::validate_id(application_id)?;
        Self::validate_note_content(content)?;

        let request = CreateNoteRequest {
            content: content.to_string(),
            note_type,
        };
        self.applications.create_note(application_id, &request).await
    }

    async fn update_note(
        &self,
        note_id: &str,
        content: &str,
        note_type: NoteType,
    ) -> PortalApiResult<ApplicationNote> {
        self.require_staff().await?;
        Self::validate_id(note_id)?;
        Self::validate_note_content(content)?;

        let request = CreateNoteRequest {
            content: content.to_string(),
            note_type,
        };
        self.applications.update_note(note_id, &request).await
    }

    async fn delete_note(&self, note_id: &str) -> PortalApiResult<()> {
        let user = self.require_staff().await?;
        Self::validate_id(note_id)?;

        tracing::info!("{} deletes note {}", user.email, note_id);
        self.applications.delete_note(note_id).await
    }

    async fn toggle_note_pin(&self, note_id: &str) -> PortalApiResult<ApplicationNote> {
        self.require_staff().await?;
        Self::validate_id(note_id)?;
        self.applications.toggle_note_pin(note_id).await
    }
}
