use crate::client::AsyncPortalClient;
use crate::error::PortalApiResult;
use crate::models::{
    Application, ApplicationFilters, ApplicationNote, CreateApplicationRequest, CreateNoteRequest,
    Priority,
};
use crate::repositories::traits::ApplicationRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Application repository implementation using the portal API client.
///
/// Delegates every call to the AsyncPortalClient, keeping services unaware
/// of HTTP.
pub struct PortalApplicationRepository {
    client: Arc<dyn AsyncPortalClient>,
}

impl PortalApplicationRepository {
    pub fn new(client: Arc<dyn AsyncPortalClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ApplicationRepository for PortalApplicationRepository {
    async fn list(&self, filters: &ApplicationFilters) -> PortalApiResult<Vec<Application>> {
        self.client.get_applications(filters).await
    }

    async fn get(&self, id: &str) -> PortalApiResult<Application> {
        self.client.get_application(id).await
    }

    async fn create(&self, request: &CreateApplicationRequest) -> PortalApiResult<Application> {
        self.client.create_application(request).await
    }

    async fn update(&self, id: &str, request: &CreateApplicationRequest) -> PortalApiResult<Application> {
        self.client.update_application(id, request).await
    }

    async fn update_priority(&self, id: &str, priority: Priority) -> PortalApiResult<Application> {
        self.client.update_application_priority(id, priority).await
    }

    async fn delete(&self, id: &str) -> PortalApiResult<()> {
        self.client.delete_application(id).await
    }

    async fn submit(&self, id: &str) -> PortalApiResult<Application> {
        self.client.submit_application(id).await
    }

    async fn notes(&self, application_id: &str) -> PortalApiResult<Vec<ApplicationNote>> {
        self.client.get_application_notes(application_id).await
    }

    async fn create_note(
        &self,
        application_id: &str,
        request: &CreateNoteRequest,
    ) -> PortalApiResult<ApplicationNote> {
        self.client.create_note(application_id, request).await
    }

    async fn update_note(&self, note_id: &str, request: &CreateNoteRequest) -> PortalApiResult<ApplicationNote> {
        self.client.update_note(note_id, request).await
    }

    async fn delete_note(&self, note_id: &str) -> PortalApiResult<()> {
        self.client.delete_note(note_id).await
    }

    async fn toggle_note_pin(&self, note_id: &str) -> PortalApiResult<ApplicationNote> {
        self.client.toggle_note_pin(note_id).await
    }
}
