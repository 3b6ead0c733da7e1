use async_trait::async_trait;
use portal_mcp_server::error::{PortalApiError, PortalApiResult};
use portal_mcp_server::models::{
    Application, ApplicationFilters, ApplicationNote, ApplicationStatus, CreateApplicationRequest,
    CreateNoteRequest, Priority,
};
use portal_mcp_server::repositories::ApplicationRepository;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Mock application repository for testing.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockApplicationRepository {
    applications: Arc<Mutex<Vec<Application>>>,
    notes: Arc<Mutex<HashMap<String, ApplicationNote>>>,
    failure: Arc<Mutex<Option<String>>>,
    next_id: Arc<AtomicUsize>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockApplicationRepository {
    pub fn new() -> Self {
        Self {
            applications: Arc::new(Mutex::new(Vec::new())),
            notes: Arc::new(Mutex::new(HashMap::new())),
            failure: Arc::new(Mutex::new(None)),
            next_id: Arc::new(AtomicUsize::new(1)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn add_application(&self, application: Application) {
        self.applications.lock().unwrap().push(application);
    }

    pub fn add_note(&self, note: ApplicationNote) {
        self.notes.lock().unwrap().insert(note.id.clone(), note);
    }

    /// Make every following call fail with a 500 carrying `message`.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
    }

    pub fn stored(&self, id: &str) -> Option<Application> {
        self.applications
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned()
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) -> PortalApiResult<()> {
        {
            let mut counts = self.call_counts.lock().unwrap();
            *counts.entry(method.to_string()).or_insert(0) += 1;
        }
        match self.failure.lock().unwrap().as_ref() {
            Some(message) => Err(PortalApiError::ApiError {
                status: 500,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn not_found(id: &str) -> PortalApiError {
        PortalApiError::NotFound(format!("Application {} not found", id))
    }

    fn from_request(id: String, request: &CreateApplicationRequest) -> Application {
        Application {
            id,
            title: request.title.clone(),
            description: request.description.clone(),
            service_type: request.service_type,
            status: ApplicationStatus::Draft,
            priority: request.priority,
            contact_full_name: request.contact_full_name.clone(),
            contact_email: request.contact_email.clone(),
            contact_phone: request.contact_phone.clone(),
            company_name: request.company_name.clone(),
            budget_range: request.budget_range,
            ..Default::default()
        }
    }
}

impl Default for MockApplicationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ApplicationRepository for MockApplicationRepository {
    async fn list(&self, filters: &ApplicationFilters) -> PortalApiResult<Vec<Application>> {
        self.track_call("list")?;

        let applications = self.applications.lock().unwrap();
        Ok(applications
            .iter()
            .filter(|a| filters.status.map_or(true, |s| a.status == s))
            .filter(|a| filters.service_type.map_or(true, |t| a.service_type == Some(t)))
            .cloned()
            .collect())
    }

    async fn get(&self, id: &str) -> PortalApiResult<Application> {
        self.track_call("get")?;
        self.stored(id).ok_or_else(|| Self::not_found(id))
    }

    async fn create(&self, request: &CreateApplicationRequest) -> PortalApiResult<Application> {
        self.track_call("create")?;

        let id = format!("app-{}", self.next_id.fetch_add(1, Ordering::Relaxed));
        let application = Self::from_request(id, request);
        self.add_application(application.clone());
        Ok(application)
    }

    async fn update(&self, id: &str, request: &CreateApplicationRequest) -> PortalApiResult<Application> {
        self.track_call("update")?;

        let mut applications = self.applications.lock().unwrap();
        let existing = applications
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        let status = existing.status;
        *existing = Self::from_request(id.to_string(), request);
        existing.status = status;
        Ok(existing.clone())
    }

    async fn update_priority(&self, id: &str, priority: Priority) -> PortalApiResult<Application> {
        self.track_call("update_priority")?;

        let mut applications = self.applications.lock().unwrap();
        let existing = applications
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        existing.priority = Some(priority);
        Ok(existing.clone())
    }

    async fn delete(&self, id: &str) -> PortalApiResult<()> {
        self.track_call("delete")?;

        let mut applications = self.applications.lock().unwrap();
        let before = applications.len();
        applications.retain(|a| a.id != id);
        if applications.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }

    async fn submit(&self, id: &str) -> PortalApiResult<Application> {
        self.track_call("submit")?;

        let mut applications = self.applications.lock().unwrap();
        let existing = applications
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        existing.status = ApplicationStatus::Submitted;
        existing.status_display = Some("Отправлена".to_string());

        // The backend answers with the status fields only.
        Ok(Application {
            id: existing.id.clone(),
            status: existing.status,
            status_display: existing.status_display.clone(),
            ..Default::default()
        })
    }

    async fn notes(&self, application_id: &str) -> PortalApiResult<Vec<ApplicationNote>> {
        self.track_call("notes")?;

        let notes = self.notes.lock().unwrap();
        Ok(notes
            .values()
            .filter(|n| n.application_id == application_id)
            .cloned()
            .collect())
    }

    async fn create_note(
        &self,
        application_id: &str,
        request: &CreateNoteRequest,
    ) -> PortalApiResult<ApplicationNote> {
        self.track_call("create_note")?;

        let note = ApplicationNote {
            id: format!("note-{}", self.next_id.fetch_add(1, Ordering::Relaxed)),
            application_id: application_id.to_string(),
            content: request.content.clone(),
            note_type: request.note_type,
            ..Default::default()
        };
        self.add_note(note.clone());
        Ok(note)
    }

    async fn update_note(&self, note_id: &str, request: &CreateNoteRequest) -> PortalApiResult<ApplicationNote> {
        self.track_call("update_note")?;

        let mut notes = self.notes.lock().unwrap();
        let note = notes
            .get_mut(note_id)
            .ok_or_else(|| PortalApiError::NotFound(format!("Note {} not found", note_id)))?;
        note.content = request.content.clone();
        note.note_type = request.note_type;
        Ok(note.clone())
    }

    async fn delete_note(&self, note_id: &str) -> PortalApiResult<()> {
        self.track_call("delete_note")?;

        self.notes
            .lock()
            .unwrap()
            .remove(note_id)
            .map(|_| ())
            .ok_or_else(|| PortalApiError::NotFound(format!("Note {} not found", note_id)))
    }

    async fn toggle_note_pin(&self, note_id: &str) -> PortalApiResult<ApplicationNote> {
        self.track_call("toggle_note_pin")?;

        let mut notes = self.notes.lock().unwrap();
        let note = notes
            .get_mut(note_id)
            .ok_or_else(|| PortalApiError::NotFound(format!("Note {} not found", note_id)))?;
        note.is_pinned = !note.is_pinned;
        Ok(note.clone())
    }
}
