//! HTTP client for the portal REST API.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. Every response arrives wrapped in the
//! `{ success, message, data, errors }` envelope, which the client unwraps before
//! handing typed models back to callers.

mod async_wrapper;
pub use async_wrapper::{AsyncPortalClient, AsyncPortalClientImpl};

use crate::config::Config;
use crate::error::{PortalApiError, PortalApiResult};
use crate::metrics::{HttpTimer, Metrics};
use crate::models::{
    ApiResponse, Application, ApplicationFilters, ApplicationNote, ApplicationStatus,
    AuthPayload, ChangePasswordRequest, CreateApplicationRequest, CreateNoteRequest,
    DashboardStats, LoginRequest, Notification, Priority, ProfileUpdateRequest,
    RegisterRequest, Role, User,
};
use crate::session::SessionStore;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct UserPayload {
    user: User,
}

#[derive(Debug, Deserialize)]
struct UsersPayload {
    #[serde(default)]
    users: Vec<User>,
}

#[derive(Debug, Deserialize)]
struct ApplicationPayload {
    application: Application,
}

#[derive(Debug, Deserialize)]
struct ApplicationsPayload {
    #[serde(default)]
    applications: Vec<Application>,
}

#[derive(Debug, Deserialize)]
struct NotePayload {
    note: ApplicationNote,
}

#[derive(Debug, Deserialize)]
struct NotesPayload {
    #[serde(default)]
    notes: Vec<ApplicationNote>,
}

#[derive(Debug, Deserialize)]
struct NotificationsPayload {
    #[serde(default)]
    notifications: Vec<Notification>,
}

#[derive(Debug, Deserialize)]
struct UnreadCountPayload {
    #[serde(alias = "unreadCount")]
    count: u64,
}

/// HTTP client for the portal backend.
///
/// Requests carry `Authorization: Bearer <token>` whenever the shared
/// [`SessionStore`] holds a session.
#[derive(Clone)]
pub struct PortalClient {
    base_url: String,
    agent: Arc<ureq::Agent>,
    session: Arc<SessionStore>,
    metrics: Metrics,
}

impl PortalClient {
    pub fn new(config: &Config, session: Arc<SessionStore>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.portal_api_url.clone(),
            agent: Arc::new(agent),
            session,
            metrics: Metrics::new(),
        }
    }

    /// Create a client with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, session: Arc<SessionStore>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            agent: Arc::new(agent),
            session,
            metrics: Metrics::new(),
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Append URL-encoded query pairs to a path.
    fn with_query(path: &str, pairs: &[(&str, String)]) -> String {
        if pairs.is_empty() {
            return path.to_string();
        }
        let query = pairs
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", path, query)
    }

    fn send(&self, method: &str, path: &str, body: Option<&Value>) -> PortalApiResult<ureq::Response> {
        let url = self.build_url(path);
        let timer = HttpTimer::new(self.metrics.clone());
        tracing::debug!("{} {}", method, url);

        let mut request = self
            .agent
            .request(method, &url)
            .set("Content-Type", "application/json");
        if let Some(token) = self.session.access_token() {
            request = request.set("Authorization", &format!("Bearer {}", token));
        }

        let result = match body {
            Some(body) => request.send_json(body),
            None => request.call(),
        }
        .map_err(|e| self.map_error(e));

        match &result {
            Ok(response) => {
                tracing::debug!("{} {} - Success (status: {})", method, url, response.status());
                timer.complete();
            }
            Err(e) => {
                tracing::error!("{} {} - Error: {:?}", method, url, e);
                timer.complete_with_error();
            }
        }

        result
    }

    fn get(&self, path: &str) -> PortalApiResult<ureq::Response> {
        self.send("GET", path, None)
    }

    fn post(&self, path: &str, body: Option<&Value>) -> PortalApiResult<ureq::Response> {
        self.send("POST", path, body)
    }

    fn put(&self, path: &str, body: &Value) -> PortalApiResult<ureq::Response> {
        self.send("PUT", path, Some(body))
    }

    fn patch(&self, path: &str) -> PortalApiResult<ureq::Response> {
        self.send("PATCH", path, None)
    }

    fn delete(&self, path: &str) -> PortalApiResult<ureq::Response> {
        self.send("DELETE", path, None)
    }

    /// Map a ureq error to a PortalApiError, reading the envelope from
    /// error bodies when the backend sent one.
    fn map_error(&self, error: ureq::Error) -> PortalApiError {
        match error {
            ureq::Error::Status(code, response) => {
                let raw = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());
                let envelope = serde_json::from_str::<ApiResponse<Value>>(&raw).ok();
                let field_errors = envelope
                    .as_ref()
                    .map(|e| e.error_messages())
                    .unwrap_or_default();
                let message = envelope
                    .and_then(|e| e.message)
                    .unwrap_or(raw);

                match code {
                    400 | 422 if !field_errors.is_empty() => {
                        PortalApiError::Validation(field_errors)
                    }
                    401 => PortalApiError::Unauthorized,
                    403 => PortalApiError::Forbidden(message),
                    404 => PortalApiError::NotFound(message),
                    429 => PortalApiError::RateLimitExceeded,
                    _ => PortalApiError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    PortalApiError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    PortalApiError::Timeout
                } else {
                    PortalApiError::HttpError(transport.to_string())
                }
            }
        }
    }

    fn read_envelope<T: DeserializeOwned>(response: ureq::Response) -> PortalApiResult<ApiResponse<T>> {
        let body = response
            .into_string()
            .map_err(|e| PortalApiError::HttpError(e.to_string()))?;
        Ok(serde_json::from_str(&body)?)
    }

    fn read_data<T: DeserializeOwned>(response: ureq::Response) -> PortalApiResult<T> {
        Self::read_envelope::<T>(response)?.into_data()
    }

    /// For endpoints whose payload is ignored. An empty body counts as success.
    fn read_unit(response: ureq::Response) -> PortalApiResult<()> {
        let body = response
            .into_string()
            .map_err(|e| PortalApiError::HttpError(e.to_string()))?;
        if body.trim().is_empty() {
            return Ok(());
        }
        serde_json::from_str::<ApiResponse<Value>>(&body)?.into_unit()
    }

    // ========================= Auth =========================

    pub fn register(&self, request: &RegisterRequest) -> PortalApiResult<AuthPayload> {
        let body = serde_json::to_value(request)?;
        let response = self.post("/auth/register", Some(&body))?;
        Self::read_data(response)
    }

    pub fn login(&self, request: &LoginRequest) -> PortalApiResult<AuthPayload> {
        let body = serde_json::to_value(request)?;
        let response = self.post("/auth/login", Some(&body))?;
        Self::read_data(response)
    }

    pub fn logout(&self) -> PortalApiResult<()> {
        let response = self.post("/auth/logout", None)?;
        Self::read_unit(response)
    }

    pub fn get_profile(&self) -> PortalApiResult<User> {
        let response = self.get("/auth/profile")?;
        Self::read_data::<UserPayload>(response).map(|p| p.user)
    }

    pub fn update_profile(&self, request: &ProfileUpdateRequest) -> PortalApiResult<User> {
        let body = serde_json::to_value(request)?;
        let response = self.put("/auth/profile", &body)?;
        Self::read_data::<UserPayload>(response).map(|p| p.user)
    }

    pub fn change_password(&self, request: &ChangePasswordRequest) -> PortalApiResult<()> {
        let body = serde_json::to_value(request)?;
        let response = self.put("/auth/change-password", &body)?;
        Self::read_unit(response)
    }

    pub fn forgot_password(&self, email: &str) -> PortalApiResult<()> {
        let body = json!({ "email": email });
        let response = self.post("/auth/forgot-password", Some(&body))?;
        Self::read_unit(response)
    }

    // ========================= Applications =========================

    pub fn get_applications(&self, filters: &ApplicationFilters) -> PortalApiResult<Vec<Application>> {
        let path = Self::with_query("/applications", &filters.to_query_pairs());
        let response = self.get(&path)?;
        let applications = Self::read_data::<ApplicationsPayload>(response)?.applications;
        self.metrics.record_applications_fetched(applications.len());
        Ok(applications)
    }

    pub fn get_application(&self, id: &str) -> PortalApiResult<Application> {
        let response = self.get(&format!("/applications/{}", urlencoding::encode(id)))?;
        let application = Self::read_data::<ApplicationPayload>(response)?.application;
        self.metrics.record_applications_fetched(1);
        Ok(application)
    }

    pub fn create_application(&self, request: &CreateApplicationRequest) -> PortalApiResult<Application> {
        tracing::info!("Creating application: {}", request.title);
        let body = serde_json::to_value(request)?;
        let response = self.post("/applications", Some(&body))?;
        Self::read_data::<ApplicationPayload>(response).map(|p| p.application)
    }

    pub fn update_application(
        &self,
        id: &str,
        request: &CreateApplicationRequest,
    ) -> PortalApiResult<Application> {
        let body = serde_json::to_value(request)?;
        let response = self.put(&format!("/applications/{}", urlencoding::encode(id)), &body)?;
        Self::read_data::<ApplicationPayload>(response).map(|p| p.application)
    }

    /// Partial update carrying only the priority.
    pub fn update_application_priority(
        &self,
        id: &str,
        priority: Priority,
    ) -> PortalApiResult<Application> {
        let body = json!({ "priority": priority });
        let response = self.put(&format!("/applications/{}", urlencoding::encode(id)), &body)?;
        Self::read_data::<ApplicationPayload>(response).map(|p| p.application)
    }

    pub fn delete_application(&self, id: &str) -> PortalApiResult<()> {
        let response = self.delete(&format!("/applications/{}", urlencoding::encode(id)))?;
        Self::read_unit(response)
    }

    pub fn submit_application(&self, id: &str) -> PortalApiResult<Application> {
        let response = self.post(
            &format!("/applications/{}/submit", urlencoding::encode(id)),
            None,
        )?;
        Self::read_data::<ApplicationPayload>(response).map(|p| p.application)
    }

    // ========================= Notes =========================

    pub fn get_application_notes(&self, application_id: &str) -> PortalApiResult<Vec<ApplicationNote>> {
        let response = self.get(
            &format!("/applications/{}/notes", urlencoding::encode(application_id)),
        )?;
        let notes = Self::read_data::<NotesPayload>(response)?.notes;
        self.metrics.record_notes_fetched(notes.len());
        Ok(notes)
    }

    pub fn create_note(
        &self,
        application_id: &str,
        request: &CreateNoteRequest,
    ) -> PortalApiResult<ApplicationNote> {
        let body = serde_json::to_value(request)?;
        let response = self.post(
            &format!("/applications/{}/notes", urlencoding::encode(application_id)),
            Some(&body),
        )?;
        Self::read_data::<NotePayload>(response).map(|p| p.note)
    }

    pub fn update_note(&self, note_id: &str, request: &CreateNoteRequest) -> PortalApiResult<ApplicationNote> {
        let body = serde_json::to_value(request)?;
        let response = self.put(&format!("/notes/{}", urlencoding::encode(note_id)), &body)?;
        Self::read_data::<NotePayload>(response).map(|p| p.note)
    }

    pub fn delete_note(&self, note_id: &str) -> PortalApiResult<()> {
        let response = self.delete(&format!("/notes/{}", urlencoding::encode(note_id)))?;
        Self::read_unit(response)
    }

    /// Flip the pinned flag; the backend returns the updated note.
    pub fn toggle_note_pin(&self, note_id: &str) -> PortalApiResult<ApplicationNote> {
        let response = self.post(&format!("/notes/{}/pin", urlencoding::encode(note_id)), None)?;
        Self::read_data::<NotePayload>(response).map(|p| p.note)
    }

    // ========================= Admin =========================

    pub fn admin_get_applications(
        &self,
        filters: &ApplicationFilters,
    ) -> PortalApiResult<Vec<Application>> {
        let path = Self::with_query("/admin/applications", &filters.to_query_pairs());
        let response = self.get(&path)?;
        let applications = Self::read_data::<ApplicationsPayload>(response)?.applications;
        self.metrics.record_applications_fetched(applications.len());
        Ok(applications)
    }

    /// Details arrive either wrapped as `{ application }` or as the bare object.
    pub fn admin_get_application(&self, id: &str) -> PortalApiResult<Application> {
        let response = self.get(&format!("/admin/applications/{}", urlencoding::encode(id)))?;
        let data: Value = Self::read_data(response)?;
        let application = match data {
            Value::Object(mut map) if map.contains_key("application") => {
                serde_json::from_value(map.remove("application").unwrap_or_default())?
            }
            other => serde_json::from_value(other)?,
        };
        self.metrics.record_applications_fetched(1);
        Ok(application)
    }

    pub fn admin_update_status(&self, id: &str, status: ApplicationStatus) -> PortalApiResult<()> {
        let body = json!({ "status": status });
        let response = self.put(
            &format!("/admin/applications/{}/status", urlencoding::encode(id)),
            &body,
        )?;
        Self::read_unit(response)
    }

    pub fn admin_assign_manager(&self, id: &str, manager_id: &str) -> PortalApiResult<()> {
        let body = json!({ "managerId": manager_id });
        let response = self.put(
            &format!("/admin/applications/{}/assign", urlencoding::encode(id)),
            &body,
        )?;
        Self::read_unit(response)
    }

    pub fn admin_add_note(&self, id: &str, request: &CreateNoteRequest) -> PortalApiResult<()> {
        let body = serde_json::to_value(request)?;
        let response = self.post(
            &format!("/admin/applications/{}/notes", urlencoding::encode(id)),
            Some(&body),
        )?;
        Self::read_unit(response)
    }

    pub fn admin_reset_to_draft(&self, id: &str) -> PortalApiResult<()> {
        let response = self.post(
            &format!("/admin/applications/{}/reset-to-draft", urlencoding::encode(id)),
            None,
        )?;
        Self::read_unit(response)
    }

    pub fn admin_get_users(&self, role: Option<Role>) -> PortalApiResult<Vec<User>> {
        let pairs: Vec<(&str, String)> = role
            .map(|r| vec![("role", r.as_str().to_string())])
            .unwrap_or_default();
        let response = self.get(&Self::with_query("/admin/users", &pairs))?;
        let users = Self::read_data::<UsersPayload>(response)?.users;
        self.metrics.record_users_fetched(users.len());
        Ok(users)
    }

    pub fn admin_update_user_role(&self, user_id: &str, role: Role) -> PortalApiResult<()> {
        let body = json!({ "role": role });
        let response = self.put(
            &format!("/admin/users/{}/role", urlencoding::encode(user_id)),
            &body,
        )?;
        Self::read_unit(response)
    }

    pub fn admin_dashboard_stats(&self) -> PortalApiResult<DashboardStats> {
        let response = self.get("/admin/stats/dashboard")?;
        Self::read_data(response)
    }

    // ========================= Notifications =========================

    pub fn get_notifications(&self, unread_only: bool) -> PortalApiResult<Vec<Notification>> {
        let pairs: Vec<(&str, String)> = if unread_only {
            vec![("unread_only", "true".to_string())]
        } else {
            Vec::new()
        };
        let response = self.get(&Self::with_query("/notifications", &pairs))?;
        Self::read_data::<NotificationsPayload>(response).map(|p| p.notifications)
    }

    pub fn get_unread_count(&self) -> PortalApiResult<u64> {
        let response = self.get("/notifications/unread-count")?;
        Self::read_data::<UnreadCountPayload>(response).map(|p| p.count)
    }

    pub fn mark_notification_read(&self, id: &str) -> PortalApiResult<()> {
        let response = self.patch(&format!("/notifications/{}/read", urlencoding::encode(id)))?;
        Self::read_unit(response)
    }

    pub fn mark_all_notifications_read(&self) -> PortalApiResult<()> {
        let response = self.patch("/notifications/mark-all-read")?;
        Self::read_unit(response)
    }

    pub fn delete_notification(&self, id: &str) -> PortalApiResult<()> {
        let response = self.delete(&format!("/notifications/{}", urlencoding::encode(id)))?;
        Self::read_unit(response)
    }
}
