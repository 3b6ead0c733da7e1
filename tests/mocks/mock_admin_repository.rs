use async_trait::async_trait;
use portal_mcp_server::error::{PortalApiError, PortalApiResult};
use portal_mcp_server::models::{
    Application, ApplicationFilters, ApplicationStatus, CreateNoteRequest, DashboardStats,
    Role, StatusCount, User,
};
use portal_mcp_server::repositories::AdminRepository;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock admin repository for testing.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockAdminRepository {
    applications: Arc<Mutex<Vec<Application>>>,
    users: Arc<Mutex<Vec<User>>>,
    internal_notes: Arc<Mutex<Vec<(String, CreateNoteRequest)>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockAdminRepository {
    pub fn new() -> Self {
        Self {
            applications: Arc::new(Mutex::new(Vec::new())),
            users: Arc::new(Mutex::new(Vec::new())),
            internal_notes: Arc::new(Mutex::new(Vec::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn add_application(&self, application: Application) {
        self.applications.lock().unwrap().push(application);
    }

    pub fn add_user(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }

    pub fn application(&self, id: &str) -> Option<Application> {
        self.applications
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned()
    }

    pub fn user(&self, id: &str) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }

    pub fn internal_notes(&self) -> Vec<(String, CreateNoteRequest)> {
        self.internal_notes.lock().unwrap().clone()
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

    fn with_application<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut Application) -> T,
    ) -> PortalApiResult<T> {
        let mut applications = self.applications.lock().unwrap();
        applications
            .iter_mut()
            .find(|a| a.id == id)
            .map(f)
            .ok_or_else(|| PortalApiError::NotFound(format!("Application {} not found", id)))
    }
}

impl Default for MockAdminRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AdminRepository for MockAdminRepository {
    async fn list_applications(&self, filters: &ApplicationFilters) -> PortalApiResult<Vec<Application>> {
        self.track_call("list_applications");

        let applications = self.applications.lock().unwrap();
        Ok(applications
            .iter()
            .filter(|a| filters.status.map_or(true, |s| a.status == s))
            .cloned()
            .collect())
    }

    async fn get_application(&self, id: &str) -> PortalApiResult<Application> {
        self.track_call("get_application");
        self.with_application(id, |a| a.clone())
    }

    async fn update_status(&self, id: &str, status: ApplicationStatus) -> PortalApiResult<()> {
        self.track_call("update_status");
        self.with_application(id, |a| a.status = status)
    }

    async fn assign_manager(&self, id: &str, manager_id: &str) -> PortalApiResult<()> {
        self.track_call("assign_manager");
        self.with_application(id, |a| a.manager_id = Some(manager_id.to_string()))
    }

    async fn add_internal_note(&self, id: &str, request: &CreateNoteRequest) -> PortalApiResult<()> {
        self.track_call("add_internal_note");
        self.with_application(id, |_| ())?;
        self.internal_notes
            .lock()
            .unwrap()
            .push((id.to_string(), request.clone()));
        Ok(())
    }

    async fn reset_to_draft(&self, id: &str) -> PortalApiResult<()> {
        self.track_call("reset_to_draft");
        self.with_application(id, |a| a.status = ApplicationStatus::Draft)
    }

    async fn list_users(&self, role: Option<Role>) -> PortalApiResult<Vec<User>> {
        self.track_call("list_users");

        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .filter(|u| role.map_or(true, |r| u.role == r))
            .cloned()
            .collect())
    }

    async fn update_user_role(&self, user_id: &str, role: Role) -> PortalApiResult<()> {
        self.track_call("update_user_role");

        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| PortalApiError::NotFound(format!("User {} not found", user_id)))?;
        user.role = role;
        Ok(())
    }

    async fn dashboard_stats(&self) -> PortalApiResult<DashboardStats> {
        self.track_call("dashboard_stats");

        let applications = self.applications.lock().unwrap();
        let mut counts: HashMap<ApplicationStatus, u64> = HashMap::new();
        for application in applications.iter() {
            *counts.entry(application.status).or_insert(0) += 1;
        }
        Ok(DashboardStats {
            total_applications: applications.len() as u64,
            total_users: Some(self.users.lock().unwrap().len() as u64),
            application_statuses: counts
                .into_iter()
                .map(|(status, count)| StatusCount {
                    status,
                    status_display: None,
                    count,
                })
                .collect(),
            service_types: Vec::new(),
        })
    }
}
