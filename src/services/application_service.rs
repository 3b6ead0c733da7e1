//! Application service layer.
//!
//! Mirrors the client's list of applications in memory so callers can read
//! it back without another round trip. Every mutation that succeeds on the
//! backend is applied to the cached list; failures leave the list untouched
//! and record the message.

use crate::error::{PortalApiError, PortalApiResult};
use crate::models::{Application, ApplicationFilters, CreateApplicationRequest};
use crate::repositories::ApplicationRepository;
use crate::validation::validate_application_data;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

#[async_trait]
pub trait ApplicationService: Send + Sync {
    /// Load applications matching `filters`, replacing the cached list.
    async fn fetch(&self, filters: &ApplicationFilters) -> PortalApiResult<Vec<Application>>;

    async fn get(&self, id: &str) -> PortalApiResult<Application>;

    async fn create(&self, request: &CreateApplicationRequest) -> PortalApiResult<Application>;

    async fn update(&self, id: &str, request: &CreateApplicationRequest) -> PortalApiResult<Application>;

    async fn delete(&self, id: &str) -> PortalApiResult<()>;

    /// Submit a draft. Only status fields of the cached entry change.
    async fn submit(&self, id: &str) -> PortalApiResult<Application>;

    async fn applications(&self) -> Vec<Application>;

    /// Message of the most recent failed operation, cleared on the next call.
    async fn last_error(&self) -> Option<String>;
}

#[derive(Default)]
struct ApplicationsState {
    applications: Vec<Application>,
    last_error: Option<String>,
}

pub struct ApplicationServiceImpl {
    repository: Arc<dyn ApplicationRepository>,
    state: RwLock<ApplicationsState>,
}

impl ApplicationServiceImpl {
    pub fn new(repository: Arc<dyn ApplicationRepository>) -> Self {
        Self {
            repository,
            state: RwLock::new(ApplicationsState::default()),
        }
    }

    fn validate_id(id: &str) -> PortalApiResult<()> {
        if id.trim().is_empty() {
            return Err(PortalApiError::InvalidRequest(
                "Application ID cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Record the outcome of an operation in `last_error`.
    async fn track<T>(&self, result: PortalApiResult<T>) -> PortalApiResult<T> {
        let mut state = self.state.write().await;
        state.last_error = result.as_ref().err().map(|e| e.to_string());
        result
    }
}

#[async_trait]
impl ApplicationService for ApplicationServiceImpl {
    async fn fetch(&self, filters: &ApplicationFilters) -> PortalApiResult<Vec<Application>> {
        let result = self.repository.list(filters).await;
        if let Ok(applications) = &result {
            tracing::debug!("Fetched {} applications", applications.len());
            self.state.write().await.applications = applications.clone();
        }
        self.track(result).await
    }

    async fn get(&self, id: &str) -> PortalApiResult<Application> {
        Self::validate_id(id)?;
        let result = self.repository.get(id).await;
        self.track(result).await
    }

    async fn create(&self, request: &CreateApplicationRequest) -> PortalApiResult<Application> {
        let result = match validate_application_data(request).into_result() {
            Ok(()) => self.repository.create(request).await,
            Err(e) => Err(e),
        };
        if let Ok(created) = &result {
            tracing::info!("Application created: {}", created.id);
            self.state.write().await.applications.push(created.clone());
        }
        self.track(result).await
    }

    async fn update(&self, id: &str, request: &CreateApplicationRequest) -> PortalApiResult<Application> {
        Self::validate_id(id)?;
        let result = match validate_application_data(request).into_result() {
            Ok(()) => self.repository.update(id, request).await,
            Err(e) => Err(e),
        };
        if let Ok(updated) = &result {
            let mut state = self.state.write().await;
            if let Some(existing) = state.applications.iter_mut().find(|a| a.id == id) {
                *existing = updated.clone();
            }
        }
        self.track(result).await
    }

    async fn delete(&self, id: &str) -> PortalApiResult<()> {
        Self::validate_id(id)?;
        let result = self.repository.delete(id).await;
        if result.is_ok() {
            self.state.write().await.applications.retain(|a| a.id != id);
        }
        self.track(result).await
    }

    async fn submit(&self, id: &str) -> PortalApiResult<Application> {
        Self::validate_id(id)?;
        let result = self.repository.submit(id).await;
        if let Ok(submitted) = &result {
            let mut state = self.state.write().await;
            if let Some(existing) = state.applications.iter_mut().find(|a| a.id == id) {
                existing.status = submitted.status;
                existing.status_display = submitted.status_display.clone();
            }
        }
        self.track(result).await
    }

    async fn applications(&self) -> Vec<Application> {
        self.state.read().await.applications.clone()
    }

    async fn last_error(&self) -> Option<String> {
        self.state.read().await.last_error.clone()
    }
}
