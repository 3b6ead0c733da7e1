//! Auth service layer.
//!
//! Owns the signed-in user and keeps the persisted session in step with
//! every backend answer: tokens are written only after a successful login or
//! registration and removed whenever the session turns out to be unusable.

use crate::error::{PortalApiError, PortalApiResult};
use crate::models::{
    ChangePasswordRequest, LoginRequest, ProfileUpdateRequest, RegisterRequest, User,
};
use crate::repositories::AuthRepository;
use crate::session::SessionStore;
use crate::validation::validate_email;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Restore the session from disk and confirm it against the profile
    /// endpoint. Returns the user when the stored session is still valid.
    async fn check_status(&self) -> PortalApiResult<Option<User>>;

    async fn login(&self, email: &str, password: &str) -> PortalApiResult<User>;

    async fn register(&self, request: &RegisterRequest) -> PortalApiResult<User>;

    /// Sign out. Local state is cleared even when the backend call fails.
    async fn logout(&self) -> PortalApiResult<()>;

    async fn update_profile(&self, request: &ProfileUpdateRequest) -> PortalApiResult<User>;

    async fn change_password(&self, request: &ChangePasswordRequest) -> PortalApiResult<()>;

    async fn forgot_password(&self, email: &str) -> PortalApiResult<()>;

    async fn current_user(&self) -> Option<User>;

    async fn is_authenticated(&self) -> bool;
}

pub struct AuthServiceImpl {
    repository: Arc<dyn AuthRepository>,
    session: Arc<SessionStore>,
    user: RwLock<Option<User>>,
}

impl AuthServiceImpl {
    pub fn new(repository: Arc<dyn AuthRepository>, session: Arc<SessionStore>) -> Self {
        Self {
            repository,
            session,
            user: RwLock::new(None),
        }
    }

    async fn drop_session(&self) {
        if let Err(e) = self.session.clear() {
            tracing::warn!("Failed to clear session file: {}", e);
        }
        *self.user.write().await = None;
    }

    fn require_email(email: &str) -> PortalApiResult<()> {
        if validate_email(email) {
            Ok(())
        } else {
            Err(PortalApiError::Validation(vec![
                "Некорректный формат email".to_string(),
            ]))
        }
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn check_status(&self) -> PortalApiResult<Option<User>> {
        let tokens = match self.session.acquire() {
            Ok(tokens) => tokens,
            Err(e) => {
                tracing::warn!("Discarding unreadable session: {}", e);
                self.drop_session().await;
                return Ok(None);
            }
        };

        if tokens.is_none() {
            return Ok(None);
        }

        match self.repository.profile().await {
            Ok(user) => {
                tracing::info!("Session restored for {}", user.email);
                *self.user.write().await = Some(user.clone());
                Ok(Some(user))
            }
            Err(e) => {
                tracing::warn!("Stored session rejected: {}", e);
                self.drop_session().await;
                Ok(None)
            }
        }
    }

    async fn login(&self, email: &str, password: &str) -> PortalApiResult<User> {
        Self::require_email(email)?;

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let payload = self.repository.login(&request).await?;
        self.session.store(&payload.tokens)?;

        *self.user.write().await = Some(payload.user.clone());
        Ok(payload.user)
    }

    async fn register(&self, request: &RegisterRequest) -> PortalApiResult<User> {
        let payload = self.repository.register(request).await?;
        self.session.store(&payload.tokens)?;

        *self.user.write().await = Some(payload.user.clone());
        Ok(payload.user)
    }

    async fn logout(&self) -> PortalApiResult<()> {
        if let Err(e) = self.repository.logout().await {
            tracing::warn!("Logout request failed: {}", e);
        }
        self.drop_session().await;
        Ok(())
    }

    async fn update_profile(&self, request: &ProfileUpdateRequest) -> PortalApiResult<User> {
        if !self.is_authenticated().await {
            return Err(PortalApiError::Unauthorized);
        }
        let user = self.repository.update_profile(request).await?;
        *self.user.write().await = Some(user.clone());
        Ok(user)
    }

    async fn change_password(&self, request: &ChangePasswordRequest) -> PortalApiResult<()> {
        if !self.is_authenticated().await {
            return Err(PortalApiError::Unauthorized);
        }
        self.repository.change_password(request).await
    }

    async fn forgot_password(&self, email: &str) -> PortalApiResult<()> {
        Self::require_email(email)?;
        self.repository.forgot_password(email).await
    }

    async fn current_user(&self) -> Option<User> {
        self.user.read().await.clone()
    }

    async fn is_authenticated(&self) -> bool {
        self.user.read().await.is_some()
    }
}
