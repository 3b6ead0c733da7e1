use crate::client::AsyncPortalClient;
use crate::error::PortalApiResult;
use crate::models::{
    AuthPayload, ChangePasswordRequest, LoginRequest, ProfileUpdateRequest, RegisterRequest, User,
};
use crate::repositories::traits::AuthRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Auth repository backed by the portal API client.
pub struct PortalAuthRepository {
    client: Arc<dyn AsyncPortalClient>,
}

impl PortalAuthRepository {
    pub fn new(client: Arc<dyn AsyncPortalClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthRepository for PortalAuthRepository {
    async fn register(&self, request: &RegisterRequest) -> PortalApiResult<AuthPayload> {
        self.client.register(request).await
    }

    async fn login(&self, request: &LoginRequest) -> PortalApiResult<AuthPayload> {
        self.client.login(request).await
    }

    async fn logout(&self) -> PortalApiResult<()> {
        self.client.logout().await
    }

    async fn profile(&self) -> PortalApiResult<User> {
        self.client.get_profile().await
    }

    async fn update_profile(&self, request: &ProfileUpdateRequest) -> PortalApiResult<User> {
        self.client.update_profile(request).await
    }

    async fn change_password(&self, request: &ChangePasswordRequest) -> PortalApiResult<()> {
        self.client.change_password(request).await
    }

    async fn forgot_password(&self, email: &str) -> PortalApiResult<()> {
        self.client.forgot_password(email).await
    }
}
