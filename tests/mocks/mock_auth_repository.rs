use async_trait::async_trait;
use portal_mcp_server::error::{PortalApiError, PortalApiResult};
use portal_mcp_server::models::{
    AuthPayload, AuthTokens, ChangePasswordRequest, LoginRequest, ProfileUpdateRequest,
    RegisterRequest, User,
};
use portal_mcp_server::repositories::AuthRepository;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock auth repository for testing.
///
/// Accepts any password for the configured account. The profile endpoint
/// answers only while `token_valid` is set.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockAuthRepository {
    account: Arc<Mutex<Option<User>>>,
    token_valid: Arc<Mutex<bool>>,
    logout_fails: Arc<Mutex<bool>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockAuthRepository {
    pub fn new() -> Self {
        Self {
            account: Arc::new(Mutex::new(None)),
            token_valid: Arc::new(Mutex::new(true)),
            logout_fails: Arc::new(Mutex::new(false)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn with_account(user: User) -> Self {
        let repo = Self::new();
        *repo.account.lock().unwrap() = Some(user);
        repo
    }

    pub fn set_token_valid(&self, valid: bool) {
        *self.token_valid.lock().unwrap() = valid;
    }

    pub fn set_logout_fails(&self, fails: bool) {
        *self.logout_fails.lock().unwrap() = fails;
    }

    pub fn tokens() -> AuthTokens {
        AuthTokens {
            access_token: "mock-access".to_string(),
            refresh_token: "mock-refresh".to_string(),
        }
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl Default for MockAuthRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthRepository for MockAuthRepository {
    async fn register(&self, request: &RegisterRequest) -> PortalApiResult<AuthPayload> {
        self.track_call("register");

        let mut account = self.account.lock().unwrap();
        if account.as_ref().is_some_and(|u| u.email == request.email) {
            return Err(PortalApiError::Rejected("Email already exists".to_string()));
        }

        let user = User {
            id: "new-user".to_string(),
            email: request.email.clone(),
            full_name: request.full_name.clone(),
            phone: Some(request.phone.clone()),
            company_name: request.company_name.clone(),
            ..Default::default()
        };
        *account = Some(user.clone());
        Ok(AuthPayload {
            user,
            tokens: Self::tokens(),
        })
    }

    async fn login(&self, request: &LoginRequest) -> PortalApiResult<AuthPayload> {
        self.track_call("login");

        let account = self.account.lock().unwrap();
        match account.as_ref() {
            Some(user) if user.email == request.email => Ok(AuthPayload {
                user: user.clone(),
                tokens: Self::tokens(),
            }),
            _ => Err(PortalApiError::Rejected("Invalid credentials".to_string())),
        }
    }

    async fn logout(&self) -> PortalApiResult<()> {
        self.track_call("logout");

        if *self.logout_fails.lock().unwrap() {
            return Err(PortalApiError::HttpError("Connection failed".to_string()));
        }
        Ok(())
    }

    async fn profile(&self) -> PortalApiResult<User> {
        self.track_call("profile");

        if !*self.token_valid.lock().unwrap() {
            return Err(PortalApiError::Unauthorized);
        }
        self.account
            .lock()
            .unwrap()
            .clone()
            .ok_or(PortalApiError::Unauthorized)
    }

    async fn update_profile(&self, request: &ProfileUpdateRequest) -> PortalApiResult<User> {
        self.track_call("update_profile");

        let mut account = self.account.lock().unwrap();
        let user = account.as_mut().ok_or(PortalApiError::Unauthorized)?;
        user.full_name = request.full_name.clone();
        user.email = request.email.clone();
        user.phone = Some(request.phone.clone());
        user.company_name = request.company_name.clone();
        Ok(user.clone())
    }

    async fn change_password(&self, _request: &ChangePasswordRequest) -> PortalApiResult<()> {
        self.track_call("change_password");
        Ok(())
    }

    async fn forgot_password(&self, _email: &str) -> PortalApiResult<()> {
        self.track_call("forgot_password");
        Ok(())
    }
}
