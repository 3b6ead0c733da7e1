//! MCP tool handlers for the portal server.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.
//! Tools that mirror a screen of the portal go through the same form models
//! the screen uses, so phone numbers are masked and normalized exactly once.

use crate::domain::phone::{format_display, normalize_for_server};
use crate::error::{PortalApiError, PortalApiResult};
use crate::forms::{
    ApplicationField, ApplicationForm, PasswordChangeForm, ProfileForm, RegisterField, RegisterForm,
};
use crate::models::{
    ApplicationFilters, ApplicationStatus, BudgetRange, NoteType, Priority, Role, ServiceType, User,
};
use crate::repositories::{
    AdminRepository, ApplicationRepository, AuthRepository, NotificationRepository,
};
use crate::services::toast::user_message;
use crate::services::{
    AdminService, AdminServiceImpl, ApplicationService, ApplicationServiceImpl, AuthService,
    AuthServiceImpl, NotificationService, NotificationServiceImpl, ToastQueue,
};
use crate::session::SessionStore;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// The portal MCP server.
#[derive(Clone)]
pub struct PortalMcpServer {
    auth_service: Arc<dyn AuthService>,
    application_service: Arc<dyn ApplicationService>,
    admin_service: Arc<dyn AdminService>,
    notification_service: Arc<dyn NotificationService>,
    toasts: Arc<ToastQueue>,
    tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for PortalMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "portal-mcp-server".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("MCP server for the web studio customer portal - phone formatting, account management, applications and the staff admin panel.".into()),
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct PhoneParams {
    /// Phone number in any format
    value: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct LoginParams {
    email: String,
    password: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct RegisterParams {
    full_name: String,
    email: String,
    password: String,
    confirm_password: String,
    phone: String,
    #[serde(default)]
    company_name: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UpdateProfileParams {
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    company_name: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ChangePasswordParams {
    current_password: String,
    new_password: String,
    confirm_password: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ForgotPasswordParams {
    email: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SubmitOrderParams {
    title: String,
    /// landing_page, corporate_site, ecommerce, web_application, redesign or other
    service_type: String,
    #[serde(default)]
    description: Option<String>,
    /// Defaults to the signed-in user's name
    #[serde(default)]
    contact_full_name: Option<String>,
    #[serde(default)]
    contact_email: Option<String>,
    #[serde(default)]
    contact_phone: Option<String>,
    #[serde(default)]
    company_name: Option<String>,
    /// under_50k, 50k_100k, 100k_300k, 300k_500k or negotiable
    #[serde(default)]
    budget_range: Option<String>,
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
struct ApplicationFilterParams {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    service_type: Option<String>,
    #[serde(default)]
    contact_phone: Option<String>,
    #[serde(default)]
    search: Option<String>,
    #[serde(default)]
    page: Option<u32>,
    #[serde(default)]
    limit: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ApplicationIdParams {
    application_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UpdateStatusParams {
    application_id: String,
    status: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UpdatePriorityParams {
    application_id: String,
    /// low, normal, high or urgent
    priority: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct AssignManagerParams {
    application_id: String,
    manager_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct AddNoteParams {
    application_id: String,
    content: String,
    /// internal, comment, system or change_log. Omit for an internal staff note.
    #[serde(default)]
    note_type: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UpdateNoteParams {
    note_id: String,
    content: String,
    /// internal, comment, system or change_log (default internal)
    #[serde(default)]
    note_type: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct NoteIdParams {
    note_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ListUsersParams {
    /// client, manager or admin
    #[serde(default)]
    role: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UpdateRoleParams {
    user_id: String,
    role: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ListNotificationsParams {
    #[serde(default)]
    unread_only: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct MarkReadParams {
    /// Omit to mark every notification as read
    #[serde(default)]
    notification_id: Option<String>,
}

fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn invalid_params(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INVALID_PARAMS,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn parse_opt<T>(value: Option<&str>) -> Result<Option<T>, McpError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.parse::<T>().map_err(invalid_params))
        .transpose()
}

fn json_result(value: &impl Serialize) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value).map_err(to_mcp_error)?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

impl ApplicationFilterParams {
    fn into_filters(self) -> Result<ApplicationFilters, McpError> {
        Ok(ApplicationFilters {
            status: parse_opt::<ApplicationStatus>(self.status.as_deref())?,
            priority: parse_opt::<Priority>(self.priority.as_deref())?,
            service_type: parse_opt::<ServiceType>(self.service_type.as_deref())?,
            contact_phone: self.contact_phone,
            search: self.search,
            page: self.page,
            limit: self.limit,
        })
    }
}

#[tool_router]
impl PortalMcpServer {
    /// Create a new portal MCP server.
    pub fn new(
        auth_repo: Arc<dyn AuthRepository>,
        application_repo: Arc<dyn ApplicationRepository>,
        admin_repo: Arc<dyn AdminRepository>,
        notification_repo: Arc<dyn NotificationRepository>,
        session: Arc<SessionStore>,
        toast_ttl: Duration,
    ) -> Self {
        let auth_service =
            Arc::new(AuthServiceImpl::new(auth_repo, session)) as Arc<dyn AuthService>;

        let application_service = Arc::new(ApplicationServiceImpl::new(application_repo.clone()))
            as Arc<dyn ApplicationService>;

        let admin_service = Arc::new(AdminServiceImpl::new(
            admin_repo,
            application_repo,
            auth_service.clone(),
        )) as Arc<dyn AdminService>;

        let notification_service = Arc::new(NotificationServiceImpl::new(
            notification_repo,
            auth_service.clone(),
        )) as Arc<dyn NotificationService>;

        Self {
            auth_service,
            application_service,
            admin_service,
            notification_service,
            toasts: Arc::new(ToastQueue::new(toast_ttl)),
            tool_router: Self::tool_router(),
        }
    }

    /// Validate the persisted session, if any. Called once at startup.
    pub async fn restore_session(&self) -> Option<User> {
        match self.auth_service.check_status().await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("Session check failed: {}", e);
                None
            }
        }
    }

    /// Report an operation's outcome as a toast and turn it into a tool result.
    fn finish<T: Serialize>(
        &self,
        result: PortalApiResult<T>,
        success_message: Option<&str>,
    ) -> Result<CallToolResult, McpError> {
        self.toasts.notify_result(&result, success_message);
        match result {
            Ok(value) => json_result(&serde_json::json!({
                "message": success_message,
                "data": value,
            })),
            Err(e) => {
                tracing::error!("Tool call failed: {:?}", e);
                Err(to_mcp_error(format!("{} ({})", user_message(&e), e)))
            }
        }
    }

    #[tool(
        description = "Format a phone number the way the portal's phone inputs display it: +7 (XXX) XXX-XX-XX. Extra digits are dropped."
    )]
    async fn format_phone(
        &self,
        params: Parameters<PhoneParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        json_result(&serde_json::json!({
            "input": params.value,
            "display": format_display(&params.value),
        }))
    }

    #[tool(
        description = "Normalize a phone number to the canonical 11-digit form sent to the backend (e.g. 79991234567)."
    )]
    async fn normalize_phone(
        &self,
        params: Parameters<PhoneParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        json_result(&serde_json::json!({
            "input": params.value,
            "canonical": normalize_for_server(&params.value),
        }))
    }

    #[tool(description = "Sign in to the portal. The session is persisted for later tool calls.")]
    async fn login(&self, params: Parameters<LoginParams>) -> Result<CallToolResult, McpError> {
        let params = params.0;
        tracing::info!("MCP Handler: login called for {}", params.email);

        let result = self
            .auth_service
            .login(&params.email, &params.password)
            .await;
        self.finish(result, Some("Вход выполнен успешно"))
    }

    #[tool(description = "Create a portal account and sign in.")]
    async fn register(
        &self,
        params: Parameters<RegisterParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let mut form = RegisterForm::new();
        form.set_text(RegisterField::FullName, params.full_name);
        form.set_text(RegisterField::Email, params.email);
        form.set_text(RegisterField::Password, params.password);
        form.set_text(RegisterField::ConfirmPassword, params.confirm_password);
        form.set_text(RegisterField::CompanyName, params.company_name.unwrap_or_default());
        form.on_phone_keystroke(&params.phone);

        let result = match form.submit() {
            Ok(request) => self.auth_service.register(&request).await,
            Err(e) => Err(e),
        };
        self.finish(result, Some("Регистрация прошла успешно"))
    }

    #[tool(description = "Sign out and forget the persisted session.")]
    async fn logout(&self) -> Result<CallToolResult, McpError> {
        let result = self.auth_service.logout().await;
        self.finish(result, Some("Вы вышли из системы"))
    }

    #[tool(description = "Get the signed-in user's profile. The phone is shown in display format.")]
    async fn get_profile(&self) -> Result<CallToolResult, McpError> {
        let user = match self.auth_service.current_user().await {
            Some(user) => Some(user),
            None => self.restore_session().await,
        };

        let Some(user) = user else {
            return Err(to_mcp_error("Not signed in"));
        };

        let form = ProfileForm::from_user(&user);
        json_result(&serde_json::json!({
            "user": user,
            "phone_display": form.phone.display_value(),
        }))
    }

    #[tool(
        description = "Update the signed-in user's profile. Omitted fields keep their current values; the phone may be given in any format."
    )]
    async fn update_profile(
        &self,
        params: Parameters<UpdateProfileParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let Some(user) = self.auth_service.current_user().await else {
            return Err(to_mcp_error("Not signed in"));
        };

        let mut form = ProfileForm::from_user(&user);
        if let Some(full_name) = params.full_name {
            form.full_name = full_name;
        }
        if let Some(email) = params.email {
            form.email = email;
        }
        if let Some(company_name) = params.company_name {
            form.company_name = company_name;
        }
        if let Some(phone) = params.phone {
            form.on_phone_keystroke(&phone);
        }

        let result = self.auth_service.update_profile(&form.to_request()).await;
        self.finish(result, Some("Профиль успешно обновлен"))
    }

    #[tool(description = "Change the signed-in user's password.")]
    async fn change_password(
        &self,
        params: Parameters<ChangePasswordParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let mut form = PasswordChangeForm::default();
        form.current_password = params.current_password;
        form.new_password = params.new_password;
        form.confirm_password = params.confirm_password;

        let result = match form.submit() {
            Ok(request) => self.auth_service.change_password(&request).await,
            Err(e) => Err(e),
        };
        self.finish(result, Some("Пароль успешно изменен"))
    }

    #[tool(description = "Request a password reset email.")]
    async fn forgot_password(
        &self,
        params: Parameters<ForgotPasswordParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self.auth_service.forgot_password(&params.0.email).await;
        self.finish(
            result,
            Some("Инструкции по восстановлению пароля отправлены на email"),
        )
    }

    #[tool(
        description = "Submit an order / new application. Contact fields default to the signed-in user's profile; the phone may be given in any format."
    )]
    async fn submit_order(
        &self,
        params: Parameters<SubmitOrderParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        tracing::info!("MCP Handler: submit_order called");

        let user = self.auth_service.current_user().await;
        let mut form = ApplicationForm::for_user(user.as_ref());

        form.set_text(ApplicationField::Title, params.title);
        form.set_service_type(parse_opt::<ServiceType>(Some(params.service_type.as_str()))?);
        form.set_budget_range(parse_opt::<BudgetRange>(params.budget_range.as_deref())?);
        if let Some(description) = params.description {
            form.set_text(ApplicationField::Description, description);
        }
        if let Some(name) = params.contact_full_name {
            form.set_text(ApplicationField::ContactFullName, name);
        }
        if let Some(email) = params.contact_email {
            form.set_text(ApplicationField::ContactEmail, email);
        }
        if let Some(company) = params.company_name {
            form.set_text(ApplicationField::CompanyName, company);
        }
        if let Some(phone) = params.contact_phone {
            form.on_phone_keystroke(&phone);
        }

        let result = match form.submit() {
            Ok(request) => self.application_service.create(&request).await,
            Err(e) => Err(e),
        };
        self.finish(result, Some("Заявка успешно отправлена"))
    }

    #[tool(description = "List the signed-in user's applications with optional filters.")]
    async fn list_my_applications(
        &self,
        params: Parameters<ApplicationFilterParams>,
    ) -> Result<CallToolResult, McpError> {
        let filters = params.0.into_filters()?;
        let result = self.application_service.fetch(&filters).await;
        self.finish(result, None)
    }

    #[tool(description = "Send a draft application for review.")]
    async fn submit_application(
        &self,
        params: Parameters<ApplicationIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self
            .application_service
            .submit(&params.0.application_id)
            .await;
        self.finish(result, Some("Заявка отправлена на рассмотрение"))
    }

    #[tool(description = "Delete one of the signed-in user's applications.")]
    async fn delete_application(
        &self,
        params: Parameters<ApplicationIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self
            .application_service
            .delete(&params.0.application_id)
            .await;
        self.finish(result, Some("Заявка удалена"))
    }

    #[tool(description = "Staff only: list all applications with optional filters.")]
    async fn admin_list_applications(
        &self,
        params: Parameters<ApplicationFilterParams>,
    ) -> Result<CallToolResult, McpError> {
        let filters = params.0.into_filters()?;
        let result = self.admin_service.list_applications(&filters).await;
        self.finish(result, None)
    }

    #[tool(description = "Staff only: get an application with its notes (pinned first, newest first).")]
    async fn admin_application_details(
        &self,
        params: Parameters<ApplicationIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self
            .admin_service
            .application_details(&params.0.application_id)
            .await;
        self.finish(result, None)
    }

    #[tool(
        description = "Staff only: change an application's status (draft, submitted, in_review, needs_info, estimated, approved, in_progress, completed, cancelled, rejected)."
    )]
    async fn admin_update_status(
        &self,
        params: Parameters<UpdateStatusParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let result = self
            .admin_service
            .update_status(&params.application_id, &params.status)
            .await;
        self.finish(result, Some("Статус заявки обновлен"))
    }

    #[tool(description = "Staff only: change an application's priority.")]
    async fn admin_update_priority(
        &self,
        params: Parameters<UpdatePriorityParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let Some(priority) = parse_opt::<Priority>(Some(params.priority.as_str()))? else {
            return Err(invalid_params("Priority cannot be empty"));
        };
        let result = self
            .admin_service
            .update_priority(&params.application_id, priority)
            .await;
        self.finish(result, Some("Приоритет заявки обновлен"))
    }

    #[tool(description = "Staff only: assign a manager to an application.")]
    async fn admin_assign_manager(
        &self,
        params: Parameters<AssignManagerParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let result = self
            .admin_service
            .assign_manager(&params.application_id, &params.manager_id)
            .await;
        self.finish(result, Some("Менеджер успешно назначен"))
    }

    #[tool(description = "Staff only: add an internal note to an application.")]
    async fn admin_add_note(
        &self,
        params: Parameters<AddNoteParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        match parse_opt::<NoteType>(params.note_type.as_deref())? {
            Some(note_type) => {
                let result = self
                    .admin_service
                    .create_note(&params.application_id, &params.content, note_type)
                    .await;
                self.finish(result, Some("Заметка успешно добавлена"))
            }
            None => {
                let result = self
                    .admin_service
                    .add_internal_note(&params.application_id, &params.content)
                    .await;
                self.finish(result, Some("Заметка успешно добавлена"))
            }
        }
    }

    #[tool(description = "Staff only: list the notes of an application, pinned first then newest first.")]
    async fn admin_list_notes(
        &self,
        params: Parameters<ApplicationIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self.admin_service.notes(&params.0.application_id).await;
        self.finish(result, None)
    }

    #[tool(description = "Staff only: change the text of an application note.")]
    async fn admin_update_note(
        &self,
        params: Parameters<UpdateNoteParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let note_type = parse_opt::<NoteType>(params.note_type.as_deref())?.unwrap_or_default();
        let result = self
            .admin_service
            .update_note(&params.note_id, &params.content, note_type)
            .await;
        self.finish(result, Some("Заметка обновлена"))
    }

    #[tool(description = "Staff only: delete an application note.")]
    async fn admin_delete_note(
        &self,
        params: Parameters<NoteIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self.admin_service.delete_note(&params.0.note_id).await;
        self.finish(result, Some("Заметка удалена"))
    }

    #[tool(description = "Staff only: pin or unpin an application note.")]
    async fn admin_toggle_note_pin(
        &self,
        params: Parameters<NoteIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self.admin_service.toggle_note_pin(&params.0.note_id).await;
        let message = match &result {
            Ok(note) if note.is_pinned => Some("Заметка закреплена"),
            Ok(_) => Some("Заметка откреплена"),
            Err(_) => None,
        };
        self.finish(result, message)
    }

    #[tool(description = "Staff only: return an application to draft so the client can edit it.")]
    async fn admin_reset_to_draft(
        &self,
        params: Parameters<ApplicationIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self
            .admin_service
            .reset_to_draft(&params.0.application_id)
            .await;
        self.finish(result, Some("Заявка возвращена в черновики"))
    }

    #[tool(description = "Admin only: list portal users, optionally by role.")]
    async fn admin_list_users(
        &self,
        params: Parameters<ListUsersParams>,
    ) -> Result<CallToolResult, McpError> {
        let role = parse_opt::<Role>(params.0.role.as_deref())?;
        let result = self.admin_service.list_users(role).await;
        self.finish(result, None)
    }

    #[tool(description = "Admin only: change a user's role (client, manager or admin).")]
    async fn admin_update_user_role(
        &self,
        params: Parameters<UpdateRoleParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let Some(role) = parse_opt::<Role>(Some(params.role.as_str()))? else {
            return Err(invalid_params("Role cannot be empty"));
        };
        let result = self
            .admin_service
            .update_user_role(&params.user_id, role)
            .await;
        self.finish(result, Some("Роль пользователя обновлена"))
    }

    #[tool(description = "Staff only: dashboard statistics by status and service type.")]
    async fn admin_dashboard_stats(&self) -> Result<CallToolResult, McpError> {
        let result = self.admin_service.dashboard_stats().await;
        self.finish(result, None)
    }

    #[tool(description = "List the signed-in user's notifications and the unread count.")]
    async fn list_notifications(
        &self,
        params: Parameters<ListNotificationsParams>,
    ) -> Result<CallToolResult, McpError> {
        let unread_only = params.0.unread_only.unwrap_or(false);
        let result = async {
            let notifications = self.notification_service.list(unread_only).await?;
            let unread = self.notification_service.unread_count().await?;
            Ok::<_, PortalApiError>(serde_json::json!({
                "notifications": notifications,
                "unread_count": unread,
            }))
        }
        .await;
        self.finish(result, None)
    }

    #[tool(description = "Mark one notification, or all of them, as read.")]
    async fn mark_notifications_read(
        &self,
        params: Parameters<MarkReadParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = match params.0.notification_id {
            Some(id) => self.notification_service.mark_read(&id).await,
            None => self.notification_service.mark_all_read().await,
        };
        self.finish(result, Some("Уведомления отмечены как прочитанные"))
    }

    #[tool(description = "Toasts raised by recent tool calls that have not yet expired.")]
    async fn active_toasts(&self) -> Result<CallToolResult, McpError> {
        json_result(&self.toasts.active())
    }
}
