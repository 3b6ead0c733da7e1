//! Application service layer.
//!
//! Services hold the client-side state of the portal (signed-in user, the
//! cached application list, visible toasts) and the rules applied before a
//! request reaches the backend. MCP handlers talk only to services.

mod admin_service;
mod application_service;
mod auth_service;
mod notification_service;
pub mod toast;

pub use admin_service::{AdminService, AdminServiceImpl, ApplicationDetails};
pub use application_service::{ApplicationService, ApplicationServiceImpl};
pub use auth_service::{AuthService, AuthServiceImpl};
pub use notification_service::{NotificationService, NotificationServiceImpl};
pub use toast::{map_api_error_message, Toast, ToastKind, ToastQueue};
