mod portal_admin_repository;
mod portal_application_repository;
mod portal_auth_repository;
mod portal_notification_repository;
mod traits;

pub use portal_admin_repository::PortalAdminRepository;
pub use portal_application_repository::PortalApplicationRepository;
pub use portal_auth_repository::PortalAuthRepository;
pub use portal_notification_repository::PortalNotificationRepository;
pub use traits::{AdminRepository, ApplicationRepository, AuthRepository, NotificationRepository};
