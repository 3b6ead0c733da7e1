//! In-memory repositories for service and server tests.

mod mock_admin_repository;
mod mock_application_repository;
mod mock_auth_repository;
mod mock_notification_repository;

#[allow(unused_imports)]
pub use mock_admin_repository::MockAdminRepository;
#[allow(unused_imports)]
pub use mock_application_repository::MockApplicationRepository;
#[allow(unused_imports)]
pub use mock_auth_repository::MockAuthRepository;
#[allow(unused_imports)]
pub use mock_notification_repository::MockNotificationRepository;
