//! Data models for the portal backend.
//!
//! Users, applications ("заявки"), notes, notifications and dashboard
//! statistics, plus the `{ success, message, data }` envelope every backend
//! response is wrapped in.

pub mod application;
pub mod envelope;
pub mod note;
pub mod notification;
pub mod stats;
pub mod user;

pub use application::{
    Application, ApplicationFilters, ApplicationStatus, BudgetRange, CreateApplicationRequest,
    Priority, ServiceType,
};
pub use envelope::ApiResponse;
pub use note::{ApplicationNote, CreateNoteRequest, NoteType};
pub use notification::Notification;
pub use stats::{DashboardStats, ServiceTypeCount, StatusCount};
pub use user::{
    AuthPayload, AuthTokens, ChangePasswordRequest, LoginRequest, ProfileUpdateRequest, RegisterRequest, Role,
    User,
};
