//! Portal MCP Server - typed client and Model Context Protocol server for a
//! web studio's customer portal.
//!
//! # Architecture
//!
//! - **domain**: Phone number formatting/normalization and email checks
//! - **models**: Users, applications, notes, notifications and the response envelope
//! - **validation**: Field rules applied before data reaches the backend
//! - **forms**: Form state for the registration, profile and order screens
//! - **session**: Persisted access/refresh tokens
//! - **client**: Blocking HTTP client for the portal REST API and its async wrapper
//! - **repositories**: Async data access traits over the client
//! - **services**: Auth, applications, admin panel, notifications and toasts
//! - **server**: MCP protocol server

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod forms;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod server;
pub mod services;
pub mod session;
pub mod validation;

pub use client::{AsyncPortalClient, AsyncPortalClientImpl, PortalClient};
pub use config::Config;
pub use domain::phone::{format_display, normalize_for_server, PhoneNumber};
pub use error::{ConfigError, PortalApiError, PortalApiResult, SessionError};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use models::{Application, ApplicationNote, ApplicationStatus, Notification, Role, User};
pub use server::PortalMcpServer;
pub use session::SessionStore;
