//! Applications ("заявки") submitted through the order form and managed in
//! the admin panel.

use crate::domain::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of an application. Transitions are enforced by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Draft,
    Submitted,
    InReview,
    NeedsInfo,
    Estimated,
    Approved,
    InProgress,
    Completed,
    Cancelled,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 10] = [
        ApplicationStatus::Draft,
        ApplicationStatus::Submitted,
        ApplicationStatus::InReview,
        ApplicationStatus::NeedsInfo,
        ApplicationStatus::Estimated,
        ApplicationStatus::Approved,
        ApplicationStatus::InProgress,
        ApplicationStatus::Completed,
        ApplicationStatus::Cancelled,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Draft => "draft",
            ApplicationStatus::Submitted => "submitted",
            ApplicationStatus::InReview => "in_review",
            ApplicationStatus::NeedsInfo => "needs_info",
            ApplicationStatus::Estimated => "estimated",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::InProgress => "in_progress",
            ApplicationStatus::Completed => "completed",
            ApplicationStatus::Cancelled => "cancelled",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    /// Label shown to users when the backend sends no `statusDisplay`.
    pub fn display_name(&self) -> &'static str {
        match self {
            ApplicationStatus::Draft => "Черновик",
            ApplicationStatus::Submitted => "Отправлено",
            ApplicationStatus::InReview => "На рассмотрении",
            ApplicationStatus::NeedsInfo => "Требуется информация",
            ApplicationStatus::Estimated => "Оценено",
            ApplicationStatus::Approved => "Утверждено",
            ApplicationStatus::InProgress => "В работе",
            ApplicationStatus::Completed => "Завершено",
            ApplicationStatus::Cancelled => "Отменено",
            ApplicationStatus::Rejected => "Отклонено",
        }
    }

    /// Waiting for a manager to look at it.
    pub fn is_pending(&self) -> bool {
        matches!(self, ApplicationStatus::Submitted | ApplicationStatus::InReview)
    }

    /// Accepted by the studio.
    pub fn is_accepted(&self) -> bool {
        matches!(self, ApplicationStatus::Approved | ApplicationStatus::Completed)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownVariant {
                kind: "status",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    #[serde(alias = "medium")]
    Normal,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "normal" | "medium" => Ok(Priority::Normal),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            other => Err(ValidationError::UnknownVariant {
                kind: "priority",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    LandingPage,
    CorporateSite,
    Ecommerce,
    WebApplication,
    Redesign,
    Other,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::LandingPage => "landing_page",
            ServiceType::CorporateSite => "corporate_site",
            ServiceType::Ecommerce => "ecommerce",
            ServiceType::WebApplication => "web_application",
            ServiceType::Redesign => "redesign",
            ServiceType::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::LandingPage => "Лендинг",
            ServiceType::CorporateSite => "Корпоративный сайт",
            ServiceType::Ecommerce => "Интернет-магазин",
            ServiceType::WebApplication => "Веб-приложение",
            ServiceType::Redesign => "Редизайн",
            ServiceType::Other => "Другое",
        }
    }
}

impl FromStr for ServiceType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "landing_page" => Ok(ServiceType::LandingPage),
            "corporate_site" => Ok(ServiceType::CorporateSite),
            "ecommerce" => Ok(ServiceType::Ecommerce),
            "web_application" => Ok(ServiceType::WebApplication),
            "redesign" => Ok(ServiceType::Redesign),
            "other" => Ok(ServiceType::Other),
            other => Err(ValidationError::UnknownVariant {
                kind: "service type",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetRange {
    #[serde(rename = "under_50k")]
    Under50k,
    #[serde(rename = "50k_100k")]
    From50kTo100k,
    #[serde(rename = "100k_300k")]
    From100kTo300k,
    #[serde(rename = "300k_500k")]
    From300kTo500k,
    #[serde(rename = "negotiable")]
    Negotiable,
}

impl FromStr for BudgetRange {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "under_50k" => Ok(BudgetRange::Under50k),
            "50k_100k" => Ok(BudgetRange::From50kTo100k),
            "100k_300k" => Ok(BudgetRange::From100kTo300k),
            "300k_500k" => Ok(BudgetRange::From300kTo500k),
            "negotiable" => Ok(BudgetRange::Negotiable),
            other => Err(ValidationError::UnknownVariant {
                kind: "budget range",
                value: other.to_string(),
            }),
        }
    }
}

/// An application as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Application {
    pub id: String,
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<ServiceType>,

    pub status: ApplicationStatus,

    #[serde(rename = "statusDisplay", skip_serializing_if = "Option::is_none")]
    pub status_display: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    pub contact_full_name: String,
    pub contact_email: String,

    /// Opaque inbound value, shown as delivered
    pub contact_phone: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_range: Option<BudgetRange>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_budget: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Application {
    /// The backend label if present, otherwise the built-in one.
    pub fn status_label(&self) -> &str {
        self.status_display
            .as_deref()
            .unwrap_or_else(|| self.status.display_name())
    }
}

/// Payload for creating or updating an application.
///
/// `contact_phone` must already be canonical; build this through
/// [`crate::forms::ApplicationForm::to_request`].
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct CreateApplicationRequest {
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<ServiceType>,

    pub contact_full_name: String,
    pub contact_email: String,
    pub contact_phone: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_range: Option<BudgetRange>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

/// Query filters for application lists. Serialized as snake_case query params.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationFilters {
    pub status: Option<ApplicationStatus>,
    pub priority: Option<Priority>,
    pub service_type: Option<ServiceType>,
    pub contact_phone: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ApplicationFilters {
    /// Query pairs in the backend's snake_case naming.
    ///
    /// A phone filter is normalized so it matches stored canonical values.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(priority) = self.priority {
            pairs.push(("priority", priority.as_str().to_string()));
        }
        if let Some(service_type) = self.service_type {
            pairs.push(("service_type", service_type.as_str().to_string()));
        }
        if let Some(phone) = &self.contact_phone {
            pairs.push((
                "contact_phone",
                crate::domain::normalize_for_server(phone),
            ));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}
