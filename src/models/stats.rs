//! Admin dashboard statistics.

use super::application::ApplicationStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: ApplicationStatus,
    #[serde(default)]
    pub status_display: Option<String>,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceTypeCount {
    pub service_type: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_applications: u64,
    pub total_users: Option<u64>,
    pub application_statuses: Vec<StatusCount>,
    pub service_types: Vec<ServiceTypeCount>,
}

impl DashboardStats {
    /// Share of all applications with the given status, in percent.
    pub fn status_share(&self, status: ApplicationStatus) -> f64 {
        if self.total_applications == 0 {
            return 0.0;
        }
        let count: u64 = self
            .application_statuses
            .iter()
            .filter(|s| s.status == status)
            .map(|s| s.count)
            .sum();
        count as f64 * 100.0 / self.total_applications as f64
    }
}
