//! In-app notifications for the signed-in user.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Notification {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub message: String,
    pub is_read: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}
