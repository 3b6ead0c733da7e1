//! The response envelope shared by every backend endpoint.

use crate::error::{PortalApiError, PortalApiResult};
use serde::Deserialize;
use serde_json::Value;

/// `{ "success": bool, "message": string?, "data": T?, "errors": [...]? }`
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default = "Option::default")]
    pub data: Option<T>,

    /// Field errors; the backend sends either plain strings or
    /// `{ "field": ..., "message": ... }` objects.
    #[serde(default)]
    pub errors: Vec<Value>,
}

impl<T> ApiResponse<T> {
    /// Flatten `errors` into human-readable messages.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .filter_map(|e| match e {
                Value::String(s) => Some(s.clone()),
                Value::Object(map) => map
                    .get("message")
                    .or_else(|| map.get("msg"))
                    .and_then(Value::as_str)
                    .map(str::to_string),
                _ => None,
            })
            .collect()
    }

    /// Unwrap the payload of a successful response.
    ///
    /// An unsuccessful envelope becomes `Validation` when it carries field
    /// errors and `Rejected` otherwise; a successful one without `data`
    /// becomes `Other`.
    pub fn into_data(self) -> PortalApiResult<T> {
        if !self.success {
            let errors = self.error_messages();
            if !errors.is_empty() {
                return Err(PortalApiError::Validation(errors));
            }
            return Err(PortalApiError::Rejected(
                self.message.unwrap_or_else(|| "Request rejected".to_string()),
            ));
        }

        self.data
            .ok_or_else(|| PortalApiError::Other("Missing data in API response".to_string()))
    }

    /// Check success for endpoints whose payload is irrelevant.
    pub fn into_unit(self) -> PortalApiResult<()> {
        if self.success {
            return Ok(());
        }
        let errors = self.error_messages();
        if !errors.is_empty() {
            return Err(PortalApiError::Validation(errors));
        }
        Err(PortalApiError::Rejected(
            self.message.unwrap_or_else(|| "Request rejected".to_string()),
        ))
    }
}
