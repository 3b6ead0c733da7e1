//! Transient user-facing notifications.
//!
//! Toasts expire on their own after a fixed lifetime. Expiry is evaluated
//! lazily whenever the queue is read, so no timer task is needed.

use crate::error::{PortalApiError, PortalApiResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub const DEFAULT_TOAST_TTL: Duration = Duration::from_secs(5);

const DEFAULT_ERROR_MESSAGE: &str = "Произошла ошибка: попробуйте позже";

/// Backend messages with a dedicated user-facing translation.
const ERROR_MESSAGES: &[(&str, &str)] = &[
    ("Invalid credentials", "Ошибка аутентификации: неверный email или пароль"),
    ("Account not found", "Ошибка аутентификации: аккаунт не найден"),
    ("Account deactivated", "Ошибка аутентификации: аккаунт деактивирован"),
    ("Email not verified", "Ошибка аутентификации: email не подтвержден"),
    ("Email already exists", "Ошибка регистрации: пользователь с таким email уже существует"),
    ("Invalid email format", "Ошибка регистрации: неправильный формат email"),
    ("Password too weak", "Ошибка регистрации: пароль слишком слабый"),
    ("Phone already exists", "Ошибка регистрации: пользователь с таким телефоном уже существует"),
    ("Network error", "Ошибка сети: проверьте подключение к интернету"),
    ("Server error", "Ошибка сервера: попробуйте позже"),
    ("Connection timeout", "Ошибка соединения: превышено время ожидания"),
    ("Unauthorized", "Ошибка доступа: требуется аутентификация"),
    ("Forbidden", "Ошибка доступа: недостаточно прав"),
    ("Not found", "Ошибка: запрашиваемый ресурс не найден"),
    ("Validation error", "Ошибка валидации: проверьте введенные данные"),
];

/// Translate a backend message; unknown messages get a generic text.
pub fn map_api_error_message(api_message: &str) -> &'static str {
    ERROR_MESSAGES
        .iter()
        .find(|(key, _)| *key == api_message)
        .map(|(_, message)| *message)
        .unwrap_or(DEFAULT_ERROR_MESSAGE)
}

/// The backend message an error corresponds to, for translation.
fn error_key(error: &PortalApiError) -> &str {
    match error {
        PortalApiError::Rejected(message)
        | PortalApiError::Forbidden(message)
        | PortalApiError::NotFound(message)
        | PortalApiError::ApiError { message, .. } => message,
        PortalApiError::Unauthorized => "Unauthorized",
        PortalApiError::Timeout => "Connection timeout",
        PortalApiError::HttpError(_) => "Network error",
        PortalApiError::Validation(_) | PortalApiError::InvalidRequest(_) => "Validation error",
        _ => "Server error",
    }
}

/// User-facing text for an error.
pub fn user_message(error: &PortalApiError) -> &'static str {
    let key = error_key(error);
    let mapped = map_api_error_message(key);
    if mapped != DEFAULT_ERROR_MESSAGE {
        return mapped;
    }
    // Bare status-style errors still get their category text.
    match error {
        PortalApiError::Forbidden(_) => map_api_error_message("Forbidden"),
        PortalApiError::NotFound(_) => map_api_error_message("Not found"),
        _ => mapped,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toast {
    pub id: String,
    pub message: String,
    pub kind: ToastKind,
    pub expires_at: DateTime<Utc>,
}

/// Queue of visible toasts.
pub struct ToastQueue {
    ttl: chrono::Duration,
    counter: AtomicU64,
    toasts: Mutex<Vec<Toast>>,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_TTL)
    }
}

impl ToastQueue {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl: chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::seconds(5)),
            counter: AtomicU64::new(0),
            toasts: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Toast>> {
        self.toasts.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Queue a toast and return its id, `toast-<n>-<unix millis>`.
    /// Expired toasts are dropped on every call.
    pub fn show(&self, message: impl Into<String>, kind: ToastKind) -> String {
        self.show_at(message, kind, Utc::now())
    }

    fn show_at(&self, message: impl Into<String>, kind: ToastKind, now: DateTime<Utc>) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        let id = format!("toast-{}-{}", n, now.timestamp_millis());

        let toast = Toast {
            id: id.clone(),
            message: message.into(),
            kind,
            expires_at: now + self.ttl,
        };
        tracing::debug!("Toast {} ({:?}): {}", toast.id, toast.kind, toast.message);
        let mut toasts = self.lock();
        toasts.retain(|t| t.expires_at > now);
        toasts.push(toast);
        id
    }

    /// Remove a toast before it expires. Returns whether it was present.
    pub fn dismiss(&self, id: &str) -> bool {
        let mut toasts = self.lock();
        let before = toasts.len();
        toasts.retain(|t| t.id != id);
        toasts.len() != before
    }

    /// Toasts still visible now, oldest first.
    pub fn active(&self) -> Vec<Toast> {
        self.active_at(Utc::now())
    }

    fn active_at(&self, now: DateTime<Utc>) -> Vec<Toast> {
        let mut toasts = self.lock();
        toasts.retain(|t| t.expires_at > now);
        toasts.clone()
    }

    /// Show the outcome of an operation: the success text if given, or the
    /// translated error. Returns the id of the toast shown, if any.
    pub fn notify_result<T>(
        &self,
        result: &PortalApiResult<T>,
        success_message: Option<&str>,
    ) -> Option<String> {
        match result {
            Ok(_) => success_message.map(|message| self.show(message, ToastKind::Success)),
            Err(e) => Some(self.show(user_message(e), ToastKind::Error)),
        }
    }
}
