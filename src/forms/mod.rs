//! Form state models for the portal's editable screens.
//!
//! Each form owns its field values and the per-field error messages shown
//! next to inputs. Phone inputs go through [`PhoneField`], which keeps the
//! masked display value while editing and hands out the canonical value on
//! submit.

mod application_form;
mod phone_field;
mod profile_form;
mod register_form;

pub use application_form::{ApplicationField, ApplicationForm};
pub use phone_field::PhoneField;
pub use profile_form::{PasswordChangeForm, ProfileForm};
pub use register_form::{RegisterField, RegisterForm};

use crate::error::PortalApiError;

/// Per-field error messages, kept in the order they were raised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: Vec<(&'static str, String)>,
}

impl FieldErrors {
    /// Set or replace the message for a field.
    pub fn set(&mut self, field: &'static str, message: impl Into<String>) {
        let message = message.into();
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some(entry) => entry.1 = message,
            None => self.entries.push((field, message)),
        }
    }

    /// Drop the message for a field, as happens when the user edits it.
    pub fn clear(&mut self, field: &str) {
        self.entries.retain(|(name, _)| *name != field);
    }

    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(name, message)| (*name, message.as_str()))
    }

    /// Convert into the crate error carried back to callers.
    pub fn to_error(&self) -> PortalApiError {
        PortalApiError::Validation(
            self.entries
                .iter()
                .map(|(_, message)| message.clone())
                .collect(),
        )
    }
}
