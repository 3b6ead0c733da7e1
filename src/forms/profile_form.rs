//! Profile editing and password change forms.

use super::application_form::non_blank;
use super::{FieldErrors, PhoneField};
use crate::error::PortalApiResult;
use crate::models::{ChangePasswordRequest, ProfileUpdateRequest, User};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub full_name: String,
    pub email: String,
    pub phone: PhoneField,
    pub company_name: String,
}

impl ProfileForm {
    /// Editable copy of the profile; the stored phone is re-masked.
    pub fn from_user(user: &User) -> Self {
        Self {
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            phone: PhoneField::prefilled(user.phone.as_deref()),
            company_name: user.company_name.clone().unwrap_or_default(),
        }
    }

    pub fn on_phone_keystroke(&mut self, current_value: &str) -> &str {
        self.phone.on_keystroke(current_value)
    }

    pub fn to_request(&self) -> ProfileUpdateRequest {
        ProfileUpdateRequest {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            phone: self.phone.on_submit(),
            company_name: non_blank(&self.company_name),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordChangeForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
    errors: FieldErrors,
}

impl PasswordChangeForm {
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn submit(&mut self) -> PortalApiResult<ChangePasswordRequest> {
        self.errors.clear_all();
        if self.new_password != self.confirm_password {
            self.errors
                .set("confirmPassword", "Новые пароли не совпадают");
            return Err(self.errors.to_error());
        }
        Ok(ChangePasswordRequest {
            current_password: self.current_password.clone(),
            new_password: self.new_password.clone(),
        })
    }

    /// Clear all inputs after a successful change.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
