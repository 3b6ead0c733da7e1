//! Registration form.

use super::application_form::non_blank;
use super::{FieldErrors, PhoneField};
use crate::error::PortalApiResult;
use crate::models::RegisterRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterField {
    FullName,
    Email,
    Password,
    ConfirmPassword,
    CompanyName,
}

impl RegisterField {
    pub fn key(&self) -> &'static str {
        match self {
            RegisterField::FullName => "fullName",
            RegisterField::Email => "email",
            RegisterField::Password => "password",
            RegisterField::ConfirmPassword => "confirmPassword",
            RegisterField::CompanyName => "companyName",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: PhoneField,
    pub company_name: String,
    errors: FieldErrors,
}

impl RegisterForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn set_text(&mut self, field: RegisterField, value: impl Into<String>) {
        let value = value.into();
        match field {
            RegisterField::FullName => self.full_name = value,
            RegisterField::Email => self.email = value,
            RegisterField::Password => self.password = value,
            RegisterField::ConfirmPassword => self.confirm_password = value,
            RegisterField::CompanyName => self.company_name = value,
        }
        self.errors.clear(field.key());
    }

    pub fn on_phone_keystroke(&mut self, current_value: &str) -> &str {
        self.phone.on_keystroke(current_value)
    }

    pub fn validate(&mut self) -> bool {
        self.errors.clear_all();

        if self.full_name.trim().is_empty() {
            self.errors.set("fullName", "ФИО обязательно");
        }
        if self.email.trim().is_empty() {
            self.errors.set("email", "Email обязателен");
        }
        if self.password.is_empty() {
            self.errors.set("password", "Пароль обязателен");
        }
        if self.password.chars().count() < 6 {
            self.errors
                .set("password", "Пароль должен быть не менее 6 символов");
        }
        if self.password != self.confirm_password {
            self.errors.set("confirmPassword", "Пароли не совпадают");
        }
        if self.phone.is_blank() {
            self.errors.set("phone", "Телефон обязателен");
        }

        self.errors.is_empty()
    }

    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            phone: self.phone.on_submit(),
            company_name: non_blank(&self.company_name),
        }
    }

    pub fn submit(&mut self) -> PortalApiResult<RegisterRequest> {
        if !self.validate() {
            return Err(self.errors.to_error());
        }
        Ok(self.to_request())
    }
}
