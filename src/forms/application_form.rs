//! Order form on the public site and the "new application" form in the
//! client area. Both collect the same fields; only the client area offers a
//! budget range.

use super::{FieldErrors, PhoneField};
use crate::error::PortalApiResult;
use crate::models::{BudgetRange, CreateApplicationRequest, ServiceType, User};

/// Free-text fields of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationField {
    Title,
    Description,
    ContactFullName,
    ContactEmail,
    CompanyName,
}

impl ApplicationField {
    pub fn key(&self) -> &'static str {
        match self {
            ApplicationField::Title => "title",
            ApplicationField::Description => "description",
            ApplicationField::ContactFullName => "contactFullName",
            ApplicationField::ContactEmail => "contactEmail",
            ApplicationField::CompanyName => "companyName",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationForm {
    pub title: String,
    pub description: String,
    pub service_type: Option<ServiceType>,
    pub contact_full_name: String,
    pub contact_email: String,
    pub contact_phone: PhoneField,
    pub company_name: String,
    pub budget_range: Option<BudgetRange>,
    errors: FieldErrors,
}

impl ApplicationForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty form with contact details taken from the signed-in user.
    pub fn for_user(user: Option<&User>) -> Self {
        let mut form = Self::new();
        form.prefill_contact(user);
        form
    }

    fn prefill_contact(&mut self, user: Option<&User>) {
        let Some(user) = user else {
            return;
        };
        self.contact_full_name = user.full_name.clone();
        self.contact_email = user.email.clone();
        self.contact_phone = PhoneField::prefilled(user.phone.as_deref());
        self.company_name = user.company_name.clone().unwrap_or_default();
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Change handler for text inputs; editing a field clears its error.
    pub fn set_text(&mut self, field: ApplicationField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ApplicationField::Title => self.title = value,
            ApplicationField::Description => self.description = value,
            ApplicationField::ContactFullName => self.contact_full_name = value,
            ApplicationField::ContactEmail => self.contact_email = value,
            ApplicationField::CompanyName => self.company_name = value,
        }
        self.errors.clear(field.key());
    }

    pub fn set_service_type(&mut self, service_type: Option<ServiceType>) {
        self.service_type = service_type;
        self.errors.clear("serviceType");
    }

    pub fn set_budget_range(&mut self, budget_range: Option<BudgetRange>) {
        self.budget_range = budget_range;
    }

    /// Change handler for the phone input.
    pub fn on_phone_keystroke(&mut self, current_value: &str) -> &str {
        self.contact_phone.on_keystroke(current_value)
    }

    /// Run the presence checks shown before submission. Returns `true` when
    /// the form may be sent.
    pub fn validate(&mut self) -> bool {
        self.errors.clear_all();

        if self.title.trim().is_empty() {
            self.errors.set("title", "Название обязательно");
        }
        if self.title.chars().count() < 5 {
            self.errors
                .set("title", "Название должно быть не менее 5 символов");
        }
        if self.service_type.is_none() {
            self.errors.set("serviceType", "Тип услуги обязателен");
        }
        if self.contact_full_name.trim().is_empty() {
            self.errors
                .set("contactFullName", "Контактное лицо обязательно");
        }
        if self.contact_email.trim().is_empty() {
            self.errors.set("contactEmail", "Email обязателен");
        }
        if self.contact_phone.is_blank() {
            self.errors.set("contactPhone", "Телефон обязателен");
        }

        self.errors.is_empty()
    }

    /// Build the outgoing payload. The phone is normalized here and only here.
    pub fn to_request(&self) -> CreateApplicationRequest {
        CreateApplicationRequest {
            title: self.title.clone(),
            description: non_blank(&self.description),
            service_type: self.service_type,
            contact_full_name: self.contact_full_name.clone(),
            contact_email: self.contact_email.clone(),
            contact_phone: self.contact_phone.on_submit(),
            company_name: non_blank(&self.company_name),
            budget_range: self.budget_range,
            priority: None,
        }
    }

    /// Validate and, if the form is clean, produce the payload.
    pub fn submit(&mut self) -> PortalApiResult<CreateApplicationRequest> {
        if !self.validate() {
            return Err(self.errors.to_error());
        }
        Ok(self.to_request())
    }

    /// Reset after a successful submission, keeping the user's contact details.
    pub fn reset_for(&mut self, user: Option<&User>) {
        *self = Self::for_user(user);
    }
}

pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
