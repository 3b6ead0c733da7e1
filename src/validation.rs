//! Client-side validation rules applied before a payload is sent.
//!
//! These are presence and shape checks only; the backend stays authoritative.
//! Every predicate is total and simply answers yes or no.

use crate::domain::{EmailAddress, PhoneNumber};
use crate::models::{CreateApplicationRequest, RegisterRequest};
use once_cell::sync::Lazy;
use regex::Regex;

static FULL_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Zа-яА-ЯёЁ\s\-]{2,100}$").expect("Failed to compile full name regex")
});

static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[1-9][0-9]{1,14}$").expect("Failed to compile phone regex"));

static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://[A-Za-z0-9_](?:[A-Za-z0-9_\-.]*[A-Za-z0-9_])?(?::[0-9]{1,5})?(?:[/?#]\S*)?$")
        .expect("Failed to compile URL regex")
});

static UUID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .expect("Failed to compile UUID regex")
});

const PASSWORD_SPECIALS: &str = "@$!%*?&";

pub fn validate_email(email: &str) -> bool {
    EmailAddress::is_valid(email)
}

/// At least 8 characters from `[A-Za-z0-9@$!%*?&]`, with a lowercase letter,
/// an uppercase letter and a digit.
pub fn validate_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c))
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

/// Latin or Cyrillic letters, whitespace and hyphens, 2 to 100 characters
/// after trimming.
pub fn validate_full_name(full_name: &str) -> bool {
    FULL_NAME_REGEX.is_match(full_name.trim())
}

/// International format: optional `+`, no leading zero, 2 to 15 digits.
pub fn validate_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

/// A full Russian number already in the canonical wire form, e.g.
/// `79991234567`. Partially typed numbers fail.
pub fn validate_contact_phone(phone: &str) -> bool {
    PhoneNumber::parse(phone).is_ok_and(|parsed| parsed.as_str() == phone)
}

pub fn validate_company_name(company_name: &str) -> bool {
    company_name.chars().count() <= 100
}

pub fn validate_title(title: &str) -> bool {
    (5..=200).contains(&title.chars().count())
}

pub fn validate_description(description: &str) -> bool {
    description.chars().count() <= 5000
}

pub fn validate_budget(budget: f64) -> bool {
    budget.is_finite() && budget >= 0.0
}

/// Absolute http(s) URL with a host and no trailing dot.
pub fn validate_url(url: &str) -> bool {
    URL_REGEX.is_match(url)
}

/// A real calendar date written exactly as `YYYY-MM-DD`.
pub fn validate_date(date: &str) -> bool {
    chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|parsed| parsed.format("%Y-%m-%d").to_string() == date)
        .unwrap_or(false)
}

pub fn validate_uuid(uuid: &str) -> bool {
    UUID_REGEX.is_match(uuid)
}

/// Accumulated rule violations for one payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn check(&mut self, ok: bool, message: &str) {
        if !ok {
            self.errors.push(message.to_string());
        }
    }

    /// Turn a failed report into the crate error.
    pub fn into_result(self) -> crate::error::PortalApiResult<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(crate::error::PortalApiError::Validation(self.errors))
        }
    }
}

pub fn validate_register_data(data: &RegisterRequest) -> ValidationReport {
    let mut report = ValidationReport::default();

    report.check(validate_email(&data.email), "Некорректный формат email");
    report.check(
        validate_password(&data.password),
        "Пароль должен содержать минимум 8 символов, включая заглавную букву, строчную букву и цифру",
    );
    report.check(
        validate_full_name(&data.full_name),
        "ФИО должно содержать только буквы, иметь длину от 2 до 100 символов",
    );
    if !data.phone.is_empty() {
        report.check(validate_phone(&data.phone), "Некорректный формат телефона");
    }
    if let Some(company) = &data.company_name {
        report.check(
            validate_company_name(company),
            "Название компании не должно превышать 100 символов",
        );
    }

    report
}

pub fn validate_application_data(data: &CreateApplicationRequest) -> ValidationReport {
    let mut report = ValidationReport::default();

    report.check(
        validate_title(&data.title),
        "Заголовок должен содержать от 5 до 200 символов",
    );
    if let Some(description) = &data.description {
        report.check(
            validate_description(description),
            "Описание не должно превышать 5000 символов",
        );
    }
    if !data.contact_email.is_empty() {
        report.check(
            validate_email(&data.contact_email),
            "Некорректный формат email контакта",
        );
    }
    if !data.contact_phone.is_empty() {
        report.check(
            validate_contact_phone(&data.contact_phone),
            "Некорректный формат телефона контакта",
        );
    }

    report
}
