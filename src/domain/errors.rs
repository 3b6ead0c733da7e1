//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided email address is invalid.
    InvalidEmail(String),

    /// The provided phone number is not a full Russian number.
    InvalidPhone(String),

    /// A string did not name any variant of a backend enumeration.
    UnknownVariant { kind: &'static str, value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
            Self::InvalidPhone(phone) => write!(f, "Invalid phone number: {}", phone),
            Self::UnknownVariant { kind, value } => write!(f, "Unknown {}: {}", kind, value),
        }
    }
}

impl std::error::Error for ValidationError {}
