//! Russian phone numbers: the masked display form used in editable fields and
//! the canonical 11-digit form sent to the backend.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Country code every number is assumed to carry.
pub const COUNTRY_CODE: char = '7';

/// National trunk prefix that users commonly type instead of the country code.
pub const TRUNK_PREFIX: char = '8';

/// Number of significant digits in a full number, country code included.
pub const SIGNIFICANT_DIGITS: usize = 11;

fn strip_non_digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Convert the live value of a phone input into the `+7 (XXX) XXX-XX-XX` mask.
///
/// Non-digits are dropped first. A full 11-digit number with the trunk prefix
/// `8` gets `7` in its place; otherwise any leading digit other than `7` gets
/// `7` prepended, so a 10-digit number with an `8` area code keeps it. The
/// mask is then built only from the segments the digits reach so far, and
/// digits past the 11th are ignored.
///
/// Never fails; empty input yields an empty string.
///
/// # Example
///
/// ```
/// use portal_mcp_server::domain::phone::format_display;
///
/// assert_eq!(format_display("9991234567"), "+7 (999) 123-45-67");
/// assert_eq!(format_display("8121234567"), "+7 (812) 123-45-67");
/// assert_eq!(format_display("+7 (99"), "+7 (99");
/// assert_eq!(format_display(""), "");
/// ```
pub fn format_display(raw: &str) -> String {
    let mut digits = strip_non_digits(raw);

    if digits.starts_with(TRUNK_PREFIX) && digits.len() == SIGNIFICANT_DIGITS {
        digits.replace_range(0..1, "7");
    } else if !digits.is_empty() && !digits.starts_with(COUNTRY_CODE) {
        digits.insert(0, COUNTRY_CODE);
    }

    let len = digits.len();
    // Digits are ASCII, so byte offsets are char offsets.
    let segment = |from: usize, to: usize| &digits[from.min(len)..to.min(len)];

    let mut formatted = String::with_capacity(18);
    if len >= 1 {
        formatted.push('+');
        formatted.push_str(segment(0, 1));
    }
    if len >= 2 {
        formatted.push_str(" (");
        formatted.push_str(segment(1, 4));
    }
    if len >= 5 {
        formatted.push_str(") ");
        formatted.push_str(segment(4, 7));
    }
    if len >= 8 {
        formatted.push('-');
        formatted.push_str(segment(7, 9));
    }
    if len >= 10 {
        formatted.push('-');
        formatted.push_str(segment(9, SIGNIFICANT_DIGITS));
    }

    formatted
}

/// Convert a human-entered or masked phone string into the canonical
/// representation expected by the backend (e.g. `79991234567`).
///
/// Rules, first match wins, applied to the digits of the input:
///
/// 1. `8` followed by 10 digits: the `8` becomes `7`
/// 2. `7` followed by 10 digits: unchanged
/// 3. `7` followed by 11 digits: the first digit is dropped
/// 4. exactly 10 digits: `7` is prepended
/// 5. anything else is passed through as digits only
///
/// Never fails; malformed input degrades to its digit string.
pub fn normalize_for_server(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let digits = strip_non_digits(input);
    let len = digits.len();

    if digits.starts_with(TRUNK_PREFIX) && len == SIGNIFICANT_DIGITS {
        return format!("{}{}", COUNTRY_CODE, &digits[1..]);
    }
    if digits.starts_with(COUNTRY_CODE) && len == SIGNIFICANT_DIGITS {
        return digits;
    }
    if digits.starts_with(COUNTRY_CODE) && len == SIGNIFICANT_DIGITS + 1 {
        return digits[1..].to_string();
    }
    if len == SIGNIFICANT_DIGITS - 1 {
        return format!("{}{}", COUNTRY_CODE, digits);
    }

    digits
}

/// Check whether a string already is a canonical phone representation.
pub fn is_canonical(value: &str) -> bool {
    value.len() == SIGNIFICANT_DIGITS
        && value.starts_with(COUNTRY_CODE)
        && value.chars().all(|c| c.is_ascii_digit())
}

/// A phone number held in canonical form.
///
/// Construction runs the input through [`normalize_for_server`] and rejects
/// results that are not 11 digits starting with `7`. Serializes as the
/// canonical string; `Display` renders the masked form.
///
/// # Example
///
/// ```
/// use portal_mcp_server::domain::PhoneNumber;
///
/// let phone = PhoneNumber::parse("8 (999) 123-45-67").unwrap();
/// assert_eq!(phone.as_str(), "79991234567");
/// assert_eq!(phone.to_string(), "+7 (999) 123-45-67");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parse any human-entered phone string.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPhone` if the normalized value is not
    /// a full Russian number.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let canonical = normalize_for_server(input);
        if !is_canonical(&canonical) {
            return Err(ValidationError::InvalidPhone(input.to_string()));
        }
        Ok(Self(canonical))
    }

    /// The canonical 11-digit representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The masked display representation.
    pub fn display(&self) -> String {
        format_display(&self.0)
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PhoneNumber::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
