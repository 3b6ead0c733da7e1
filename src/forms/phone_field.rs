//! Controlled phone input.

use crate::domain::phone::{format_display, normalize_for_server, COUNTRY_CODE, TRUNK_PREFIX};

/// State of one phone input.
///
/// Every keystroke replaces the value with the masked form of whatever the
/// input currently contains; submission reads the canonical form without
/// touching what the user sees.
///
/// An `8` typed as the very first digit is the trunk prefix and shows as
/// `+7`; anything pasted or typed after it goes through the formatter as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneField {
    display_value: String,
}

impl PhoneField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate from a value received from the backend. Missing values give
    /// an empty field.
    pub fn prefilled(inbound: Option<&str>) -> Self {
        Self {
            display_value: inbound.map(format_display).unwrap_or_default(),
        }
    }

    /// Handle a change event carrying the input's current raw value.
    /// Returns the new display value.
    pub fn on_keystroke(&mut self, current_value: &str) -> &str {
        let mut digits = current_value.chars().filter(|c| c.is_ascii_digit());
        let typed_trunk_prefix = self.display_value.is_empty()
            && digits.next() == Some(TRUNK_PREFIX)
            && digits.next().is_none();

        self.display_value = if typed_trunk_prefix {
            format_display(&COUNTRY_CODE.to_string())
        } else {
            format_display(current_value)
        };
        &self.display_value
    }

    /// Canonical value to attach to the outgoing request.
    pub fn on_submit(&self) -> String {
        normalize_for_server(&self.display_value)
    }

    pub fn display_value(&self) -> &str {
        &self.display_value
    }

    pub fn is_blank(&self) -> bool {
        self.display_value.trim().is_empty()
    }

    pub fn reset(&mut self) {
        self.display_value.clear();
    }
}
