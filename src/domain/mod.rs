//! Domain value objects and types.
//!
//! Type-safe wrappers for the values the portal sends to its backend. Phone
//! numbers are the interesting one: they live as a masked display string in
//! form fields and as a canonical digit string on the wire.

pub mod email;
pub mod errors;
pub mod phone;

pub use email::EmailAddress;
pub use errors::ValidationError;
pub use phone::{format_display, normalize_for_server, PhoneNumber};
