//! # Validator Subsystem
//!
//! **Subsystem ID:** 1
//!
//! ## Purpose
//!
//! Pure syntax checks for every client-supplied field. Nothing here touches
//! storage: uniqueness and department membership are decided downstream by
//! the identity store and the lookup catalog.
//!
//! ## Rules
//!
//! | Field | Rule |
//! |-------|------|
//! | first / last name | ASCII letters and spaces, 2-30 characters |
//! | identifier (PRN) | exactly 13 ASCII digits |
//! | phone | optional `+91` prefix, optional `0`, optional `91`, then `[789]` and 9 digits |
//! | email | `local@domain.tld`, no whitespace |
//! | password | 6+ characters, one uppercase, one digit, one of `!@#$%^&*` |
//! | gender | `male`, `female` or `other` |
//! | request reason | non-empty after trimming, at most 500 characters |
//! | lookup name | 2-64 characters after trimming |
//!
//! ## Final Gate
//!
//! [`validate_registration`] re-runs every rule on the complete form and
//! reports all violations at once. Earlier per-field results (for example
//! from a client that validates while typing) are never trusted.

pub mod domain;

pub use domain::canonical::{canonical_email, canonical_phone};
pub use domain::errors::{FieldViolation, ValidationReport};
pub use domain::registration::{validate_registration, RegistrationForm};
pub use domain::rules::{
    validate_email, validate_gender, validate_identifier, validate_lookup_name, validate_name,
    validate_password, validate_phone, validate_reason, validate_required, FieldResult,
    MAX_LOOKUP_NAME_LENGTH, MAX_REASON_LENGTH, MIN_LOOKUP_NAME_LENGTH, MIN_PASSWORD_LENGTH,
    PASSWORD_SYMBOLS,
};
