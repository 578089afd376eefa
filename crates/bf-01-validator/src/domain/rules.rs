//! Per-field syntax rules.
//!
//! Each rule takes the raw client string and either accepts it or returns one
//! [`FieldViolation`] naming the field. Rules never panic on any input.

use super::errors::FieldViolation;
use regex::Regex;
use std::sync::LazyLock;

/// Outcome of a single rule.
pub type FieldResult = Result<(), FieldViolation>;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Symbols of which a password must contain at least one.
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*";

/// Maximum request reason length, in characters, after trimming.
pub const MAX_REASON_LENGTH: usize = 500;

pub const MIN_LOOKUP_NAME_LENGTH: usize = 2;
pub const MAX_LOOKUP_NAME_LENGTH: usize = 64;

// The patterns are constants; a failure to compile is a programming error.
static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z ]{1,29}$").expect("NAME_REGEX is a valid pattern"));

static IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{13}$").expect("IDENTIFIER_REGEX is a valid pattern"));

static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\+91[- ]?)?0?(91)?[789][0-9]{9}$").expect("PHONE_REGEX is a valid pattern")
});

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("EMAIL_REGEX is a valid pattern")
});

/// Given or family name: ASCII letters and spaces, 2 to 30 characters
/// after trimming, starting with a letter.
pub fn validate_name(field: &str, value: &str) -> FieldResult {
    if NAME_REGEX.is_match(value.trim()) {
        Ok(())
    } else {
        Err(FieldViolation::new(
            field,
            "must be 2-30 characters and contain only letters and spaces",
        ))
    }
}

/// Institutional identifier (PRN): exactly 13 ASCII digits.
pub fn validate_identifier(value: &str) -> FieldResult {
    if IDENTIFIER_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(FieldViolation::new(
            "identifier",
            "must be exactly 13 digits",
        ))
    }
}

pub fn validate_phone(value: &str) -> FieldResult {
    if PHONE_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(FieldViolation::new(
            "phone",
            "must be a 10-digit mobile number starting with 7, 8 or 9, optionally prefixed by +91",
        ))
    }
}

pub fn validate_email(value: &str) -> FieldResult {
    if EMAIL_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(FieldViolation::new("email", "must be a valid email address"))
    }
}

/// Password strength.
///
/// Reports the first unmet requirement, checked in the order: length,
/// uppercase letter, digit, symbol.
pub fn validate_password(value: &str) -> FieldResult {
    let violation = |reason: &str| Err(FieldViolation::new("password", reason));

    if value.chars().count() < MIN_PASSWORD_LENGTH {
        return violation("must be at least 6 characters long");
    }
    if !value.chars().any(|c| c.is_ascii_uppercase()) {
        return violation("must contain at least one uppercase letter");
    }
    if !value.chars().any(|c| c.is_ascii_digit()) {
        return violation("must contain at least one digit");
    }
    if !value.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        return violation("must contain at least one of !@#$%^&*");
    }
    Ok(())
}

pub fn validate_gender(value: &str) -> FieldResult {
    match value {
        "male" | "female" | "other" => Ok(()),
        _ => Err(FieldViolation::new(
            "gender",
            "must be one of male, female or other",
        )),
    }
}

/// Bonafide request reason: non-empty after trimming, at most 500 characters.
pub fn validate_reason(value: &str) -> FieldResult {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldViolation::new("reason", "must not be empty"));
    }
    if trimmed.chars().count() > MAX_REASON_LENGTH {
        return Err(FieldViolation::new(
            "reason",
            "must be at most 500 characters",
        ));
    }
    Ok(())
}

/// Lookup catalog display name, measured after trimming.
pub fn validate_lookup_name(value: &str) -> FieldResult {
    let len = value.trim().chars().count();
    if (MIN_LOOKUP_NAME_LENGTH..=MAX_LOOKUP_NAME_LENGTH).contains(&len) {
        Ok(())
    } else {
        Err(FieldViolation::new(
            "name",
            "must be 2-64 characters",
        ))
    }
}

/// Presence check for free-form fields such as the department.
pub fn validate_required(field: &str, value: &str) -> FieldResult {
    if value.trim().is_empty() {
        Err(FieldViolation::new(field, "is required"))
    } else {
        Ok(())
    }
}
