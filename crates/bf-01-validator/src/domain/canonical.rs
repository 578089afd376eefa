//! Canonical forms used as uniqueness keys.
//!
//! Two spellings of the same phone number or email address must collide in
//! the identity store, so both are reduced before they become index keys.

/// Number of significant digits in a mobile number.
const PHONE_SIGNIFICANT_DIGITS: usize = 10;

/// Reduce an accepted phone number to its 10 significant digits.
///
/// `+91 9876543210`, `09876543210` and `9876543210` all map to
/// `9876543210`. Inputs with fewer digits are returned digit-only.
pub fn canonical_phone(phone: &str) -> String {
    let digits: Vec<char> = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    let start = digits.len().saturating_sub(PHONE_SIGNIFICANT_DIGITS);
    digits[start..].iter().collect()
}

/// Trimmed, lower-cased email address.
pub fn canonical_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_prefixes_collapse() {
        for raw in [
            "9876543210",
            "+919876543210",
            "+91 9876543210",
            "+91-9876543210",
            "09876543210",
            "919876543210",
        ] {
            assert_eq!(canonical_phone(raw), "9876543210", "{}", raw);
        }
    }

    #[test]
    fn test_short_phone_kept() {
        assert_eq!(canonical_phone("12-34"), "1234");
    }

    #[test]
    fn test_email_case_folds() {
        assert_eq!(canonical_email("  A@X.com "), "a@x.com");
    }
}
