//! Registration final gate.

use super::errors::ValidationReport;
use super::rules::{
    validate_email, validate_gender, validate_identifier, validate_name, validate_password,
    validate_phone, validate_required,
};
use serde::Deserialize;
use std::fmt;

/// Raw registration form as submitted by a client.
///
/// Every field is a plain string so a malformed value reaches the validator
/// instead of failing deserialization with an opaque error.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub identifier: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    pub department: String,
    pub gender: String,
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("identifier", &self.identifier)
            .field("phone", &self.phone)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("department", &self.department)
            .field("gender", &self.gender)
            .finish()
    }
}

/// Re-run every rule on the complete form and collect all violations.
pub fn validate_registration(form: &RegistrationForm) -> Result<(), ValidationReport> {
    let mut report = ValidationReport::default();

    report.check(validate_name("firstName", &form.first_name));
    report.check(validate_name("lastName", &form.last_name));
    report.check(validate_identifier(&form.identifier));
    report.check(validate_phone(&form.phone));
    report.check(validate_email(&form.email));
    report.check(validate_password(&form.password));
    report.check(validate_required("department", &form.department));
    report.check(validate_gender(&form.gender));

    report.into_result()
}
