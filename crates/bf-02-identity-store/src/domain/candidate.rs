//! Registration input accepted by the identity store.

use bf_01_validator::{canonical_email, canonical_phone};
use shared_types::Gender;

/// A syntactically valid registration, with the password already turned
/// into a verifier.
///
/// The store does not re-validate syntax; callers run the validator's final
/// gate first.
#[derive(Clone)]
pub struct IdentityCandidate {
    pub first_name: String,
    pub last_name: String,
    pub identifier: String,
    pub phone: String,
    pub email: String,
    pub department: String,
    pub gender: Gender,
    /// PHC string produced by the session authority. Never plaintext.
    pub password_verifier: String,
}

impl IdentityCandidate {
    pub fn canonical_phone(&self) -> String {
        canonical_phone(&self.phone)
    }

    pub fn canonical_email(&self) -> String {
        canonical_email(&self.email)
    }
}

impl std::fmt::Debug for IdentityCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityCandidate")
            .field("identifier", &self.identifier)
            .field("email", &self.email)
            .field("department", &self.department)
            .finish_non_exhaustive()
    }
}
