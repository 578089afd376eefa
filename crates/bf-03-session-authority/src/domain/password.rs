//! Password hashing with Argon2id.
//!
//! Verifiers are PHC strings; the plaintext never leaves the request handler
//! that received it.

use super::errors::SessionError;
use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

/// Argon2id hasher.
///
/// Defaults to the OWASP parameters m=19456 KiB, t=2, p=1.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    pub fn new() -> Result<Self, SessionError> {
        Self::with_params(19456, 2, 1)
    }

    /// Custom cost parameters. Tests use the smallest legal values.
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, SessionError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| SessionError::Hashing(format!("invalid parameters: {e}")))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a password into a PHC verifier string.
    pub fn hash(&self, password: &str) -> Result<String, SessionError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| SessionError::Hashing(e.to_string()))?;
        Ok(hash.to_string())
    }

    /// Check a password against a stored verifier.
    ///
    /// An unparsable verifier counts as a mismatch.
    pub fn verify(&self, password: &str, verifier: &str) -> bool {
        match PasswordHash::new(verifier) {
            Ok(parsed) => self
                .argon2()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::error!(subsystem = "bf-03", error = %e, "Stored password verifier is unparsable");
                false
            }
        }
    }
}
