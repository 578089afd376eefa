//! # Outbound Port
//!
//! What the session authority needs from identity persistence.

use async_trait::async_trait;
use bf_02_identity_store::IdentityError;
use shared_types::Identity;

/// Credential lookups used at login.
#[async_trait]
pub trait CredentialLookup: Send + Sync {
    /// Identity and stored password verifier for an email, if registered.
    async fn verifier_for_email(
        &self,
        email: &str,
    ) -> Result<Option<(Identity, String)>, IdentityError>;

    /// Identity that owns both `identifier` and `email`.
    async fn identity_for_pair(
        &self,
        identifier: &str,
        email: &str,
    ) -> Result<Identity, IdentityError>;
}
