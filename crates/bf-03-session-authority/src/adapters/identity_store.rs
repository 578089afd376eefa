use crate::ports::outbound::CredentialLookup;
use async_trait::async_trait;
use bf_02_identity_store::{IdentityError, IdentityStore};
use shared_types::Identity;

#[async_trait]
impl CredentialLookup for IdentityStore {
    async fn verifier_for_email(
        &self,
        email: &str,
    ) -> Result<Option<(Identity, String)>, IdentityError> {
        self.find_by_email(email).await
    }

    async fn identity_for_pair(
        &self,
        identifier: &str,
        email: &str,
    ) -> Result<Identity, IdentityError> {
        self.find_by_credential_pair(identifier, email).await
    }
}
