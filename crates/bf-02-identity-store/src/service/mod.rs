//! # Identity Store Service
//!
//! Registration and identity reads over the shared key-value store.


use crate::domain::candidate::IdentityCandidate;
use crate::domain::errors::IdentityError;
use crate::domain::keys::KeyPrefix;
use crate::domain::record::StoredIdentity;
use bf_01_validator::canonical_email;
use shared_store::{decode, encode, BatchOperation, KVStoreError, Precondition, StoreHandle};
use shared_types::{Identity, IdentityId, TimeSource};
use std::sync::Arc;

/// Identity persistence with atomic uniqueness enforcement.
#[derive(Clone)]
pub struct IdentityStore {
    store: StoreHandle,
    time_source: Arc<dyn TimeSource>,
}

impl IdentityStore {
    pub fn new(store: StoreHandle, time_source: Arc<dyn TimeSource>) -> Self {
        Self { store, time_source }
    }

    /// Persist a new identity.
    ///
    /// The three uniqueness index keys must all be absent; the record and the
    /// index keys are written in the same atomic batch. When a key is taken
    /// the error names the field that collided.
    pub async fn register(&self, candidate: IdentityCandidate) -> Result<Identity, IdentityError> {
        let phone = candidate.canonical_phone();
        let email = candidate.canonical_email();

        let identity = Identity {
            id: IdentityId::new(),
            first_name: candidate.first_name,
            last_name: candidate.last_name,
            identifier: candidate.identifier,
            phone,
            email,
            department: candidate.department,
            gender: candidate.gender,
            created_at: self.time_source.now(),
        };

        let prn_key = KeyPrefix::ByIdentifier.key(&identity.identifier);
        let phone_key = KeyPrefix::ByPhone.key(&identity.phone);
        let email_key = KeyPrefix::ByEmail.key(&identity.email);
        let id_value = encode(&identity.id)?;

        let record = StoredIdentity {
            identity: identity.clone(),
            password_verifier: candidate.password_verifier,
        };

        let preconditions = vec![
            Precondition::absent(prn_key.clone()),
            Precondition::absent(phone_key.clone()),
            Precondition::absent(email_key.clone()),
        ];
        let operations = vec![
            BatchOperation::put(KeyPrefix::identity_key(&identity.id), encode(&record)?),
            BatchOperation::put(prn_key, id_value.clone()),
            BatchOperation::put(phone_key, id_value.clone()),
            BatchOperation::put(email_key, id_value),
        ];

        match self
            .store
            .conditional_batch_write(preconditions, operations)
            .await
        {
            Ok(()) => {
                tracing::info!(
                    subsystem = "bf-02",
                    identity_id = %identity.id,
                    department = %identity.department,
                    "Identity registered"
                );
                Ok(identity)
            }
            Err(KVStoreError::ConditionFailed { key }) => {
                match KeyPrefix::unique_field_of(&key) {
                    Some(field) => {
                        tracing::info!(subsystem = "bf-02", field = %field, "Duplicate registration rejected");
                        Err(IdentityError::DuplicateField(field))
                    }
                    None => Err(IdentityError::Store(KVStoreError::ConditionFailed { key })),
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve an identity from an identifier and email pair.
    ///
    /// Both must index the same identity. Any mismatch, including either one
    /// being unknown, is [`IdentityError::InvalidCombination`].
    pub async fn find_by_credential_pair(
        &self,
        identifier: &str,
        email: &str,
    ) -> Result<Identity, IdentityError> {
        let by_identifier = self
            .resolve_index(KeyPrefix::ByIdentifier.key(identifier))
            .await?;
        let by_email = self
            .resolve_index(KeyPrefix::ByEmail.key(&canonical_email(email)))
            .await?;

        match (by_identifier, by_email) {
            (Some(a), Some(b)) if a == b => self.get(a).await,
            _ => Err(IdentityError::InvalidCombination),
        }
    }

    /// Identity and password verifier for an email address, if registered.
    pub async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<(Identity, String)>, IdentityError> {
        let Some(id) = self
            .resolve_index(KeyPrefix::ByEmail.key(&canonical_email(email)))
            .await?
        else {
            return Ok(None);
        };

        let record = self
            .load_record(id)
            .await?
            .ok_or(IdentityError::NotFound(id))?;
        Ok(Some((record.identity, record.password_verifier)))
    }

    pub async fn get(&self, id: IdentityId) -> Result<Identity, IdentityError> {
        self.load_record(id)
            .await?
            .map(|record| record.identity)
            .ok_or(IdentityError::NotFound(id))
    }

    async fn resolve_index(&self, key: Vec<u8>) -> Result<Option<IdentityId>, IdentityError> {
        match self.store.get(key).await? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn load_record(&self, id: IdentityId) -> Result<Option<StoredIdentity>, IdentityError> {
        match self.store.get(KeyPrefix::identity_key(&id)).await? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }
}
