//! Key layout for identity records and their uniqueness indexes.

use shared_types::{IdentityId, UniqueField};

/// Key prefixes owned by the identity store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPrefix {
    /// `identity:{uuid}` -> StoredIdentity
    Identity,
    /// `identity_prn:{identifier}` -> uuid
    ByIdentifier,
    /// `identity_phone:{10 digits}` -> uuid
    ByPhone,
    /// `identity_email:{lower-cased email}` -> uuid
    ByEmail,
}

impl KeyPrefix {
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            KeyPrefix::Identity => b"identity:",
            KeyPrefix::ByIdentifier => b"identity_prn:",
            KeyPrefix::ByPhone => b"identity_phone:",
            KeyPrefix::ByEmail => b"identity_email:",
        }
    }

    /// Build a full key with the given suffix.
    pub fn key(&self, suffix: &str) -> Vec<u8> {
        let mut key = self.as_bytes().to_vec();
        key.extend_from_slice(suffix.as_bytes());
        key
    }

    pub fn identity_key(id: &IdentityId) -> Vec<u8> {
        KeyPrefix::Identity.key(&id.to_string())
    }

    /// Map a uniqueness index key back to the field it guards.
    pub fn unique_field_of(key: &[u8]) -> Option<UniqueField> {
        if key.starts_with(KeyPrefix::ByIdentifier.as_bytes()) {
            Some(UniqueField::Identifier)
        } else if key.starts_with(KeyPrefix::ByPhone.as_bytes()) {
            Some(UniqueField::Phone)
        } else if key.starts_with(KeyPrefix::ByEmail.as_bytes()) {
            Some(UniqueField::Email)
        } else {
            None
        }
    }
}
