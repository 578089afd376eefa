//! Key layout for requests and their projections.

use shared_types::{BonafideRequest, IdentityId, RequestId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPrefix {
    /// `request:{uuid}` -> BonafideRequest
    Request,
    /// `request_by_identity:{identity}:{micros}:{uuid}` -> uuid
    ByIdentity,
    /// `request_pending:{identity}` -> uuid
    Pending,
}

impl KeyPrefix {
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            KeyPrefix::Request => b"request:",
            KeyPrefix::ByIdentity => b"request_by_identity:",
            KeyPrefix::Pending => b"request_pending:",
        }
    }

    pub fn key(&self, suffix: &str) -> Vec<u8> {
        let mut key = self.as_bytes().to_vec();
        key.extend_from_slice(suffix.as_bytes());
        key
    }

    pub fn request_key(id: &RequestId) -> Vec<u8> {
        KeyPrefix::Request.key(&id.to_string())
    }

    pub fn pending_key(identity: &IdentityId) -> Vec<u8> {
        KeyPrefix::Pending.key(&identity.to_string())
    }

    /// Scan prefix for one identity's history.
    pub fn identity_prefix(identity: &IdentityId) -> Vec<u8> {
        KeyPrefix::ByIdentity.key(&format!("{}:", identity))
    }

    /// History key. The zero-padded timestamp makes byte order creation order.
    pub fn history_key(request: &BonafideRequest) -> Vec<u8> {
        let mut key = Self::identity_prefix(&request.identity_id);
        key.extend_from_slice(
            format!(
                "{:020}:{}",
                request.created_at.timestamp_micros().max(0),
                request.id
            )
            .as_bytes(),
        );
        key
    }
}
