//! In-process revocation list.

use dashmap::DashMap;
use shared_types::{Session, SessionId};

/// Revoked sessions, remembered until their natural expiry.
///
/// Entries past expiry are dropped whenever a new revocation is recorded,
/// so the list stays bounded by the number of live revoked sessions.
#[derive(Debug, Default)]
pub struct RevocationList {
    /// session id -> expires_at (Unix seconds)
    entries: DashMap<SessionId, i64>,
}

impl RevocationList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn revoke(&self, session: &Session, now_secs: i64) {
        self.entries.retain(|_, expires_at| *expires_at > now_secs);
        self.entries.insert(session.id, session.expires_at);
    }

    pub fn is_revoked(&self, id: &SessionId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
