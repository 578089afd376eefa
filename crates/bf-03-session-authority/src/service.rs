//! # Session Authority Service

use crate::domain::errors::SessionError;
use crate::domain::password::PasswordHasher;
use crate::domain::revocation::RevocationList;
use crate::domain::token::TokenCodec;
use crate::ports::outbound::CredentialLookup;
use bf_02_identity_store::IdentityError;
use shared_types::{Classify, ErrorKind, Identity, Session, SessionId, TimeSource};
use std::sync::Arc;

/// Default session lifetime (1 hour).
pub const DEFAULT_SESSION_TTL_SECS: u64 = 3600;

/// Session authority configuration.
#[derive(Clone)]
pub struct SessionConfig {
    /// HMAC signing secret, at least 32 bytes.
    pub secret: Vec<u8>,
    pub ttl_secs: u64,
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret", &"<redacted>")
            .field("ttl_secs", &self.ttl_secs)
            .finish()
    }
}

/// Issues and resolves sessions.
#[derive(Clone)]
pub struct SessionAuthority {
    lookup: Arc<dyn CredentialLookup>,
    hasher: PasswordHasher,
    // Stands in for the stored verifier when the email is unknown.
    dummy_verifier: Arc<str>,
    codec: TokenCodec,
    revocations: Arc<RevocationList>,
    time_source: Arc<dyn TimeSource>,
    ttl_secs: i64,
}

impl SessionAuthority {
    /// Fails with [`SessionError::WeakSecret`] for a short or all-zero secret.
    ///
    /// Hashes one throwaway password with the given cost parameters.
    pub fn new(
        config: SessionConfig,
        lookup: Arc<dyn CredentialLookup>,
        hasher: PasswordHasher,
        time_source: Arc<dyn TimeSource>,
    ) -> Result<Self, SessionError> {
        let codec = TokenCodec::new(config.secret)?;
        let dummy_verifier = hasher.hash("unknown-account-placeholder")?.into();
        Ok(Self {
            lookup,
            hasher,
            dummy_verifier,
            codec,
            revocations: Arc::new(RevocationList::new()),
            time_source,
            ttl_secs: i64::try_from(config.ttl_secs).unwrap_or(i64::MAX),
        })
    }

    fn now_secs(&self) -> i64 {
        self.time_source.now().timestamp()
    }

    /// Verify credentials and open a session.
    ///
    /// When `identifier` is given, it must belong to the same identity as
    /// `email`; that check runs before any password comparison.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
        identifier: Option<&str>,
    ) -> Result<Session, SessionError> {
        if let Some(identifier) = identifier {
            self.lookup
                .identity_for_pair(identifier, email)
                .await
                .map_err(|e| reject_lookup("identifier/email mismatch", e))?;
        }

        let found = self
            .lookup
            .verifier_for_email(email)
            .await
            .map_err(|e| reject_lookup("email lookup failed", e))?;
        let (identity, verifier) = match found {
            Some((identity, verifier)) => (Some(identity), Arc::<str>::from(verifier)),
            None => (None, self.dummy_verifier.clone()),
        };

        let hasher = self.hasher.clone();
        let password = password.to_owned();
        let matches = tokio::task::spawn_blocking(move || hasher.verify(&password, &verifier))
            .await
            .map_err(|e| SessionError::Hashing(e.to_string()))?;

        let Some(identity) = identity else {
            tracing::debug!(subsystem = "bf-03", "Login rejected: unknown email");
            return Err(SessionError::InvalidCredentials);
        };
        if !matches {
            tracing::warn!(
                subsystem = "bf-03",
                identity_id = %identity.id,
                "Login rejected: wrong password"
            );
            return Err(SessionError::InvalidCredentials);
        }

        Ok(self.open_session(&identity))
    }

    fn open_session(&self, identity: &Identity) -> Session {
        let issued_at = self.now_secs();
        let session = Session {
            id: SessionId::new(),
            identity_id: identity.id,
            issued_at,
            expires_at: issued_at.saturating_add(self.ttl_secs),
        };
        tracing::info!(
            subsystem = "bf-03",
            identity_id = %identity.id,
            session_id = %session.id,
            "Session opened"
        );
        session
    }

    pub fn issue_token(&self, session: &Session) -> Result<String, SessionError> {
        self.codec.sign(session)
    }

    /// Signature, expiry and revocation check. Never touches the store.
    pub fn resolve_token(&self, token: &str) -> Result<Session, SessionError> {
        let session = self.codec.verify(token)?;
        if session.is_expired_at(self.now_secs()) {
            return Err(SessionError::Expired);
        }
        if self.revocations.is_revoked(&session.id) {
            return Err(SessionError::InvalidToken);
        }
        Ok(session)
    }

    /// Invalidate a live token until it would have expired anyway.
    pub fn revoke(&self, token: &str) -> Result<Session, SessionError> {
        let session = self.resolve_token(token)?;
        self.revocations.revoke(&session, self.now_secs());
        tracing::info!(subsystem = "bf-03", session_id = %session.id, "Session revoked");
        Ok(session)
    }

    /// Argon2id verifier for a new password, computed off the async runtime.
    pub async fn hash_password(&self, password: &str) -> Result<String, SessionError> {
        let hasher = self.hasher.clone();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| SessionError::Hashing(e.to_string()))?
    }
}

/// Collapse lookup failures into the generic credential error, unless the
/// failure is infrastructure that the caller should see as such.
fn reject_lookup(cause: &'static str, error: IdentityError) -> SessionError {
    match error.kind() {
        ErrorKind::Transient | ErrorKind::Fatal => SessionError::Backend(error),
        _ => {
            tracing::warn!(subsystem = "bf-03", cause, error = %error, "Login rejected");
            SessionError::InvalidCredentials
        }
    }
}
