//! Signed session tokens.

use super::errors::SessionError;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use shared_types::Session;

type HmacSha256 = Hmac<Sha256>;

/// Version tag prefixed to every token.
pub const TOKEN_VERSION: &str = "v1";

/// Minimum signing secret length in bytes.
pub const MIN_SECRET_LENGTH: usize = 32;

/// Signs and verifies session tokens with HMAC-SHA256.
///
/// Verification checks the signature only; expiry and revocation are the
/// session authority's concern.
#[derive(Clone)]
pub struct TokenCodec {
    secret: Vec<u8>,
}

impl TokenCodec {
    /// Rejects secrets shorter than [`MIN_SECRET_LENGTH`] or all zero.
    pub fn new(secret: Vec<u8>) -> Result<Self, SessionError> {
        if secret.len() < MIN_SECRET_LENGTH || secret.iter().all(|b| *b == 0) {
            return Err(SessionError::WeakSecret {
                len: secret.len(),
                min: MIN_SECRET_LENGTH,
            });
        }
        Ok(Self { secret })
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size")
    }

    pub fn sign(&self, session: &Session) -> Result<String, SessionError> {
        let claims =
            serde_json::to_vec(session).map_err(|e| SessionError::Encoding(e.to_string()))?;
        let body = format!("{}.{}", TOKEN_VERSION, hex::encode(claims));

        let mut mac = self.mac();
        mac.update(body.as_bytes());
        let signature = mac.finalize().into_bytes();

        Ok(format!("{}.{}", body, hex::encode(signature)))
    }

    /// Check structure and signature, then decode the claims.
    pub fn verify(&self, token: &str) -> Result<Session, SessionError> {
        let (body, signature_hex) = token.rsplit_once('.').ok_or(SessionError::InvalidToken)?;
        let (version, claims_hex) = body.split_once('.').ok_or(SessionError::InvalidToken)?;
        if version != TOKEN_VERSION {
            return Err(SessionError::InvalidToken);
        }

        let signature = hex::decode(signature_hex).map_err(|_| SessionError::InvalidToken)?;
        let mut mac = self.mac();
        mac.update(body.as_bytes());
        // Constant-time comparison
        mac.verify_slice(&signature)
            .map_err(|_| SessionError::InvalidToken)?;

        let claims = hex::decode(claims_hex).map_err(|_| SessionError::InvalidToken)?;
        serde_json::from_slice(&claims).map_err(|_| SessionError::InvalidToken)
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec").finish_non_exhaustive()
    }
}
