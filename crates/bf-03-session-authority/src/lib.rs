//! # Session Authority Subsystem
//!
//! **Subsystem ID:** 3
//!
//! ## Purpose
//!
//! Turns passwords into Argon2id verifiers, checks credentials at login, and
//! issues, resolves and revokes session tokens.
//!
//! ## Token Format
//!
//! ```text
//! v1.<hex(json claims)>.<hex(HMAC-SHA256(secret, "v1.<hex(json claims)>"))>
//! ```
//!
//! Tokens are stateless: resolving one is a signature check, an expiry check
//! and a lookup in the in-process revocation list. The store is never
//! consulted, so a storage outage does not log anybody out.
//!
//! ## Failure Reporting
//!
//! Unknown email, wrong password and a mismatched identifier/email pair all
//! return the same [`SessionError::InvalidCredentials`]. The specific cause is
//! only written to the log.
//!
//! ## Module Structure
//!
//! ```text
//! domain/password.rs   - Argon2id PasswordHasher
//! domain/token.rs      - TokenCodec (sign / verify)
//! domain/revocation.rs - RevocationList (DashMap, pruned on insert)
//! ports/outbound.rs    - CredentialLookup
//! adapters/            - CredentialLookup for IdentityStore
//! service.rs           - SessionAuthority
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use domain::errors::SessionError;
pub use domain::password::PasswordHasher;
pub use domain::revocation::RevocationList;
pub use domain::token::{TokenCodec, MIN_SECRET_LENGTH, TOKEN_VERSION};
pub use ports::outbound::CredentialLookup;
pub use service::{SessionAuthority, SessionConfig, DEFAULT_SESSION_TTL_SECS};
