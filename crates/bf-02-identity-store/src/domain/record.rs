//! Persisted identity record.

use serde::{Deserialize, Serialize};
use shared_types::Identity;

/// What is actually stored under `identity:{uuid}`: the public identity plus
/// its password verifier. Only [`Identity`] ever leaves this crate's public
/// read paths, except for the credential lookup used by login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoredIdentity {
    #[serde(flatten)]
    pub identity: Identity,
    pub password_verifier: String,
}
