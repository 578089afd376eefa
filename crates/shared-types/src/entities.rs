//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Identity**: `Identity`, `Gender`, `IdentityId`
//! - **Ledger**: `BonafideRequest`, `RequestStatus`, `RequestId`
//! - **Catalog**: `LookupEntry`, `LookupId`
//! - **Sessions**: `Session`, `SessionId`

use crate::time::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// =============================================================================
// IDENTIFIERS
// =============================================================================

macro_rules! uuid_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

uuid_newtype!(
    /// Identifier of a registered student identity.
    IdentityId
);
uuid_newtype!(
    /// Identifier of a bonafide request.
    RequestId
);
uuid_newtype!(
    /// Identifier of a lookup catalog entry.
    LookupId
);
uuid_newtype!(
    /// Identifier of an issued session.
    SessionId
);

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// Gender category selected at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(format!("unknown gender '{}'", other)),
        }
    }
}

/// A registered student.
///
/// This is the client-visible view: the password verifier never appears here.
///
/// INVARIANT: `identifier`, `phone` and `email` are each unique across all
/// identities (enforced by the identity store, not by this type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: IdentityId,
    pub first_name: String,
    pub last_name: String,
    /// Institutional identifier (PRN), 13 decimal digits.
    pub identifier: String,
    pub phone: String,
    pub email: String,
    /// Department name, one of the lookup catalog entries at registration time.
    pub department: String,
    pub gender: Gender,
    pub created_at: Timestamp,
}

impl Identity {
    /// "Given Family" display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// =============================================================================
// CLUSTER B: BONAFIDE LEDGER
// =============================================================================

/// Lifecycle state of a bonafide request.
///
/// ```text
/// [pending] ──approve(document)──→ [approved]
///     │
///     └──────reject─────────────→ [rejected]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }

    /// Approved and rejected requests never move again.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }

    /// The only legal edges are `pending -> approved` and `pending -> rejected`.
    pub fn can_transition_to(&self, target: RequestStatus) -> bool {
        matches!(
            (self, target),
            (RequestStatus::Pending, RequestStatus::Approved)
                | (RequestStatus::Pending, RequestStatus::Rejected)
        )
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RequestStatus::Pending),
            "approved" => Ok(RequestStatus::Approved),
            "rejected" => Ok(RequestStatus::Rejected),
            other => Err(format!("unknown request status '{}'", other)),
        }
    }
}

/// A student's request for a proof-of-enrollment document.
///
/// The student name, identifier and department are copied from the identity
/// at submission so the administrative queue can be read without joins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BonafideRequest {
    pub id: RequestId,
    pub identity_id: IdentityId,
    pub student_name: String,
    pub identifier: String,
    pub department: String,
    pub reason: String,
    pub status: RequestStatus,
    pub created_at: Timestamp,
    /// Set when the request reaches a terminal status.
    pub resolved_at: Option<Timestamp>,
    /// Present only when `status == Approved`.
    pub document_ref: Option<String>,
}

/// Per-identity request counts shown on the student dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSummary {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl RequestSummary {
    pub fn from_requests<'a>(requests: impl IntoIterator<Item = &'a BonafideRequest>) -> Self {
        requests
            .into_iter()
            .fold(Self::default(), |mut acc, request| {
                acc.total += 1;
                match request.status {
                    RequestStatus::Pending => acc.pending += 1,
                    RequestStatus::Approved => acc.approved += 1,
                    RequestStatus::Rejected => acc.rejected += 1,
                }
                acc
            })
    }
}

// =============================================================================
// CLUSTER C: LOOKUP CATALOG
// =============================================================================

/// A named reference-data item, e.g. a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupEntry {
    pub id: LookupId,
    pub name: String,
    pub created_at: Timestamp,
}

// =============================================================================
// CLUSTER D: SESSIONS
// =============================================================================

/// An authenticated session bound to one identity.
///
/// Times are Unix seconds so they can be embedded in signed tokens verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub identity_id: IdentityId,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl Session {
    pub fn is_expired_at(&self, now_secs: i64) -> bool {
        now_secs >= self.expires_at
    }
}
