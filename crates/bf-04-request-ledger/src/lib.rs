//! # Request Ledger Subsystem
//!
//! **Subsystem ID:** 4
//!
//! ## Purpose
//!
//! Records bonafide requests and drives their lifecycle.
//!
//! ```text
//! [pending] ──approve(document_ref)──→ [approved]
//!     │
//!     └──────────reject─────────────→ [rejected]
//! ```
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | At most one pending request per identity | `Absent(request_pending:<identity>)` on submit |
//! | Terminal states never move | `RequestStatus::can_transition_to` + compare-and-swap on the record |
//! | Approved implies a document reference | checked before the transition is written |
//!
//! The pending projection key is written with the request and removed in the
//! same batch as the terminal transition, so it exists exactly while the
//! identity has a pending request.
//!
//! ## Storage Layout
//!
//! ```text
//! request:<uuid>                                  -> BonafideRequest (JSON)
//! request_by_identity:<identity>:<micros>:<uuid>  -> <uuid>
//! request_pending:<identity>                      -> <uuid>
//! ```

pub mod domain;
pub mod service;

pub use domain::errors::LedgerError;
pub use domain::keys::KeyPrefix;
pub use service::{RequestLedger, MAX_TRANSITION_ATTEMPTS};
