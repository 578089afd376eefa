//! # Identity Store Subsystem
//!
//! **Subsystem ID:** 2
//!
//! ## Purpose
//!
//! Persists registered student identities and guarantees that the
//! institutional identifier, the phone number and the email address are each
//! unique across all identities, even under concurrent registrations.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Identifier unique | `Absent(identity_prn:<prn>)` precondition |
//! | Phone unique (canonical 10 digits) | `Absent(identity_phone:<digits>)` precondition |
//! | Email unique (lower-cased) | `Absent(identity_email:<email>)` precondition |
//! | Record and indexes written together | single conditional batch |
//!
//! All three preconditions and all four writes go through one
//! `conditional_batch_write`, so there is no window in which two
//! registrations can both observe a free key.
//!
//! ## Storage Layout
//!
//! ```text
//! identity:<uuid>          -> StoredIdentity (JSON)
//! identity_prn:<prn>       -> <uuid>
//! identity_phone:<digits>  -> <uuid>
//! identity_email:<email>   -> <uuid>
//! ```

pub mod domain;
pub mod service;

pub use domain::candidate::IdentityCandidate;
pub use domain::errors::IdentityError;
pub use domain::keys::KeyPrefix;
pub use service::IdentityStore;
