//! # Shared Types Crate
//!
//! This crate contains the domain entities and the error taxonomy shared by
//! every Bonafide subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Typed identifiers**: Identities, requests, lookup entries and sessions
//!   each get their own UUID newtype so they cannot be mixed up.
//! - **One error taxonomy**: Subsystem errors classify themselves into an
//!   [`ErrorKind`]; only the API gateway turns a kind into a transport status.

pub mod entities;
pub mod errors;
pub mod time;

pub use entities::*;
pub use errors::*;
pub use time::{FixedTimeSource, SystemTimeSource, TimeSource, Timestamp};
