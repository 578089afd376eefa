//! Identity store domain types.

pub mod candidate;
pub mod errors;
pub mod keys;
pub(crate) mod record;
