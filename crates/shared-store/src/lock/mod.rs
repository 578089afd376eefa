//! # Data Directory Locking
//!
//! Prevents two service processes from opening the same data directory.
//!
//! ## Modules
//!
//! - `flock`: `DatabaseLock` implementation using fs2

mod flock;

pub use flock::{DatabaseLock, LockError, DEFAULT_LOCK_TIMEOUT};
