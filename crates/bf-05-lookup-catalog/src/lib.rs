//! # Lookup Catalog Subsystem
//!
//! **Subsystem ID:** 5
//!
//! Reference data (department names) offered at registration. Names are
//! trimmed, 2-64 characters, unique and matched exactly: `Physics` and
//! `physics` are two different entries.
//!
//! ```text
//! lookup:<uuid>        -> LookupEntry (JSON)
//! lookup_name:<name>   -> <uuid>
//! ```

mod catalog;
mod errors;

pub use catalog::{KeyPrefix, LookupCatalog};
pub use errors::CatalogError;
