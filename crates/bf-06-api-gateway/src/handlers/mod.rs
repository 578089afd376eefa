//! Route handlers, one module per resource.

pub mod health;
pub mod identities;
pub mod lookups;
pub mod requests;
pub mod sessions;

use crate::domain::error::ApiError;
use std::str::FromStr;

/// Parse a path segment into an id, or report the resource as absent.
fn parse_id<T: FromStr>(raw: &str, resource: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::not_found(format!("{} {} not found", resource, raw)))
}
