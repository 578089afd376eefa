//! Gateway domain: configuration, response envelopes, error mapping.

pub mod config;
pub mod error;
pub mod response;
