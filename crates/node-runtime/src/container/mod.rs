//! # Service Container
//!
//! Holds the store handle, the data-directory lock and every subsystem
//! service, constructed once at startup and passed down explicitly.

pub mod config;
pub mod services;

pub use config::{ConfigError, NodeConfig, StorageBackend};
pub use services::{ServiceContainer, StartupError};
