//! # Node Runtime Library
//!
//! Configuration and service wiring for the bonafide service, exposed for
//! the binary and for integration tests.

pub mod container;

pub use container::{ConfigError, NodeConfig, ServiceContainer, StartupError, StorageBackend};
