//! Tower middleware for the gateway router.

pub mod auth;
pub mod cors;
pub mod tracing;

pub use self::auth::{constant_time_compare, AdminAuthLayer, AdminAuthService, ADMIN_KEY_HEADER};
pub use self::cors::create_cors_layer;
pub use self::tracing::{TracingLayer, TracingService};
