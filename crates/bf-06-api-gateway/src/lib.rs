//! BF-06 API Gateway - HTTP/JSON surface of the bonafide service.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                    API GATEWAY (bf-06)                         │
//! ├───────────────────────────────────────────────────────────────┤
//! │  Middleware: CORS → Tracing → Body limit                       │
//! │                                                               │
//! │  /api/v1                                                      │
//! │   ├─ public     health, identities, sessions, lookup reads    │
//! │   ├─ bearer     identities/me, bonafide-requests              │
//! │   └─ admin      X-Api-Key: queue, transitions, lookup writes  │
//! │                                                               │
//! │  Error kinds ──► status codes (domain::error)                  │
//! └──────────────┬───────────────┬───────────────┬────────────────┘
//!                ▼               ▼               ▼
//!        bf-02 identities  bf-03 sessions  bf-04 ledger / bf-05 catalog
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use bf_06_api_gateway::{ApiGatewayService, AppState, GatewayConfig};
//!
//! let service = ApiGatewayService::new(GatewayConfig::default(), state)?;
//! service.run(shutdown_signal()).await?;
//! ```

pub mod domain;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod service;
pub mod state;


pub use domain::config::{AdminConfig, ConfigError, CorsConfig, GatewayConfig, HttpConfig, LimitsConfig};
pub use domain::error::{ApiError, GatewayError};
pub use domain::response::ApiResponse;
pub use extract::CurrentCaller;
pub use router::build_router;
pub use service::ApiGatewayService;
pub use state::AppState;

/// API version prefix for every route.
pub const API_PREFIX: &str = "/api/v1";
