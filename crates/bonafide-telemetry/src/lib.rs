//! # Bonafide Telemetry
//!
//! Structured logging for every Bonafide subsystem.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bonafide_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let _guard = init_telemetry(&TelemetryConfig::from_env()).expect("telemetry");
//!     tracing::info!(subsystem = "bf-04", "Ledger ready");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `BF_SERVICE_NAME` | `bonafide` | Service name on every log line |
//! | `BF_LOG_LEVEL` / `RUST_LOG` | `info` | `EnvFilter` directives |
//! | `BF_JSON_LOGS` | `false` (`true` in containers) | One JSON object per line |
//! | `BF_CONSOLE_OUTPUT` | `true` | Write logs to stdout at all |

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::init_tracing;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter '{directive}': {message}")]
    Filter { directive: String, message: String },

    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),
}

/// Initialize logging. Hold the guard for the lifetime of the process.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    init_tracing(config)?;
    Ok(TelemetryGuard {
        service_name: config.service_name.clone(),
    })
}

/// Logs a shutdown line when dropped.
pub struct TelemetryGuard {
    service_name: String,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry");
    }
}
