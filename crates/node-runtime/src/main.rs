//! # Bonafide Node Runtime
//!
//! ## Startup Sequence
//!
//! 1. Initialise logging from the environment
//! 2. Load configuration (`BF_*` variables)
//! 3. Validate the session secret
//! 4. Lock the data directory and open the store (connect-or-exit)
//! 5. Serve the API gateway until Ctrl+C

use anyhow::{Context, Result};
use bf_06_api_gateway::ApiGatewayService;
use bonafide_telemetry::{init_telemetry, TelemetryConfig};
use node_runtime::{NodeConfig, ServiceContainer};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let _telemetry = init_telemetry(&TelemetryConfig::from_env())
        .context("Failed to initialise logging")?;

    if let Err(e) = run().await {
        error!(error = %format!("{:#}", e), "Bonafide service failed");
        return Err(e);
    }
    Ok(())
}

async fn run() -> Result<()> {
    info!("===========================================");
    info!("  Bonafide Service v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let config = NodeConfig::from_env().context("Invalid configuration")?;
    config
        .validate_for_production()
        .context("Refusing to start with insecure configuration")?;
    info!(
        backend = ?config.storage.backend,
        data_dir = %config.storage.data_dir.display(),
        "Configuration loaded"
    );

    let container = ServiceContainer::new(config).context("Failed to open storage")?;

    let gateway = ApiGatewayService::new(container.config.gateway_config(), container.app_state())
        .context("Invalid gateway configuration")?;
    info!(addr = %gateway.config().http_addr(), "Starting API Gateway");

    gateway
        .run(shutdown_signal())
        .await
        .context("API Gateway terminated")?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal"),
        Err(e) => error!(error = %e, "Cannot listen for shutdown signal; shutting down"),
    }
}
