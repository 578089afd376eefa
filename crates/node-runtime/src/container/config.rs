//! # Node Configuration
//!
//! Defaults overridden by `BF_*` environment variables.
//!
//! ## Security Requirements
//!
//! - `session_secret` MUST be set, at least 32 bytes and not all zero
//! - All timeouts and limits have sane defaults with override capability

use bf_03_session_authority::{DEFAULT_SESSION_TTL_SECS, MIN_SECRET_LENGTH};
use bf_06_api_gateway::GatewayConfig;
use shared_store::DEFAULT_STORE_TIMEOUT;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Complete node configuration.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Security configuration.
    pub security: SecurityConfig,
    /// API Gateway configuration.
    pub api_gateway: ApiGatewayConfig,
}

impl NodeConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by `var`. Unset variables keep their default; a
    /// set but unparseable variable is an error.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(host) = var("BF_HTTP_HOST") {
            config.api_gateway.host = parse("BF_HTTP_HOST", &host)?;
        }
        if let Some(port) = var("BF_HTTP_PORT") {
            config.api_gateway.port = parse("BF_HTTP_PORT", &port)?;
        }
        if let Some(dir) = var("BF_DATA_DIR") {
            config.storage.data_dir = PathBuf::from(dir);
        }
        if let Some(backend) = var("BF_STORAGE_BACKEND") {
            config.storage.backend = parse("BF_STORAGE_BACKEND", &backend)?;
        }
        if let Some(millis) = var("BF_STORE_TIMEOUT_MS") {
            config.storage.store_timeout = Duration::from_millis(parse("BF_STORE_TIMEOUT_MS", &millis)?);
        }
        if let Some(secret_hex) = var("BF_SESSION_SECRET") {
            config.security.session_secret =
                hex::decode(secret_hex.trim()).map_err(|e| ConfigError::Invalid {
                    name: "BF_SESSION_SECRET",
                    reason: format!("not valid hex: {}", e),
                })?;
        }
        if let Some(ttl) = var("BF_SESSION_TTL_SECS") {
            config.security.session_ttl_secs = parse("BF_SESSION_TTL_SECS", &ttl)?;
        }
        if let Some(key) = var("BF_ADMIN_API_KEY").filter(|k| !k.is_empty()) {
            config.api_gateway.admin_api_key = Some(key);
        }
        if let Some(origin) = var("BF_CORS_ORIGIN") {
            config.api_gateway.cors_origins = origin
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }

        Ok(config)
    }

    /// Validate configuration for production readiness.
    ///
    /// # Returns
    ///
    /// Returns `Err` if:
    /// - the session secret is missing, shorter than 32 bytes or all zero
    /// - the session TTL is zero
    pub fn validate_for_production(&self) -> Result<(), ConfigError> {
        let secret = &self.security.session_secret;
        if secret.len() < MIN_SECRET_LENGTH || secret.iter().all(|b| *b == 0) {
            return Err(ConfigError::InsecureSessionSecret {
                len: secret.len(),
                min: MIN_SECRET_LENGTH,
            });
        }
        if self.security.session_ttl_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "BF_SESSION_TTL_SECS",
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Gateway configuration derived from this node configuration.
    pub fn gateway_config(&self) -> GatewayConfig {
        let mut gateway = GatewayConfig::default();
        gateway.http.host = self.api_gateway.host;
        gateway.http.port = self.api_gateway.port;
        gateway.admin.api_key = self.api_gateway.admin_api_key.clone();
        gateway.limits.max_body_bytes = self.api_gateway.max_body_bytes;
        if !self.api_gateway.cors_origins.is_empty() {
            gateway.cors.allowed_origins = self.api_gateway.cors_origins.clone();
        }
        gateway
    }
}

fn parse<T: FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        reason: e.to_string(),
    })
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Session secret is missing, short or zero.
    #[error(
        "SECURITY VIOLATION: session secret must be at least {min} non-zero bytes (got {len}). \
         Set BF_SESSION_SECRET to a hex-encoded random value."
    )]
    InsecureSessionSecret { len: usize, min: usize },

    /// An environment variable could not be parsed.
    #[error("invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Which key-value backend to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// Volatile, for development and tests.
    Memory,
    /// Single JSON file under the data directory.
    #[default]
    File,
    /// RocksDB under the data directory (requires the `rocksdb` feature).
    RocksDb,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "file" => Ok(StorageBackend::File),
            "rocksdb" => Ok(StorageBackend::RocksDb),
            other => Err(format!("unknown storage backend '{}' (memory|file|rocksdb)", other)),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Data directory; locked for the lifetime of the process.
    pub data_dir: PathBuf,
    /// Deadline for a single store call.
    pub store_timeout: Duration,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: PathBuf::from("./data"),
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }
}

/// Security configuration.
#[derive(Clone)]
pub struct SecurityConfig {
    /// HMAC secret for session tokens.
    /// MUST be set in production.
    pub session_secret: Vec<u8>,
    pub session_ttl_secs: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            session_secret: Vec::new(), // MUST be overridden in production
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
        }
    }
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("session_secret", &format_args!("<{} bytes>", self.session_secret.len()))
            .field("session_ttl_secs", &self.session_ttl_secs)
            .finish()
    }
}

/// API Gateway configuration.
#[derive(Clone)]
pub struct ApiGatewayConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Key for administrative routes; `None` disables them.
    pub admin_api_key: Option<String>,
    /// Allowed CORS origins; empty keeps the gateway default.
    pub cors_origins: Vec<String>,
    pub max_body_bytes: usize,
}

impl Default for ApiGatewayConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 8080,
            admin_api_key: None,
            cors_origins: Vec::new(),
            max_body_bytes: 64 * 1024,
        }
    }
}

impl std::fmt::Debug for ApiGatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiGatewayConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("admin_api_key", &self.admin_api_key.as_ref().map(|_| "<redacted>"))
            .field("cors_origins", &self.cors_origins)
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = NodeConfig::default();
        assert_eq!(config.api_gateway.port, 8080);
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.storage.store_timeout, Duration::from_secs(5));
        assert_eq!(config.security.session_ttl_secs, 3600);
    }

    #[test]
    fn test_validate_rejects_missing_secret() {
        let config = NodeConfig::default();
        assert!(matches!(
            config.validate_for_production(),
            Err(ConfigError::InsecureSessionSecret { len: 0, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_and_short_secret() {
        let mut config = NodeConfig::default();
        config.security.session_secret = vec![0u8; 32];
        assert!(config.validate_for_production().is_err());

        config.security.session_secret = vec![1u8; 16];
        assert!(config.validate_for_production().is_err());
    }

    #[test]
    fn test_validate_accepts_nonzero_secret() {
        let mut config = NodeConfig::default();
        config.security.session_secret = vec![1u8; 32];
        assert!(config.validate_for_production().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let secret = "ab".repeat(32);
        let config = NodeConfig::from_vars(vars(&[
            ("BF_HTTP_PORT", "9090"),
            ("BF_STORAGE_BACKEND", "memory"),
            ("BF_STORE_TIMEOUT_MS", "250"),
            ("BF_SESSION_SECRET", &secret),
            ("BF_SESSION_TTL_SECS", "60"),
            ("BF_ADMIN_API_KEY", "admin-key-0123456789"),
            ("BF_CORS_ORIGIN", "http://localhost:3000, https://portal.example.edu"),
        ]))
        .unwrap();

        assert_eq!(config.api_gateway.port, 9090);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.store_timeout, Duration::from_millis(250));
        assert_eq!(config.security.session_secret, vec![0xab; 32]);
        assert_eq!(config.security.session_ttl_secs, 60);
        assert!(config.validate_for_production().is_ok());

        let gateway = config.gateway_config();
        assert_eq!(gateway.http.port, 9090);
        assert_eq!(gateway.admin.api_key.as_deref(), Some("admin-key-0123456789"));
        assert_eq!(
            gateway.cors.allowed_origins,
            vec!["http://localhost:3000", "https://portal.example.edu"]
        );
        assert!(gateway.validate().is_ok());
    }

    #[test]
    fn test_bad_values_are_errors() {
        assert!(NodeConfig::from_vars(vars(&[("BF_HTTP_PORT", "eighty")])).is_err());
        assert!(NodeConfig::from_vars(vars(&[("BF_STORAGE_BACKEND", "postgres")])).is_err());
        assert!(NodeConfig::from_vars(vars(&[("BF_SESSION_SECRET", "zz")])).is_err());
    }

    #[test]
    fn test_secrets_not_in_debug_output() {
        let mut config = NodeConfig::default();
        config.security.session_secret = vec![0xab; 32];
        config.api_gateway.admin_api_key = Some("admin-key-0123456789".into());
        let debug = format!("{:?}", config);
        assert!(!debug.contains("171")); // 0xab
        assert!(!debug.contains("admin-key"));
    }
}
