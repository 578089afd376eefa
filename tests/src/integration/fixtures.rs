//! # Test Harness
//!
//! Every subsystem wired over one in-memory store, with Argon2 parameters
//! small enough for tests that register many identities.

use bf_02_identity_store::{IdentityCandidate, IdentityStore};
use bf_03_session_authority::{PasswordHasher, SessionAuthority, SessionConfig};
use bf_04_request_ledger::RequestLedger;
use bf_05_lookup_catalog::LookupCatalog;
use bf_06_api_gateway::AppState;
use shared_store::{InMemoryKVStore, KeyValueStore, StoreHandle};
use shared_types::{Gender, Identity, SystemTimeSource, TimeSource};
use std::sync::Arc;

/// Password every fixture identity registers with.
pub const PASSWORD: &str = "Abcdef1!";

/// Admin key accepted by [`Harness::router`].
pub const ADMIN_KEY: &str = "integration-admin-key-0001";

pub struct Harness {
    pub identities: IdentityStore,
    pub sessions: SessionAuthority,
    pub ledger: RequestLedger,
    pub catalog: LookupCatalog,
}

impl Harness {
    pub fn new() -> Self {
        Self::over(Arc::new(InMemoryKVStore::new()))
    }

    pub fn over(kv: Arc<dyn KeyValueStore>) -> Self {
        let store = StoreHandle::new(kv);
        let clock: Arc<dyn TimeSource> = Arc::new(SystemTimeSource);
        let identities = IdentityStore::new(store.clone(), clock.clone());
        let sessions = SessionAuthority::new(
            SessionConfig {
                secret: b"integration-secret-integration-secret".to_vec(),
                ttl_secs: 3600,
            },
            Arc::new(identities.clone()),
            PasswordHasher::with_params(8, 1, 1).expect("valid argon2 params"),
            clock.clone(),
        )
        .expect("valid session config");

        Self {
            identities,
            ledger: RequestLedger::new(store.clone(), clock.clone()),
            catalog: LookupCatalog::new(store, clock),
            sessions,
        }
    }

    pub fn app_state(&self) -> AppState {
        AppState {
            identities: self.identities.clone(),
            sessions: self.sessions.clone(),
            ledger: self.ledger.clone(),
            catalog: self.catalog.clone(),
        }
    }

    /// Full HTTP router with [`ADMIN_KEY`] as the admin key.
    pub fn router(&self) -> axum::Router {
        let mut config = bf_06_api_gateway::GatewayConfig::default();
        config.admin.api_key = Some(ADMIN_KEY.to_string());
        bf_06_api_gateway::build_router(self.app_state(), &config)
    }

    /// Register a student in `Physics` with [`PASSWORD`].
    pub async fn register(&self, identifier: &str, phone: &str, email: &str) -> Identity {
        self.identities
            .register(self.candidate(identifier, phone, email).await)
            .await
            .expect("fixture registration")
    }

    pub async fn candidate(&self, identifier: &str, phone: &str, email: &str) -> IdentityCandidate {
        IdentityCandidate {
            first_name: "Asha".into(),
            last_name: "Patil".into(),
            identifier: identifier.into(),
            phone: phone.into(),
            email: email.into(),
            department: "Physics".into(),
            gender: Gender::Female,
            password_verifier: self
                .sessions
                .hash_password(PASSWORD)
                .await
                .expect("hash fixture password"),
        }
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

/// Distinct, valid identifier / phone / email for fixture `n`.
pub fn student_keys(n: usize) -> (String, String, String) {
    (
        format!("{:013}", 1_000_000_000_000u64 + n as u64),
        format!("9{:09}", n),
        format!("student{}@college.edu", n),
    )
}
