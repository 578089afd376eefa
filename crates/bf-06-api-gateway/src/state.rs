//! Shared handler state.

use bf_02_identity_store::IdentityStore;
use bf_03_session_authority::SessionAuthority;
use bf_04_request_ledger::RequestLedger;
use bf_05_lookup_catalog::LookupCatalog;

/// Services every handler can reach. Each is a cheap clone over shared
/// store and time-source handles.
#[derive(Clone)]
pub struct AppState {
    pub identities: IdentityStore,
    pub sessions: SessionAuthority,
    pub ledger: RequestLedger,
    pub catalog: LookupCatalog,
}
