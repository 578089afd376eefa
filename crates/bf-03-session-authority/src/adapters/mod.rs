//! Port implementations backed by other subsystems.

mod identity_store;
