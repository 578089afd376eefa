//! # Bonafide Test Suite
//!
//! Cross-subsystem tests that no single crate can host.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs     # service harness with cheap password hashing
//!     ├── flows.rs        # registration → login → request → resolution
//!     ├── concurrency.rs  # uniqueness and pending invariants under races
//!     └── http.rs         # the same flows through the HTTP router
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p bf-tests
//! cargo test -p bf-tests integration::concurrency::
//! ```

pub mod integration;
