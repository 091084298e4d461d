//! Shared helpers for user-service integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! helpers live here and are pulled in with `mod support;`.

pub mod cluster_skip;
pub mod embedded_postgres;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{provision_migrated_database, shared_cluster};
