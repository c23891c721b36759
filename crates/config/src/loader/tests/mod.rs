//! Tests for the configuration store.
//!
//! Responsibilities:
//! - Test declaration, reads, and typed reads.
//! - Test environment and command-line precedence through the store.
//! - Test validation and re-validation after mutations.
//!
//! Invariants:
//! - Tests that touch the environment use `serial_test` and `temp_env`.
//! - Every store is given an explicit argument vector so the test harness's
//!   own arguments never reach the flag parser.

use std::sync::Mutex;

use crate::loader::store::ConfigStore;


/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// A store that sees no command-line flags.
pub fn store_without_flags() -> ConfigStore {
    ConfigStore::new().with_args(["keyconf-test"])
}
