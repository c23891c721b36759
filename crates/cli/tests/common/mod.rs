//! Shared test utilities for keyconf-cli integration tests.
//!
//! Invariants / Assumptions:
//! - Every environment variable the binary reads is cleared, so host
//!   settings never leak into a test.

use assert_cmd::Command;

/// Environment variables read by `keyconf-cli` (exact and upper-cased forms).
const CONFIG_VARS: &[&str] = &[
    "host",
    "HOST",
    "port",
    "PORT",
    "name",
    "NAME",
    "verbose_level",
    "VERBOSE_LEVEL",
];

/// Returns a hermetic `keyconf-cli` command for integration testing.
pub fn keyconf_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("keyconf-cli");
    for var in CONFIG_VARS {
        cmd.env_remove(var);
    }
    cmd.env_remove("RUST_LOG");
    cmd
}
