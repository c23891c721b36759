//! Configuration store and its load/check lifecycle.
//!
//! Responsibilities:
//! - Hold declared key schemas and resolved values behind a single lock.
//! - Merge environment variables, then command-line flags, over declared defaults.
//! - Validate that every required key has a value before serving reads.
//!
//! Does NOT handle:
//! - Configuration files of any format, remote sources, or hot-reload.
//! - The process-wide default instance (see `global.rs`).
//!
//! Invariants / Assumptions:
//! - Upper-cased environment variables take precedence over exact-case ones.
//! - Command-line flags take precedence over environment variables.
//! - Any mutation of schemas or values clears the `validated` flag.

mod env;
mod error;
mod flags;
mod store;

#[cfg(test)]
mod tests;

pub use env::env_var_or_none;
pub use error::ConfigError;
pub use store::ConfigStore;
