//! Flat key/value configuration loaded from environment variables and
//! command-line flags.
//!
//! Keys are declared once at startup with a default, a required flag and a
//! description. The first read (or an explicit [`ConfigStore::load`]) merges the
//! environment and then the command line over the declared defaults, and
//! checks that every required key ended up with a value.
//!
//! Programs can own a [`ConfigStore`] and pass it around, or use the
//! process-wide instance behind the free functions in [`global`].

mod constants;
pub mod global;
mod loader;
mod schema;

pub use loader::{ConfigError, ConfigStore, env_var_or_none};
pub use schema::{KeySchema, validate_key};
