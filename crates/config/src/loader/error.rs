//! Error types for configuration loading and reads.
//!
//! Invariants:
//! - Every variant names the key it concerns, except the command-line ones
//!   which carry clap's rendered message instead.
//! - Error messages never include values read from the environment or the
//!   command line, except the unparsable value in `ParseError`.

use std::num::ParseIntError;
use thiserror::Error;

/// Errors that can occur while declaring, loading, or reading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The key passed to `declare` is empty or malformed.
    #[error("config: invalid key {key:?}: {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("config: {0} is not declared")]
    NotDeclared(String),

    #[error("config: {key} is required, {description}")]
    MissingRequired { key: String, description: String },

    #[error("config: {0} has no value")]
    NoValue(String),

    /// `get_int` found a value that is not a base-10 integer.
    #[error("config: {key} is not an integer ({value:?}): {source}")]
    ParseError {
        key: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// Command-line parsing failed (unknown flag, missing value, non-UTF-8 value).
    #[error("config: failed to parse command-line flags: {message}")]
    Flags { message: String },

    /// `--help` was passed; carries the rendered flag help.
    #[error("{0}")]
    HelpRequested(String),
}

impl ConfigError {
    /// The key this error concerns, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            ConfigError::InvalidKey { key, .. }
            | ConfigError::MissingRequired { key, .. }
            | ConfigError::ParseError { key, .. } => Some(key),
            ConfigError::NotDeclared(key) | ConfigError::NoValue(key) => Some(key),
            ConfigError::Flags { .. } | ConfigError::HelpRequested(_) => None,
        }
    }
}
