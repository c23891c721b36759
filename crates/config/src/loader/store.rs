//! The configuration store.
//!
//! Responsibilities:
//! - Own declared schemas, resolved values, and the `loaded`/`validated` flags.
//! - Run the load cycle lazily on first read: environment, then flags, then validation.
//! - Provide `Result`-returning reads and their panicking `must_*` counterparts.
//!
//! Does NOT handle:
//! - Reading individual environment variables (see env.rs).
//! - Parsing the argument vector (see flags.rs).
//!
//! Invariants / Assumptions:
//! - One mutex guards all state and is held for the whole of every operation,
//!   including the lazy load inside `get`. Access is startup-time and infrequent.
//! - `declare`, `set`, `unset`, and each merge clear `validated`.
//! - The merge runs at most once per `loaded` cycle; `set_args` starts a new one
//!   from the declared defaults.

use std::collections::{BTreeMap, HashMap};
use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::env::apply_env;
use super::error::ConfigError;
use super::flags::apply_flags;
use crate::schema::{KeySchema, validate_key};

/// Thread-safe store of declared configuration keys and their values.
#[derive(Debug, Default)]
pub struct ConfigStore {
    state: Mutex<StoreState>,
}

#[derive(Debug, Default)]
struct StoreState {
    values: HashMap<String, String>,
    schemas: BTreeMap<String, KeySchema>,
    loaded: bool,
    validated: bool,
    /// Argument vector override; `None` reads the process arguments.
    args: Option<Vec<OsString>>,
}

impl StoreState {
    fn ensure_ready(&mut self) -> Result<(), ConfigError> {
        if !self.loaded {
            self.merge()?;
        }
        if !self.validated {
            self.check()?;
        }
        Ok(())
    }

    fn merge(&mut self) -> Result<(), ConfigError> {
        self.validated = false;

        let from_env = apply_env(&self.schemas, &mut self.values);
        let args = self
            .args
            .clone()
            .unwrap_or_else(|| std::env::args_os().collect());
        let from_flags = apply_flags(args, &self.schemas, &mut self.values)?;

        self.loaded = true;
        tracing::debug!(
            declared = self.schemas.len(),
            from_env,
            from_flags,
            "Configuration loaded"
        );
        Ok(())
    }

    fn reset_to_defaults(&mut self) {
        for (key, schema) in &self.schemas {
            match schema.default_value() {
                Some(value) => self.values.insert(key.clone(), value.to_string()),
                None => self.values.remove(key),
            };
        }
    }

    fn check(&mut self) -> Result<(), ConfigError> {
        let missing = self
            .schemas
            .values()
            .find(|schema| schema.required && !self.values.contains_key(&schema.key));

        if let Some(schema) = missing {
            tracing::warn!(key = %schema.key, "Required configuration key has no value");
            return Err(ConfigError::MissingRequired {
                key: schema.key.clone(),
                description: schema.description.clone(),
            });
        }

        self.validated = true;
        Ok(())
    }
}

impl ConfigStore {
    /// Create an empty store that reads the process arguments when loading.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `args` instead of the process arguments when loading.
    ///
    /// The first item is the program name, as with `std::env::args`.
    pub fn with_args<I, T>(self, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        self.set_args(args);
        self
    }

    /// Replace the argument vector used by the next load.
    ///
    /// Starts a new load cycle: every declared key goes back to its declared
    /// default (or to no value), and the next read merges the environment and
    /// the new arguments again. Values of undeclared keys are kept.
    pub fn set_args<I, T>(&self, args: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut state = self.lock();
        state.args = Some(args.into_iter().map(Into::into).collect());
        state.reset_to_defaults();
        state.loaded = false;
        state.validated = false;
    }

    /// Declare `key`, or replace its declaration.
    ///
    /// The current value is reset to `default`; an empty `default` leaves the
    /// key without a value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidKey` if `key` is empty or contains anything
    /// other than ASCII letters and underscores. The store is left untouched.
    pub fn try_declare(
        &self,
        key: &str,
        default: &str,
        required: bool,
        description: &str,
    ) -> Result<(), ConfigError> {
        validate_key(key)?;

        let schema = KeySchema::new(key, default, required, description);
        let mut state = self.lock();
        state.validated = false;
        match schema.default_value() {
            Some(value) => state.values.insert(key.to_string(), value.to_string()),
            None => state.values.remove(key),
        };
        state.schemas.insert(key.to_string(), schema);
        Ok(())
    }

    /// Declare `key`, or replace its declaration.
    ///
    /// # Panics
    ///
    /// Panics if `key` is invalid. Keys are fixed at compile time in practice,
    /// so a bad one is a programming error.
    pub fn declare(&self, key: &str, default: &str, required: bool, description: &str) {
        or_abort(self.try_declare(key, default, required, description))
    }

    /// Store `value` under `key` without any schema check.
    pub fn set(&self, key: &str, value: &str) {
        let mut state = self.lock();
        state.values.insert(key.to_string(), value.to_string());
        state.validated = false;
    }

    /// Remove the current value of `key`, if any.
    pub fn unset(&self, key: &str) {
        let mut state = self.lock();
        state.values.remove(key);
        state.validated = false;
    }

    /// Merge the environment and command line (once), then validate.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Flags` (or `ConfigError::HelpRequested`) if the
    /// arguments cannot be parsed and `ConfigError::MissingRequired` if a
    /// required key has no value. Values merged before the failure stay in place.
    pub fn load(&self) -> Result<(), ConfigError> {
        self.lock().ensure_ready()
    }

    /// Like [`ConfigStore::load`], but panics on error.
    pub fn must_load(&self) {
        or_abort(self.load())
    }

    /// Read the value of a declared key, loading and validating first if needed.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotDeclared` for unknown keys whatever the load
    /// state, then propagates load and validation errors, then returns
    /// `ConfigError::NoValue` for declared keys without a value.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let mut state = self.lock();
        if !state.schemas.contains_key(key) {
            return Err(ConfigError::NotDeclared(key.to_string()));
        }
        state.ensure_ready()?;

        state
            .values
            .get(key)
            .cloned()
            .ok_or_else(|| ConfigError::NoValue(key.to_string()))
    }

    /// Read a declared key as a base-10 integer.
    ///
    /// # Errors
    ///
    /// Everything [`ConfigStore::get`] returns, plus `ConfigError::ParseError`.
    pub fn get_int(&self, key: &str) -> Result<i64, ConfigError> {
        let value = self.get(key)?;
        value.parse().map_err(|source| ConfigError::ParseError {
            key: key.to_string(),
            value,
            source,
        })
    }

    /// Like [`ConfigStore::get`], but panics on error.
    pub fn must_get(&self, key: &str) -> String {
        or_abort(self.get(key))
    }

    /// Like [`ConfigStore::get_int`], but panics on error.
    pub fn must_get_int(&self, key: &str) -> i64 {
        or_abort(self.get_int(key))
    }

    /// Whether the environment and command line have been merged.
    pub fn is_loaded(&self) -> bool {
        self.lock().loaded
    }

    /// Whether validation has passed since the last mutation.
    pub fn is_validated(&self) -> bool {
        self.lock().validated
    }

    /// The declaration of `key`, if declared.
    pub fn schema(&self, key: &str) -> Option<KeySchema> {
        self.lock().schemas.get(key).cloned()
    }

    /// All declared keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        self.lock().schemas.keys().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        // Every critical section leaves the state consistent, so a panic
        // elsewhere while holding the lock does not corrupt it.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn or_abort<T>(result: Result<T, ConfigError>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(error = %e, "Fatal configuration error");
            panic!("{e}");
        }
    }
}
