//! Process-wide default store.
//!
//! Small programs can declare and read configuration from anywhere without
//! passing a [`ConfigStore`] around. The store is created on first use and
//! lives for the rest of the process; it is never reset.
//!
//! Larger programs should construct their own `ConfigStore` instead, which
//! also keeps tests independent of each other.

use std::ffi::OsString;
use std::sync::OnceLock;

use crate::loader::{ConfigError, ConfigStore};

static DEFAULT_STORE: OnceLock<ConfigStore> = OnceLock::new();

/// The process-wide store behind the free functions of this module.
pub fn default_store() -> &'static ConfigStore {
    DEFAULT_STORE.get_or_init(ConfigStore::new)
}

/// See [`ConfigStore::declare`].
pub fn declare(key: &str, default: &str, required: bool, description: &str) {
    default_store().declare(key, default, required, description);
}

/// See [`ConfigStore::try_declare`].
pub fn try_declare(
    key: &str,
    default: &str,
    required: bool,
    description: &str,
) -> Result<(), ConfigError> {
    default_store().try_declare(key, default, required, description)
}

/// See [`ConfigStore::set`].
pub fn set(key: &str, value: &str) {
    default_store().set(key, value);
}

/// See [`ConfigStore::unset`].
pub fn unset(key: &str) {
    default_store().unset(key);
}

/// See [`ConfigStore::set_args`].
pub fn set_args<I, T>(args: I)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    default_store().set_args(args);
}

/// See [`ConfigStore::load`].
pub fn load() -> Result<(), ConfigError> {
    default_store().load()
}

/// See [`ConfigStore::must_load`].
pub fn must_load() {
    default_store().must_load();
}

/// See [`ConfigStore::get`].
pub fn get(key: &str) -> Result<String, ConfigError> {
    default_store().get(key)
}

/// See [`ConfigStore::get_int`].
pub fn get_int(key: &str) -> Result<i64, ConfigError> {
    default_store().get_int(key)
}

/// See [`ConfigStore::must_get`].
pub fn must_get(key: &str) -> String {
    default_store().must_get(key)
}

/// See [`ConfigStore::must_get_int`].
pub fn must_get_int(key: &str) -> i64 {
    default_store().must_get_int(key)
}
