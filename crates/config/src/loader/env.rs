//! Environment variable merging.
//!
//! Responsibilities:
//! - Read the exact-case and upper-cased environment variable for each declared key.
//! - Overwrite the current values with whatever the environment provides.
//!
//! Does NOT handle:
//! - Command-line flags (see flags.rs).
//! - Validation of the merged values (see store.rs).
//!
//! Invariants:
//! - Unset, empty, and non-UTF-8 variables are treated as absent.
//! - Values are taken verbatim (no trimming).
//! - The upper-cased variable is applied last, so it wins over the exact-case one.

use std::collections::{BTreeMap, HashMap};

use crate::schema::KeySchema;

/// Read an environment variable, returning None if unset, empty, or not valid UTF-8.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}

/// Apply environment variables to `values` for every declared key.
///
/// Returns the number of keys whose value came from the environment.
pub(crate) fn apply_env(
    schemas: &BTreeMap<String, KeySchema>,
    values: &mut HashMap<String, String>,
) -> usize {
    let mut applied = 0;
    for (key, schema) in schemas {
        let mut found = false;

        if let Some(value) = env_var_or_none(key) {
            tracing::debug!(key = %key, source = "env", "Config value overridden");
            values.insert(key.clone(), value);
            found = true;
        }

        let upper = schema.upper_env_name();
        if upper != *key {
            if let Some(value) = env_var_or_none(&upper) {
                tracing::debug!(key = %key, var = %upper, source = "env", "Config value overridden");
                values.insert(key.clone(), value);
                found = true;
            }
        }

        if found {
            applied += 1;
        }
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn declared(keys: &[(&str, &str)]) -> (BTreeMap<String, KeySchema>, HashMap<String, String>) {
        let mut schemas = BTreeMap::new();
        let mut values = HashMap::new();
        for (key, default) in keys {
            schemas.insert(key.to_string(), KeySchema::new(key, default, false, ""));
            values.insert(key.to_string(), default.to_string());
        }
        (schemas, values)
    }

    #[test]
    #[serial]
    fn test_env_var_or_none_filters_unset_and_empty() {
        let key = "_KEYCONF_TEST_ENV_HELPER";
        temp_env::with_vars([(key, None::<&str>)], || {
            assert!(env_var_or_none(key).is_none(), "Unset env var should return None");
        });

        temp_env::with_vars([(key, Some(""))], || {
            assert!(env_var_or_none(key).is_none(), "Empty env var should return None");
        });

        temp_env::with_vars([(key, Some("  spaced  "))], || {
            assert_eq!(
                env_var_or_none(key),
                Some("  spaced  ".to_string()),
                "Values are returned verbatim"
            );
        });
    }

    #[test]
    #[serial]
    fn test_apply_env_upper_case_wins() {
        let (schemas, mut values) = declared(&[("keyconf_zed", "a")]);
        temp_env::with_vars(
            [("keyconf_zed", Some("b")), ("KEYCONF_ZED", Some("c"))],
            || {
                let applied = apply_env(&schemas, &mut values);
                assert_eq!(applied, 1);
                assert_eq!(values.get("keyconf_zed").map(String::as_str), Some("c"));
            },
        );
    }

    #[test]
    #[serial]
    fn test_apply_env_exact_case_only() {
        let (schemas, mut values) = declared(&[("keyconf_exact", "a")]);
        temp_env::with_vars(
            [("keyconf_exact", Some("b")), ("KEYCONF_EXACT", None)],
            || {
                apply_env(&schemas, &mut values);
                assert_eq!(values.get("keyconf_exact").map(String::as_str), Some("b"));
            },
        );
    }

    #[test]
    #[serial]
    fn test_apply_env_empty_upper_does_not_clobber() {
        let (schemas, mut values) = declared(&[("keyconf_mixed", "a")]);
        temp_env::with_vars(
            [("keyconf_mixed", Some("b")), ("KEYCONF_MIXED", Some(""))],
            || {
                apply_env(&schemas, &mut values);
                assert_eq!(values.get("keyconf_mixed").map(String::as_str), Some("b"));
            },
        );
    }

    #[test]
    #[serial]
    fn test_apply_env_leaves_unset_keys_alone() {
        let (schemas, mut values) = declared(&[("keyconf_untouched", "default")]);
        temp_env::with_vars(
            [
                ("keyconf_untouched", None::<&str>),
                ("KEYCONF_UNTOUCHED", None),
            ],
            || {
                assert_eq!(apply_env(&schemas, &mut values), 0);
                assert_eq!(
                    values.get("keyconf_untouched").map(String::as_str),
                    Some("default")
                );
            },
        );
    }
}
