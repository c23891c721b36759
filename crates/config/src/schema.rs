//! Declared key schemas and key-format validation.
//!
//! Responsibilities:
//! - Define `KeySchema`, the per-key declaration (default, required, description).
//! - Validate key names before they are registered.
//!
//! Invariants:
//! - A valid key is non-empty and consists only of ASCII letters and underscores.

use regex::Regex;
use std::sync::LazyLock;

use crate::constants::KEY_PATTERN;
use crate::loader::ConfigError;

static KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(KEY_PATTERN).expect("key pattern is a valid regex"));

/// Declaration of a single configuration key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySchema {
    /// Key name, also used as the environment variable and flag name.
    pub key: String,
    /// Value used when neither the environment nor the command line provide one.
    /// Empty means "no default".
    pub default: String,
    /// Whether validation fails when the key has no value.
    pub required: bool,
    /// Human-readable description, shown in flag help and validation errors.
    pub description: String,
}

impl KeySchema {
    pub fn new(key: &str, default: &str, required: bool, description: &str) -> Self {
        Self {
            key: key.to_string(),
            default: default.to_string(),
            required,
            description: description.to_string(),
        }
    }

    /// The declared default, or `None` when the default is empty.
    pub fn default_value(&self) -> Option<&str> {
        if self.default.is_empty() {
            None
        } else {
            Some(&self.default)
        }
    }

    /// Name of the upper-cased environment variable for this key.
    pub fn upper_env_name(&self) -> String {
        self.key.to_ascii_uppercase()
    }
}

/// Check that `key` is usable as a configuration key.
///
/// # Errors
///
/// Returns `ConfigError::InvalidKey` if the key is empty or contains anything
/// other than ASCII letters and underscores.
pub fn validate_key(key: &str) -> Result<(), ConfigError> {
    if key.is_empty() {
        return Err(ConfigError::InvalidKey {
            key: key.to_string(),
            reason: "key must not be empty".to_string(),
        });
    }
    if !KEY_RE.is_match(key) {
        return Err(ConfigError::InvalidKey {
            key: key.to_string(),
            reason: "only letters and underscores are allowed".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key_accepts_letters_and_underscores() {
        for key in ["port", "HOST", "db_url", "_private", "_", "MixedCase_Key"] {
            assert!(validate_key(key).is_ok(), "{key} should be valid");
        }
    }

    #[test]
    fn test_validate_key_rejects_empty() {
        let err = validate_key("").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidKey { .. }));
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_validate_key_rejects_other_characters() {
        for key in ["port1", "db-url", "a.b", "with space", "ключ", "x\n"] {
            assert!(
                matches!(validate_key(key), Err(ConfigError::InvalidKey { .. })),
                "{key:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_default_value_treats_empty_as_none() {
        assert_eq!(KeySchema::new("a", "", true, "").default_value(), None);
        assert_eq!(KeySchema::new("a", "x", true, "").default_value(), Some("x"));
    }

    #[test]
    fn test_upper_env_name() {
        let schema = KeySchema::new("db_Url", "", false, "");
        assert_eq!(schema.upper_env_name(), "DB_URL");
    }
}
