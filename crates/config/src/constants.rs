//! Centralized constants for the keyconf workspace.

// =============================================================================
// Key Format
// =============================================================================

/// Pattern every declared key must match (it must also be non-empty).
pub const KEY_PATTERN: &str = "^[A-Za-z_]*$";

// =============================================================================
// Command Line
// =============================================================================

/// Command name shown in flag help until clap picks up the real program name.
pub const FALLBACK_PROGRAM_NAME: &str = "keyconf";

/// Name of clap's built-in help flag. Disabled when a key of the same name is declared.
pub const HELP_FLAG: &str = "help";

/// Id of the hidden positional argument that absorbs non-flag arguments.
/// Contains a hyphen so it can never collide with a declared key.
pub const POSITIONAL_ARG_ID: &str = "keyconf-positional";
