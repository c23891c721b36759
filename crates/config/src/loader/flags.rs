//! Command-line flag merging.
//!
//! Responsibilities:
//! - Build a clap `Command` with one long flag per declared key.
//! - Parse an argument vector and overwrite values for flags supplied on the command line.
//!
//! Does NOT handle:
//! - Environment variables (see env.rs).
//!
//! Invariants:
//! - Only flags explicitly present in the argument vector override values;
//!   clap defaults never do.
//! - The first item of the argument vector is the program name.
//! - Repeating a flag keeps the last occurrence.
//! - Positional arguments are accepted and ignored.
//! - `-key` and `-key=value` are accepted for declared keys, as with Go's
//!   `flag` package; arguments after `--` and flag values are never rewritten.

use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, Command};
use std::collections::{BTreeMap, HashMap};
use std::ffi::OsString;

use super::error::ConfigError;
use crate::constants::{FALLBACK_PROGRAM_NAME, HELP_FLAG, POSITIONAL_ARG_ID};
use crate::schema::KeySchema;

/// Build the clap command describing every declared key.
pub(crate) fn build_command(schemas: &BTreeMap<String, KeySchema>) -> Command {
    let mut command = Command::new(FALLBACK_PROGRAM_NAME)
        .args_override_self(true)
        .disable_help_flag(schemas.contains_key(HELP_FLAG))
        .arg(
            Arg::new(POSITIONAL_ARG_ID)
                .action(ArgAction::Append)
                .num_args(1..)
                .hide(true),
        );

    for schema in schemas.values() {
        let mut arg = Arg::new(schema.key.clone())
            .long(schema.key.clone())
            .action(ArgAction::Set)
            .value_name("VALUE")
            .allow_hyphen_values(true)
            .help(schema.description.clone());
        if let Some(default) = schema.default_value() {
            arg = arg.default_value(default.to_string());
        }
        command = command.arg(arg);
    }

    command
}

/// Rewrite single-dash forms of declared keys (`-key`, `-key=value`) to their
/// `--key` equivalents so clap does not read them as bundled short flags.
pub(crate) fn normalize_single_dash(
    args: Vec<OsString>,
    schemas: &BTreeMap<String, KeySchema>,
) -> Vec<OsString> {
    let mut normalized = Vec::with_capacity(args.len());
    let mut iter = args.into_iter();
    normalized.extend(iter.next());

    let mut expects_value = false;
    let mut passthrough = false;
    for arg in iter {
        if passthrough || expects_value {
            expects_value = false;
            normalized.push(arg);
            continue;
        }

        let Some(text) = arg.to_str() else {
            normalized.push(arg);
            continue;
        };

        if text == "--" {
            passthrough = true;
        } else if let Some(rest) = text.strip_prefix("--") {
            let (name, inline_value) = split_flag(rest);
            expects_value = schemas.contains_key(name) && inline_value.is_none();
        } else if let Some(rest) = text.strip_prefix('-') {
            let (name, inline_value) = split_flag(rest);
            if schemas.contains_key(name) {
                expects_value = inline_value.is_none();
                normalized.push(OsString::from(format!("--{rest}")));
                continue;
            }
        }
        normalized.push(arg);
    }
    normalized
}

fn split_flag(flag: &str) -> (&str, Option<&str>) {
    match flag.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (flag, None),
    }
}

/// Parse `args` and apply every explicitly supplied flag to `values`.
///
/// Returns the number of keys overridden from the command line.
///
/// # Errors
///
/// Returns `ConfigError::HelpRequested` for `--help`, and `ConfigError::Flags`
/// for unknown flags, flags missing a value, or non-UTF-8 values.
pub(crate) fn apply_flags(
    args: Vec<OsString>,
    schemas: &BTreeMap<String, KeySchema>,
    values: &mut HashMap<String, String>,
) -> Result<usize, ConfigError> {
    let matches = build_command(schemas)
        .try_get_matches_from(normalize_single_dash(args, schemas))
        .map_err(|e| {
            let message = e.to_string().trim_end().to_string();
            match e.kind() {
                ErrorKind::DisplayHelp => ConfigError::HelpRequested(message),
                _ => ConfigError::Flags { message },
            }
        })?;

    let mut applied = 0;
    for key in schemas.keys() {
        if matches.value_source(key) != Some(ValueSource::CommandLine) {
            continue;
        }
        if let Some(value) = matches.get_one::<String>(key) {
            tracing::debug!(key = %key, source = "flag", "Config value overridden");
            values.insert(key.clone(), value.clone());
            applied += 1;
        }
    }
    Ok(applied)
}
