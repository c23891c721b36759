//! keyconf CLI - prints the resolved configuration of a small service.
//!
//! Responsibilities:
//! - Declare the service's configuration keys on the default store.
//! - Load them from the environment and command line, then print `key=value` lines.
//!
//! Does NOT handle:
//! - Loading logic itself (see `crates/config`).
//!
//! Invariants:
//! - Only the `Result`-returning store API is used, so bad input never panics.
//! - Resolved values go to stdout; logs and errors go to stderr.

mod error;

use anyhow::Context;
use error::{ExitCode, ExitCodeExt};
use keyconf::{ConfigError, global};
use std::io::Write;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Keys declared by this binary: (key, default, required, description).
const KEYS: &[(&str, &str, bool, &str)] = &[
    ("host", "localhost", false, "Host name to bind"),
    ("port", "8080", false, "Port to listen on"),
    ("name", "", true, "Service name"),
    ("verbose_level", "0", false, "Verbosity level"),
];

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let exit_code = match run() {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            if let Some(ConfigError::HelpRequested(help)) = e.downcast_ref::<ConfigError>() {
                println!("{help}");
            } else {
                eprintln!("{:#}", e);
            }
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}

fn run() -> anyhow::Result<()> {
    for (key, default, required, description) in KEYS {
        global::try_declare(key, default, *required, description)
            .with_context(|| format!("Failed to declare {key}"))?;
    }

    global::load()?;

    let port = global::get_int("port").context("Failed to read port")?;
    let verbose_level = global::get_int("verbose_level").context("Failed to read verbose_level")?;
    tracing::debug!(port, verbose_level, "Configuration resolved");

    let mut stdout = std::io::stdout().lock();
    for key in global::default_store().keys() {
        let value = global::get(&key).with_context(|| format!("Failed to read {key}"))?;
        writeln!(stdout, "{key}={value}")?;
    }
    Ok(())
}
