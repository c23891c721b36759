//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map ConfigError variants found in an error chain to exit codes.
//!
//! Invariants:
//! - Exit code 2 is reserved for configuration problems the user can fix
//!   (missing required keys, bad values, bad flags).

use keyconf::ConfigError;

/// Structured exit codes for keyconf-cli.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - configuration resolved and printed.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Configuration error - missing required key, unparsable value, or bad flags.
    ConfigError = 2,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::MissingRequired { .. }
            | ConfigError::NoValue(_)
            | ConfigError::ParseError { .. }
            | ConfigError::Flags { .. } => ExitCode::ConfigError,

            // A help request is not a failure.
            ConfigError::HelpRequested(_) => ExitCode::Success,

            // Declaration problems are bugs in this binary, not user input.
            ConfigError::InvalidKey { .. } | ConfigError::NotDeclared(_) => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no ConfigError is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        self.chain()
            .find_map(|cause| cause.downcast_ref::<ConfigError>())
            .map(ExitCode::from)
            .unwrap_or(ExitCode::GeneralError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_exit_code_as_i32() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::ConfigError.as_i32(), 2);
    }

    #[test]
    fn test_config_errors_map_to_config_exit_code() {
        let missing = ConfigError::MissingRequired {
            key: "name".to_string(),
            description: "service name".to_string(),
        };
        assert_eq!(ExitCode::from(&missing), ExitCode::ConfigError);

        let flags = ConfigError::Flags {
            message: "unexpected argument".to_string(),
        };
        assert_eq!(ExitCode::from(&flags), ExitCode::ConfigError);
    }

    #[test]
    fn test_exit_code_found_through_context() {
        let result: Result<(), ConfigError> = Err(ConfigError::NoValue("port".to_string()));
        let err = result.context("failed to read port").unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::ConfigError);
    }

    #[test]
    fn test_other_errors_are_general() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(err.exit_code(), ExitCode::GeneralError);
    }
}
