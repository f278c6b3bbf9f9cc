//! Exit codes for graphql-docgen.
//!
//! Scripts and CI jobs can tell a broken config apart from a broken schema
//! or an unwritable output file by the exit status alone.

use graphql_config::ConfigError;
use graphql_hir::SchemaError;

/// Exit codes used by the CLI.
///
/// These follow standard Unix conventions where 0 indicates success
/// and non-zero values indicate different types of failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Unexpected failure not covered below
    Failure = 1,
    /// Configuration error (missing or invalid config file)
    ConfigError = 2,
    /// Schema load error (parse failure, no query type, no files matched)
    SchemaError = 3,
    /// I/O error (file read/write failure)
    IoError = 4,
}

impl ExitCode {
    /// Exit the process with this exit code.
    pub fn exit(self) -> ! {
        std::process::exit(self.code())
    }

    /// Get the numeric value of this exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Classify a command failure by the error at its root.
    ///
    /// Context added with `anyhow` is looked through, so a schema parse
    /// error wrapped in "Failed to load schema" still maps to
    /// [`ExitCode::SchemaError`].
    #[must_use]
    pub fn for_error(error: &anyhow::Error) -> Self {
        if error.downcast_ref::<ConfigError>().is_some() {
            Self::ConfigError
        } else if error.downcast_ref::<SchemaError>().is_some() {
            Self::SchemaError
        } else if error.downcast_ref::<std::io::Error>().is_some() {
            Self::IoError
        } else {
            Self::Failure
        }
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Failure => write!(f, "failure"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::SchemaError => write!(f, "schema load error"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
