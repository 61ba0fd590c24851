//! CLI-specific error types and mappings.

use thiserror::Error;
use wittr_core::LiveUpdateError;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument parsing error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (signal handling, terminal output).
    #[error("IO error: {0}")]
    Io(String),
}

impl CliError {
    /// Map error to a sysexits-style exit code.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
        }
    }
}

impl From<LiveUpdateError> for CliError {
    fn from(err: LiveUpdateError) -> Self {
        match err {
            LiveUpdateError::Settings(e) => Self::Config(e.to_string()),
            LiveUpdateError::Address(e) => Self::Arguments(e.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
