//! CLI-specific error types with exit codes.
//!
//! This module defines error types specific to the CLI layer,
//! wrapping library errors and providing appropriate exit codes.

use std::fmt;
use wpcodecept::{ConfigErrors, Error as LibError};

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// The configuration failed validation and the report was already printed.
    InvalidConfig(ConfigErrors),

    /// Invalid command-line arguments.
    InvalidArguments(String),

    /// I/O error.
    Io(std::io::Error),

    /// Semantic failure, such as refusing to overwrite a file.
    SemanticFailure(String),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: Invalid configuration or other semantic failure
    /// - 4: Invalid arguments
    /// - 5: I/O error
    /// - 7: Configuration file missing, unreadable or malformed
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidConfig(_) | CliError::SemanticFailure(_) => 1,
            CliError::Library(lib_err) => match lib_err {
                LibError::InvalidConfiguration(_)
                | LibError::ConfigExists { .. }
                | LibError::UnnamedProjectDir { .. } => 1,
                LibError::ConfigNotFound { .. }
                | LibError::ConfigRead { .. }
                | LibError::MalformedConfig { .. } => 7,
                LibError::Io(_) | LibError::Serialization(_) | LibError::Yaml(_) => 5,
            },
            CliError::InvalidArguments(_) => 4,
            CliError::Io(_) => 5,
        }
    }

    /// Whether the error was already shown to the user.
    pub fn is_reported(&self) -> bool {
        matches!(self, CliError::InvalidConfig(_))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::InvalidConfig(errors) => write!(f, "Invalid configuration: {errors}"),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::SemanticFailure(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::InvalidConfig(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        match e {
            LibError::Io(io) => CliError::Io(io),
            other => CliError::Library(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Library(LibError::Serialization(e))
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(e: serde_yaml::Error) -> Self {
        CliError::Library(LibError::Yaml(e))
    }
}
