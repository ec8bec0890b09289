//! CLI-specific error types and mappings.
//!
//! This module maps core and adapter errors to exit codes and user-facing
//! messages.

use linkshelf_core::{FormError, GridError, ImportError, StoreError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The store or workspace rejected the request.
    #[error("{0}")]
    Core(String),

    /// Argument parsing error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// No link with this ID.
    #[error("{0}")]
    NotFound(String),

    /// The store could not be reached.
    #[error("{0}")]
    Unavailable(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            CliError::Core(_) => 1,
            CliError::Arguments(_) => 2,   // EX_USAGE
            CliError::NotFound(_) => 66,   // EX_NOINPUT
            CliError::Unavailable(_) => 69, // EX_UNAVAILABLE
            CliError::Io(_) => 74,         // EX_IOERR
            CliError::Config(_) => 78,     // EX_CONFIG
        }
    }
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Transport { .. } => CliError::Unavailable(err.to_string()),
            StoreError::NotFound { .. } => CliError::NotFound(err.to_string()),
            StoreError::Store { .. } | StoreError::InvalidResponse { .. } => {
                CliError::Core(err.to_string())
            }
        }
    }
}

impl From<GridError> for CliError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::UnknownRow { .. } => CliError::NotFound(err.to_string()),
            GridError::NotEditable { .. } | GridError::NotEditing { .. } => {
                CliError::Arguments(err.to_string())
            }
            GridError::Store(store_err) => store_err.into(),
        }
    }
}

impl From<FormError> for CliError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::MissingName | FormError::MissingUrl => CliError::Arguments(err.to_string()),
            FormError::Store(store_err) => store_err.into(),
        }
    }
}

impl From<ImportError> for CliError {
    fn from(err: ImportError) -> Self {
        match &err {
            ImportError::InvalidCatalog { .. } => CliError::Arguments(err.to_string()),
            ImportError::Configuration { .. } => CliError::Config(err.to_string()),
            ImportError::Fetch { source, .. } => {
                CliError::Unavailable(format!("{err} ({source})"))
            }
            ImportError::Projection { source, .. } => CliError::Core(format!("{err} ({source})")),
            ImportError::Write { path, source, .. } => {
                CliError::Io(format!("{err} {}: {source}", path.display()))
            }
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io(err.to_string())
    }
}
