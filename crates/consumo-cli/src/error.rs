//! Error types for consumo-cli

use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Result type alias for CLI operations
pub(crate) type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub(crate) enum CliError {
    /// Artifact directory not found
    #[error("Artifact directory not found: {0}")]
    DirNotFound(PathBuf),

    /// Not a directory (e.g., plain file)
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Artifact already present and --force not given
    #[error("Artifact already exists: {0} (pass --force to overwrite)")]
    AlreadyExists(PathBuf),

    /// Invalid command-line input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Consumo library error
    #[error("Consumo error: {0}")]
    Consumo(String),
}

impl CliError {
    /// Get exit code for this error
    pub(crate) fn exit_code(&self) -> ExitCode {
        match self {
            Self::DirNotFound(_) | Self::NotADirectory(_) => ExitCode::from(3),
            Self::AlreadyExists(_) => ExitCode::from(4),
            Self::InvalidInput(_) => ExitCode::from(2),
            Self::Io(_) => ExitCode::from(7),
            Self::Consumo(_) => ExitCode::from(1),
        }
    }
}

impl From<consumo::error::ConsumoError> for CliError {
    fn from(e: consumo::error::ConsumoError) -> Self {
        Self::Consumo(e.to_string())
    }
}
