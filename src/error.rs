//! Error types for consumo operations.
//!
//! Two failure classes exist at runtime: artifact problems at startup
//! (missing, corrupt, or mutually inconsistent files) and a feature-width
//! disagreement between an aligned vector and the model. Both surface as
//! [`ConsumoError`]; user input is never an error (out-of-range values are
//! clamped by the collector, unseen categories are absorbed by alignment).

use std::fmt;
use std::path::PathBuf;

/// Main error type for consumo operations.
///
/// # Examples
///
/// ```
/// use consumo::error::ConsumoError;
///
/// let err = ConsumoError::DimensionMismatch {
///     expected: "20 features".to_string(),
///     actual: "24".to_string(),
/// };
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Debug)]
pub enum ConsumoError {
    /// Vector/matrix width disagrees with what the operation expects.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// A required artifact file does not exist.
    ArtifactMissing {
        /// Path that was probed
        path: PathBuf,
    },

    /// Artifact exists but its contents are invalid or truncated.
    FormatError {
        /// Error description
        message: String,
    },

    /// I/O error (permission denied, read failure, etc.).
    Io(std::io::Error),

    /// Serialization/deserialization error.
    Serialization(String),

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for ConsumoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsumoError::DimensionMismatch { expected, actual } => {
                write!(f, "dimension mismatch: expected {expected}, got {actual}")
            }
            ConsumoError::ArtifactMissing { path } => {
                write!(f, "artifact not found: {}", path.display())
            }
            ConsumoError::FormatError { message } => {
                write!(f, "invalid artifact format: {message}")
            }
            ConsumoError::Io(e) => write!(f, "I/O error: {e}"),
            ConsumoError::Serialization(msg) => write!(f, "serialization error: {msg}"),
            ConsumoError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConsumoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConsumoError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConsumoError {
    fn from(err: std::io::Error) -> Self {
        ConsumoError::Io(err)
    }
}

impl From<&str> for ConsumoError {
    fn from(msg: &str) -> Self {
        ConsumoError::Other(msg.to_string())
    }
}

impl From<String> for ConsumoError {
    fn from(msg: String) -> Self {
        ConsumoError::Other(msg)
    }
}

impl ConsumoError {
    /// Create a dimension mismatch error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create a format error from any displayable detail
    #[must_use]
    pub fn format_error(message: impl Into<String>) -> Self {
        Self::FormatError {
            message: message.into(),
        }
    }

    /// Create an empty input error
    #[must_use]
    pub fn empty_input(context: &str) -> Self {
        Self::Other(format!("empty input: {context}"))
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, ConsumoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_display() {
        let err = ConsumoError::DimensionMismatch {
            expected: "20 features".to_string(),
            actual: "24".to_string(),
        };
        assert!(err.to_string().contains("dimension mismatch"));
        assert!(err.to_string().contains("20 features"));
        assert!(err.to_string().contains("24"));
    }

    #[test]
    fn test_artifact_missing_display() {
        let err = ConsumoError::ArtifactMissing {
            path: PathBuf::from("scaler.safetensors"),
        };
        let msg = err.to_string();
        assert!(msg.contains("artifact not found"));
        assert!(msg.contains("scaler.safetensors"));
    }

    #[test]
    fn test_format_error_display() {
        let err = ConsumoError::format_error("header truncated");
        assert!(err.to_string().contains("invalid artifact format"));
        assert!(err.to_string().contains("header truncated"));
    }

    #[test]
    fn test_from_str() {
        let err: ConsumoError = "test error".into();
        assert!(matches!(err, ConsumoError::Other(_)));
        assert_eq!(err.to_string(), "test error");
    }

    #[test]
    fn test_from_string() {
        let err: ConsumoError = String::from("owned error").into();
        assert_eq!(err.to_string(), "owned error");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ConsumoError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_dimension_mismatch_helper() {
        let err = ConsumoError::dimension_mismatch("schema columns", 20, 19);
        assert!(err.to_string().contains("schema columns=20"));
        assert!(err.to_string().contains("19"));
    }

    #[test]
    fn test_empty_input_helper() {
        let err = ConsumoError::empty_input("column list");
        assert!(err.to_string().contains("empty input"));
        assert!(err.to_string().contains("column list"));
    }
}
