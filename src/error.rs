//! Error types for the screening service

use thiserror::Error;

/// Result type alias for screening operations
pub type Result<T> = std::result::Result<T, ScreeningError>;

/// Main error type for the screening service
#[derive(Error, Debug)]
pub enum ScreeningError {
    /// The classifier artifact is missing or cannot be deserialized.
    /// Fatal at startup: the service refuses to run without a model.
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// One or more form fields are missing, blank, or not parseable as a
    /// finite number. Recoverable: surfaced to the user as a warning.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid feature count: expected {expected}, got {actual}")]
    FeatureCount { expected: usize, actual: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Unexpected failure: {0}")]
    Unexpected(String),
}

impl From<serde_json::Error> for ScreeningError {
    fn from(err: serde_json::Error) -> Self {
        ScreeningError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ScreeningError::InvalidInput("MDVP:Fo(Hz)".to_string());
        assert_eq!(err.to_string(), "Invalid input: MDVP:Fo(Hz)");
    }

    #[test]
    fn test_feature_count_display() {
        let err = ScreeningError::FeatureCount { expected: 22, actual: 21 };
        assert_eq!(
            err.to_string(),
            "Invalid feature count: expected 22, got 21"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ScreeningError = io_err.into();
        assert!(matches!(err, ScreeningError::Io(_)));
    }
}
