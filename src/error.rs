//! Error types and handling for the destinos server

use serde::Serialize;
use std::fmt;

/// Application error types
#[derive(Debug, Serialize)]
pub enum AppError {
    InvalidInput(String),
    DataLoad(String),
    NotFound(String),
    ReplyFailed(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::DataLoad(msg) => write!(f, "Dataset load failed: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::ReplyFailed(msg) => write!(f, "Reply generation failed: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Get the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::DataLoad(_) => "data_load_failed",
            AppError::NotFound(_) => "not_found",
            AppError::ReplyFailed(_) => "reply_failed",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Convert anyhow::Error to AppError
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Convert serde_json::Error to AppError
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Convert std::io::Error to AppError
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::DataLoad(err.to_string())
    }
}

/// Convert reqwest::Error to AppError
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::ReplyFailed(err.to_string())
    }
}

impl From<crate::dataset::DatasetError> for AppError {
    fn from(err: crate::dataset::DatasetError) -> Self {
        AppError::DataLoad(err.to_string())
    }
}

/// Validation for the public search contract: `max_results` must be positive
pub fn validate_max_results(max_results: usize) -> Result<(), AppError> {
    if max_results == 0 {
        return Err(AppError::InvalidInput(
            "max_results must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::InvalidInput("x".to_string()).error_code(),
            "invalid_input"
        );
        assert_eq!(
            AppError::DataLoad("x".to_string()).error_code(),
            "data_load_failed"
        );
        assert_eq!(
            AppError::ReplyFailed("x".to_string()).error_code(),
            "reply_failed"
        );
    }

    #[test]
    fn test_display() {
        let err = AppError::InvalidInput("query too long".to_string());
        assert_eq!(err.to_string(), "Invalid input: query too long");
    }

    #[test]
    fn test_validate_max_results() {
        assert!(validate_max_results(0).is_err());
        assert!(validate_max_results(1).is_ok());
        assert!(validate_max_results(8).is_ok());
    }
}
