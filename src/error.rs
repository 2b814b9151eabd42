//! Error types for the PageTurner client

use thiserror::Error;

/// Failure categories surfaced to the page controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NetworkFailure,
    BadStatus,
    MalformedResponse,
    Configuration,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request to {url} failed with status {status}")]
    BadStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Malformed response from {url}: {message}")]
    MalformedResponse { url: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Network(_) => ErrorKind::NetworkFailure,
            AppError::BadStatus { .. } => ErrorKind::BadStatus,
            AppError::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            AppError::Config(_) => ErrorKind::Configuration,
        }
    }
}

/// Cloneable failure record held in a page state slot.
///
/// Fetch errors are normalized to a kind plus a human-readable message at the
/// controller boundary; the underlying transport error is logged, not stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&AppError> for FetchFailure {
    fn from(err: &AppError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
