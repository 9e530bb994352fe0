//! Error types for the plugin adapter.

use thiserror::Error;

/// Result type for plugin service operations.
pub type PluginResult<T> = Result<T, PluginError>;

/// Errors that can occur when talking to a plugin service.
#[derive(Debug, Error)]
pub enum PluginError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Service returned a non-success HTTP status.
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// The polled URL does not exist.
    #[error("Job not found: {0}")]
    JobNotFound(String),

    /// The poll response carried a status tag outside the protocol.
    #[error("Unrecognized job status tag '{tag}' at {url}")]
    UnknownStatus { url: String, tag: String },
}

impl From<PluginError> for qbridge_hal::HalError {
    fn from(e: PluginError) -> Self {
        qbridge_hal::HalError::Transport(e.to_string())
    }
}
