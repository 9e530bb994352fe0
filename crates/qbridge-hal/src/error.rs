//! Error types for the HAL crate.

use thiserror::Error;

/// Errors that can occur in HAL operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// The caller supplied an unusable submission (circuit count, shots).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The operation exists in the API but has no implementation yet.
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Timeout waiting for job. The job stays resumable.
    #[error("Timeout waiting for job {0}")]
    Timeout(String),

    /// The remote service reported the job as failed.
    #[error("Job failed: {0}")]
    JobFailed(String),

    /// A successful job carried no usable measurement-counts output.
    #[error("Missing counts output: {0}")]
    MissingOutput(String),

    /// The measurement-counts document did not hold valid counts.
    #[error("Malformed counts: {0}")]
    MalformedCounts(String),

    /// Network failure, undecodable body, HTTP error status or protocol violation.
    #[error("Transport error: {0}")]
    Transport(String),

    /// No backend registered under the requested name.
    #[error("Backend not available: {0}")]
    BackendUnavailable(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl HalError {
    /// Whether calling `result()` again can succeed without any change on
    /// the remote side.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            HalError::Timeout(_) | HalError::MissingOutput(_) | HalError::MalformedCounts(_)
        )
    }
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
