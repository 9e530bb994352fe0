//! Job lifecycle types.
//!
//! The job state machine as observed by a client:
//!
//! ```text
//!   run() ──→ Running ──→ Done
//!                │
//!                └──────→ Error
//! ```
//!
//! **Invariants:**
//! - Terminal states (`Done`, `Error`) are permanent; once observed they are
//!   cached by the job and never polled again.
//! - A timed-out wait does not change the job's state.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::HalResult;
use crate::result::NormalizedResult;

/// Default pause between two polls in [`Job::result`].
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Unique identifier for a job.
///
/// For remote jobs this is the result-location URL that is polled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl JobId {
    /// Create a new job ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Status of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// Job is still being processed remotely.
    Running,
    /// Job completed successfully.
    Done,
    /// Job ended in an error.
    Error,
}

impl JobStatus {
    /// Check if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Done | JobStatus::Error)
    }

    /// Check if the job completed successfully.
    pub fn is_success(&self) -> bool {
        matches!(self, JobStatus::Done)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Running => write!(f, "Running"),
            JobStatus::Done => write!(f, "Done"),
            JobStatus::Error => write!(f, "Error"),
        }
    }
}

/// How long and how often [`Job::result`] polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Give up after this long. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Fixed pause between polls.
    pub poll_interval: Duration,
}

impl WaitOptions {
    /// Set the overall timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the pause between polls.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// A handle to one unit of submitted work.
///
/// Implementations cache terminal state themselves; callers may invoke
/// `status()` and `result()` any number of times.
#[async_trait]
pub trait Job: Send + Sync {
    /// The job identifier.
    fn job_id(&self) -> &JobId;

    /// Query the current status with at most one network round trip.
    ///
    /// Does not wait for completion.
    async fn status(&self) -> HalResult<JobStatus>;

    /// Wait for the job to finish and return its normalized result.
    ///
    /// Returns the cached result on repeated calls.
    async fn result(&self, options: WaitOptions) -> HalResult<NormalizedResult>;
}
