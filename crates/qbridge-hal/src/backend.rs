//! Backend trait and configuration.
//!
//! A [`Backend`] turns circuits into [`Job`] handles:
//!
//! ```text
//!   capabilities() ──→ run() ──→ Job::status() ──→ Job::result()
//!    (sync, &ref)      (async)      (async)          (async)
//! ```
//!
//! - `capabilities()` is synchronous and infallible; it is cached at
//!   construction.
//! - `run()` validates the submission against the capabilities before doing
//!   anything else, even when callers already checked them.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::capability::Capabilities;
use crate::circuit::Circuit;
use crate::error::{HalError, HalResult};
use crate::job::Job;

/// Shot count used when neither the caller nor the configuration sets one.
pub const DEFAULT_SHOTS: u32 = 1024;

/// Configuration for a backend instance.
#[derive(Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Name of the backend.
    pub name: String,
    /// Service endpoint URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Bearer token.
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// Additional configuration.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BackendConfig {
    /// Create a new backend configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoint: None,
            token: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Set the endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the authentication token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Add extra configuration.
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Read an unsigned integer from `extra`.
    ///
    /// Absent keys yield `Ok(None)`; present keys of the wrong type are a
    /// configuration error.
    pub fn extra_u64(&self, key: &str) -> HalResult<Option<u64>> {
        match self.extra.get(key) {
            None => Ok(None),
            Some(value) => value.as_u64().map(Some).ok_or_else(|| {
                HalError::Configuration(format!(
                    "'{key}' must be a non-negative integer, got {value}"
                ))
            }),
        }
    }
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("name", &self.name)
            .field("endpoint", &self.endpoint)
            .field("token", &"[REDACTED]")
            .field("extra", &self.extra)
            .finish()
    }
}

/// Run-time defaults applied to submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendOptions {
    /// Shots per job when the caller does not pass a count.
    pub shots: u32,
}

impl BackendOptions {
    /// Use `requested` if given, else the configured default.
    pub fn resolve_shots(&self, requested: Option<u32>) -> u32 {
        requested.unwrap_or(self.shots)
    }
}

impl Default for BackendOptions {
    fn default() -> Self {
        Self {
            shots: DEFAULT_SHOTS,
        }
    }
}

/// Trait for backends that execute circuits as jobs.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Get the version of this backend.
    fn version(&self) -> &str;

    /// Get the capabilities of this backend.
    fn capabilities(&self) -> &Capabilities;

    /// Get the submission defaults of this backend.
    fn options(&self) -> &BackendOptions;

    /// Validate a submission and resolve its shot count.
    ///
    /// Fails with [`HalError::InvalidInput`] when the circuit count is
    /// outside `1..=max_circuits` or the resolved shot count is zero.
    fn check_submission(&self, circuits: &[Circuit], shots: Option<u32>) -> HalResult<u32> {
        let caps = self.capabilities();
        if !caps.accepts_circuit_count(circuits.len()) {
            return Err(HalError::InvalidInput(format!(
                "{} accepts 1 to {} circuit(s) per job, got {}",
                self.name(),
                caps.max_circuits,
                circuits.len()
            )));
        }

        let shots = self.options().resolve_shots(shots);
        if shots == 0 {
            return Err(HalError::InvalidInput(
                "Shot count must be at least 1".into(),
            ));
        }
        Ok(shots)
    }

    /// Run circuits and return a handle to the resulting job.
    async fn run(&self, circuits: &[Circuit], shots: Option<u32>) -> HalResult<Box<dyn Job>>;
}

/// Trait for creating backends from configuration.
pub trait BackendFactory: Backend + Sized {
    /// Create a backend from configuration.
    fn from_config(config: BackendConfig) -> HalResult<Self>;
}
