//! Plugin job: one task on a plugin runner, identified by its result URL.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tokio::time::{Instant, sleep};
use tracing::{debug, info, instrument, warn};

use qbridge_hal::{
    Circuit, Counts, HalError, HalResult, Job, JobId, JobStatus, NormalizedResult, WaitOptions,
};

use crate::api::{PluginClient, PluginTransport, RemoteStatus, StatusPayload};
use crate::counts::{parse_counts, select_counts_output};
use crate::error::PluginError;

/// Handle to a task on a plugin runner.
///
/// The job id is the task's result URL; it is polled for status and, on
/// success, points to the outputs the counts are read from.
///
/// Status, success payload and result are each written at most once. Once a
/// terminal status has been seen the remote side is never polled again, and
/// a successful payload is kept so that a failed counts extraction can be
/// retried without polling.
pub struct PluginJob<T: PluginTransport = PluginClient> {
    job_id: JobId,
    circuit: Circuit,
    backend_name: String,
    backend_version: String,
    transport: Arc<T>,
    status: OnceCell<JobStatus>,
    payload: OnceCell<StatusPayload>,
    result: OnceCell<NormalizedResult>,
}

impl<T: PluginTransport> std::fmt::Debug for PluginJob<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginJob")
            .field("job_id", &self.job_id)
            .field("circuit", &self.circuit.name)
            .field("backend", &self.backend_name)
            .field("status", &self.status.get())
            .field("has_result", &self.result.initialized())
            .finish()
    }
}

impl<T: PluginTransport> PluginJob<T> {
    /// Bind a job to a result URL.
    pub fn new(
        job_id: impl Into<JobId>,
        circuit: Circuit,
        backend_name: impl Into<String>,
        backend_version: impl Into<String>,
        transport: Arc<T>,
    ) -> Self {
        Self {
            job_id: job_id.into(),
            circuit,
            backend_name: backend_name.into(),
            backend_version: backend_version.into(),
            transport,
            status: OnceCell::new(),
            payload: OnceCell::new(),
            result: OnceCell::new(),
        }
    }

    /// The circuit this job executes.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Name of the backend that created this job.
    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    /// Terminal status observed so far, without touching the network.
    pub fn cached_status(&self) -> Option<JobStatus> {
        self.status.get().copied()
    }

    async fn poll(&self) -> HalResult<StatusPayload> {
        let payload = self.transport.fetch_status(self.job_id.as_str()).await?;
        debug!("Job {} reported {}", self.job_id, payload.status);
        Ok(payload)
    }

    fn record_success(&self, payload: StatusPayload) -> JobStatus {
        // Concurrent pollers may race here; the first write wins.
        let _ = self.payload.set(payload);
        let _ = self.status.set(JobStatus::Done);
        self.cached_status().unwrap_or(JobStatus::Done)
    }

    fn record_error(&self) -> JobStatus {
        let _ = self.status.set(JobStatus::Error);
        self.cached_status().unwrap_or(JobStatus::Error)
    }

    fn failed(&self) -> HalError {
        HalError::JobFailed(format!("plugin task {} ended in an error state", self.job_id))
    }

    /// Poll until the task reports `SUCCESS`, then return its payload.
    async fn wait_for_success(&self, options: WaitOptions) -> HalResult<StatusPayload> {
        let start = Instant::now();

        loop {
            let elapsed = start.elapsed();
            if options.timeout.is_some_and(|timeout| elapsed >= timeout) {
                debug!("Giving up on job {} after {:?}", self.job_id, elapsed);
                return Err(HalError::Timeout(self.job_id.0.clone()));
            }

            let payload = self.poll().await?;
            match payload.status {
                RemoteStatus::Success => {
                    self.record_success(payload.clone());
                    return Ok(payload);
                }
                RemoteStatus::Failure => {
                    warn!("Plugin task {} failed", self.job_id);
                    self.record_error();
                    return Err(self.failed());
                }
                RemoteStatus::Other(ref tag) => {
                    warn!("Plugin task {} reported unknown status {}", self.job_id, tag);
                    return Err(PluginError::UnknownStatus {
                        url: self.job_id.0.clone(),
                        tag: tag.clone(),
                    }
                    .into());
                }
                RemoteStatus::Pending => sleep(options.poll_interval).await,
            }
        }
    }

    async fn fetch_counts(&self, payload: &StatusPayload) -> HalResult<Counts> {
        let output = select_counts_output(&payload.outputs)?;
        debug!("Fetching counts of job {} from {}", self.job_id, output.href);
        let document = self.transport.fetch_counts(&output.href).await?;
        parse_counts(document)
    }
}

#[async_trait]
impl<T: PluginTransport> Job for PluginJob<T> {
    fn job_id(&self) -> &JobId {
        &self.job_id
    }

    #[instrument(skip(self))]
    async fn status(&self) -> HalResult<JobStatus> {
        if let Some(status) = self.cached_status() {
            return Ok(status);
        }

        let payload = self.poll().await?;
        let status = match payload.status {
            RemoteStatus::Pending => JobStatus::Running,
            RemoteStatus::Success => self.record_success(payload),
            RemoteStatus::Failure | RemoteStatus::Other(_) => {
                warn!("Plugin task {} ended with {}", self.job_id, payload.status);
                self.record_error()
            }
        };
        Ok(status)
    }

    #[instrument(skip(self))]
    async fn result(&self, options: WaitOptions) -> HalResult<NormalizedResult> {
        if let Some(result) = self.result.get() {
            return Ok(result.clone());
        }
        if self.cached_status() == Some(JobStatus::Error) {
            return Err(self.failed());
        }

        let payload = match self.payload.get() {
            Some(payload) => payload.clone(),
            None => self.wait_for_success(options).await?,
        };

        let counts = self.fetch_counts(&payload).await?;
        let result = NormalizedResult::from_counts(
            counts,
            &self.backend_name,
            &self.backend_version,
            self.job_id.clone(),
            &self.circuit.name,
        );
        info!(
            "Job {} finished: {} shots, {} outcomes",
            self.job_id,
            result.shots,
            result.counts.len()
        );

        Ok(self.result.get_or_init(|| async { result }).await.clone())
    }
}
