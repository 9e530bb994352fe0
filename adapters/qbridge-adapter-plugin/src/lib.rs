//! qbridge adapter for remote plugin runners
//!
//! A plugin runner executes one circuit per task and publishes each task
//! under a result URL. This crate polls that URL, waits for the task to
//! finish and turns its `result-counts` output into a
//! [`qbridge_hal::NormalizedResult`].
//!
//! # Protocol
//!
//! | Step | Request | Body |
//! |------|---------|------|
//! | poll | `GET <result URL>` | `{"status": "PENDING" \| "SUCCESS" \| "FAILURE", "outputs": [{"name", "href"}, ...]}` |
//! | counts | `GET <href of the first output named *result-counts*>` | `{"ID": ..., "href": ..., "00": 512, "11": 512}` |
//!
//! `ID` and `href` in the counts document are entity metadata and are
//! dropped; every other entry must be a non-negative integer.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use qbridge_adapter_plugin::PluginBackend;
//! use qbridge_hal::{Circuit, Job, WaitOptions};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = PluginBackend::new()?;
//!     let job = backend.attach(
//!         "https://runner.example/tasks/42/",
//!         Circuit::from_qasm("bell", std::fs::read_to_string("bell.qasm")?),
//!     );
//!
//!     let opts = WaitOptions::default().with_timeout(Duration::from_secs(300));
//!     let result = job.result(opts).await?;
//!     println!("{} shots: {:?}", result.shots, result.counts);
//!     Ok(())
//! }
//! ```

mod api;
mod backend;
mod counts;
mod error;
mod job;

pub use api::{
    DEFAULT_POLL_REQUEST_TIMEOUT, OutputDescriptor, PluginClient, PluginTransport, RemoteStatus,
    StatusPayload, SubmitRequest,
};
pub use backend::{BACKEND_NAME, BACKEND_VERSION, PluginBackend, register_plugin_backend};
pub use counts::{COUNTS_OUTPUT_MARKER, parse_counts, select_counts_output};
pub use error::{PluginError, PluginResult};
pub use job::PluginJob;

// Re-export common types for convenience.
pub use qbridge_hal::{Backend, BackendConfig, BackendFactory, Job, WaitOptions};
