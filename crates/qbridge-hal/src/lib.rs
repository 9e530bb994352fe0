//! qbridge job abstraction layer
//!
//! This crate holds the backend-agnostic side of qbridge: what a job is, how
//! its status and result look, and how backends are configured and looked
//! up. Concrete backends live in the `adapters/` crates.
//!
//! # Overview
//!
//! - A [`Backend`] accepts [`Circuit`]s and returns a [`Job`] handle
//! - A [`Job`] reports its [`JobStatus`] and waits for a [`NormalizedResult`]
//! - [`Counts`] is the measurement histogram inside every result
//! - [`BackendRegistry`] creates backends by name from a [`BackendConfig`]
//!
//! # Example: Waiting for a Job
//!
//! ```ignore
//! use std::time::Duration;
//! use qbridge_hal::{Job, WaitOptions};
//!
//! async fn wait(job: &dyn Job) -> qbridge_hal::HalResult<()> {
//!     let opts = WaitOptions::default().with_timeout(Duration::from_secs(600));
//!     let result = job.result(opts).await?;
//!     if let Some((bitstring, count)) = result.counts.most_frequent() {
//!         println!("Most frequent: {} ({} of {} shots)", bitstring, count, result.shots);
//!     }
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod capability;
pub mod circuit;
pub mod error;
pub mod job;
pub mod registry;
pub mod result;

pub use backend::{Backend, BackendConfig, BackendFactory, BackendOptions, DEFAULT_SHOTS};
pub use capability::Capabilities;
pub use circuit::{Circuit, QASM_CONTENT_TYPE, text_to_data_url};
pub use error::{HalError, HalResult};
pub use job::{DEFAULT_POLL_INTERVAL, Job, JobId, JobStatus, WaitOptions};
pub use registry::BackendRegistry;
pub use result::{Counts, NormalizedResult};
