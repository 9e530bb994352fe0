//! Plugin runner backend implementation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use qbridge_hal::{
    Backend, BackendConfig, BackendFactory, BackendOptions, BackendRegistry, Capabilities,
    Circuit, HalError, HalResult, Job, JobId,
};

use crate::api::{DEFAULT_POLL_REQUEST_TIMEOUT, PluginClient, PluginTransport, SubmitRequest};
use crate::job::PluginJob;

/// Name under which the backend registers itself.
pub const BACKEND_NAME: &str = "plugin-runner";

/// Backend version reported in results.
pub const BACKEND_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Backend executing circuits through a remote plugin runner.
///
/// A plugin runner accepts exactly one circuit per task; this is published
/// as `max_circuits = 1` in [`Backend::capabilities`] and enforced again by
/// [`Backend::run`].
///
/// # Example
///
/// ```ignore
/// use qbridge_adapter_plugin::PluginBackend;
/// use qbridge_hal::{Circuit, Job, WaitOptions};
///
/// let backend = PluginBackend::new()?;
/// let circuit = Circuit::from_qasm("bell", std::fs::read_to_string("bell.qasm")?);
/// let job = backend.attach("https://runner.example/tasks/42/", circuit);
/// let result = job.result(WaitOptions::default()).await?;
/// println!("{:?}", result.counts);
/// ```
pub struct PluginBackend<T: PluginTransport = PluginClient> {
    /// Transport shared with every job of this backend.
    transport: Arc<T>,
    /// Instance name.
    name: String,
    /// Cached capabilities.
    capabilities: Capabilities,
    /// Submission defaults.
    options: BackendOptions,
}

impl<T: PluginTransport> std::fmt::Debug for PluginBackend<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginBackend")
            .field("name", &self.name)
            .field("capabilities", &self.capabilities)
            .field("options", &self.options)
            .finish()
    }
}

impl PluginBackend<PluginClient> {
    /// Create a backend with an unauthenticated HTTP client.
    pub fn new() -> HalResult<Self> {
        Self::with_token(None)
    }

    /// Create a backend whose requests carry a bearer token.
    pub fn with_token(token: Option<String>) -> HalResult<Self> {
        let client = PluginClient::with_options(token, DEFAULT_POLL_REQUEST_TIMEOUT)?;
        Ok(Self::with_transport(Arc::new(client)))
    }
}

impl<T: PluginTransport> PluginBackend<T> {
    /// Create a backend on top of an arbitrary transport.
    pub fn with_transport(transport: Arc<T>) -> Self {
        let options = BackendOptions::default();
        Self {
            transport,
            name: BACKEND_NAME.to_string(),
            capabilities: Capabilities::plugin_runner(BACKEND_NAME, options.shots),
            options,
        }
    }

    /// Replace the submission defaults.
    pub fn with_options(mut self, options: BackendOptions) -> Self {
        self.options = options;
        self.capabilities.default_shots = options.shots;
        self
    }

    /// Rename this backend instance.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self.capabilities.name = self.name.clone();
        self
    }

    /// Bind a job handle to an existing task result URL.
    pub fn attach(&self, result_url: impl Into<JobId>, circuit: Circuit) -> PluginJob<T> {
        PluginJob::new(
            result_url,
            circuit,
            &self.name,
            BACKEND_VERSION,
            Arc::clone(&self.transport),
        )
    }
}

#[async_trait]
impl<T: PluginTransport + 'static> Backend for PluginBackend<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        BACKEND_VERSION
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    fn options(&self) -> &BackendOptions {
        &self.options
    }

    #[instrument(skip(self, circuits))]
    async fn run(&self, circuits: &[Circuit], shots: Option<u32>) -> HalResult<Box<dyn Job>> {
        let shots = self.check_submission(circuits, shots)?;
        let circuit = circuits
            .first()
            .ok_or_else(|| HalError::InvalidInput("no circuit given".into()))?;

        let request = SubmitRequest {
            circuit: circuit.to_data_url(),
            shots,
        };
        info!(
            "Prepared circuit '{}' for {}: {} shots, {} byte payload",
            circuit.name,
            self.name,
            request.shots,
            request.circuit.len()
        );

        // TODO: POST the request to the runner's task endpoint and attach the
        // returned result URL once the runner exposes a submission route.
        Err(HalError::NotImplemented(format!(
            "submitting circuits to {} is not supported yet; use attach() with an existing result URL",
            self.name
        )))
    }
}

impl BackendFactory for PluginBackend<PluginClient> {
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let poll_timeout = config
            .extra_u64("poll_request_timeout_secs")?
            .map_or(DEFAULT_POLL_REQUEST_TIMEOUT, Duration::from_secs);

        let mut options = BackendOptions::default();
        if let Some(shots) = config.extra_u64("shots")? {
            options.shots = u32::try_from(shots).map_err(|_| {
                HalError::Configuration(format!("'shots' out of range: {shots}"))
            })?;
        }

        debug!("Creating plugin backend from {:?}", config);
        let client = PluginClient::with_options(config.token.clone(), poll_timeout)?;
        let backend = Self::with_transport(Arc::new(client)).with_options(options);

        if config.name.is_empty() {
            Ok(backend)
        } else {
            Ok(backend.with_name(config.name))
        }
    }
}

/// Register the plugin backend under [`BACKEND_NAME`].
pub fn register_plugin_backend(registry: &mut BackendRegistry) {
    registry.register::<PluginBackend>(BACKEND_NAME);
}
