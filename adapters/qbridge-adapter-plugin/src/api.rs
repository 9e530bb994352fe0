//! Plugin service REST client.
//!
//! A plugin runner exposes every task under a result URL. Polling that URL
//! returns the task status and, once finished, the list of produced
//! outputs; each output is fetched separately from its own `href`.
//!
//! The network side sits behind the [`PluginTransport`] trait so that jobs
//! can be driven by any transport; [`PluginClient`] is the HTTP one.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{PluginError, PluginResult};

/// Default per-request timeout for status polls.
pub const DEFAULT_POLL_REQUEST_TIMEOUT: Duration = Duration::from_secs(1);

/// User agent string sent with every request.
const USER_AGENT: &str = concat!("qbridge-adapter-plugin/", env!("CARGO_PKG_VERSION"));

/// Network operations a plugin job needs.
#[async_trait]
pub trait PluginTransport: Send + Sync {
    /// Poll the task at `url` once.
    async fn fetch_status(&self, url: &str) -> PluginResult<StatusPayload>;

    /// Fetch the JSON document of an output.
    async fn fetch_counts(&self, url: &str) -> PluginResult<serde_json::Value>;
}

/// HTTP client for plugin runners.
#[derive(Clone)]
pub struct PluginClient {
    /// HTTP client with timeouts configured.
    client: Client,
    /// Optional bearer token.
    token: Option<String>,
    /// Per-request timeout applied to status polls.
    poll_timeout: Duration,
}

impl std::fmt::Debug for PluginClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginClient")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("poll_timeout", &self.poll_timeout)
            .finish()
    }
}

impl PluginClient {
    /// Create an unauthenticated client.
    pub fn new() -> PluginResult<Self> {
        Self::with_options(None, DEFAULT_POLL_REQUEST_TIMEOUT)
    }

    /// Create a client with an optional bearer token and poll timeout.
    pub fn with_options(token: Option<String>, poll_timeout: Duration) -> PluginResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()
            .map_err(PluginError::Http)?;

        Ok(Self {
            client,
            token: token.filter(|t| !t.is_empty()),
            poll_timeout,
        })
    }

    /// Per-request timeout applied to status polls.
    pub fn poll_timeout(&self) -> Duration {
        self.poll_timeout
    }

    /// Perform a GET request, returning the deserialized JSON body.
    async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        timeout: Option<Duration>,
    ) -> PluginResult<T> {
        debug!("GET {}", url);

        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let resp = request.send().await?;
        Self::handle_response(url, resp).await
    }

    /// Handle HTTP response: deserialize JSON or return an error.
    async fn handle_response<T: for<'de> Deserialize<'de>>(
        url: &str,
        response: reqwest::Response,
    ) -> PluginResult<T> {
        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await?;
            Ok(serde_json::from_slice(&body)?)
        } else {
            let message = response.text().await.unwrap_or_default();
            match status {
                StatusCode::NOT_FOUND => Err(PluginError::JobNotFound(url.to_string())),
                _ => Err(PluginError::ApiError {
                    status: status.as_u16(),
                    message,
                }),
            }
        }
    }
}

#[async_trait]
impl PluginTransport for PluginClient {
    #[instrument(skip(self))]
    async fn fetch_status(&self, url: &str) -> PluginResult<StatusPayload> {
        self.get(url, Some(self.poll_timeout)).await
    }

    #[instrument(skip(self))]
    async fn fetch_counts(&self, url: &str) -> PluginResult<serde_json::Value> {
        self.get(url, None).await
    }
}

// ---------------------------------------------------------------------------
// Request / response serde types
// ---------------------------------------------------------------------------

/// Status tag of a plugin task.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum RemoteStatus {
    /// `PENDING`: still running.
    Pending,
    /// `SUCCESS`: outputs are available.
    Success,
    /// `FAILURE`: the task failed.
    Failure,
    /// Any tag outside the protocol.
    Other(String),
}

impl From<String> for RemoteStatus {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "PENDING" => RemoteStatus::Pending,
            "SUCCESS" => RemoteStatus::Success,
            "FAILURE" => RemoteStatus::Failure,
            _ => RemoteStatus::Other(tag),
        }
    }
}

impl From<&str> for RemoteStatus {
    fn from(tag: &str) -> Self {
        RemoteStatus::from(tag.to_string())
    }
}

impl std::fmt::Display for RemoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoteStatus::Pending => write!(f, "PENDING"),
            RemoteStatus::Success => write!(f, "SUCCESS"),
            RemoteStatus::Failure => write!(f, "FAILURE"),
            RemoteStatus::Other(tag) => write!(f, "{tag}"),
        }
    }
}

/// Body returned when polling a task's result URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusPayload {
    /// Task status.
    pub status: RemoteStatus,
    /// Produced outputs; populated once the task succeeded.
    #[serde(default)]
    pub outputs: Vec<OutputDescriptor>,
}

impl StatusPayload {
    /// A payload with the given status and no outputs.
    pub fn new(status: impl Into<RemoteStatus>) -> Self {
        Self {
            status: status.into(),
            outputs: Vec::new(),
        }
    }

    /// Append an output descriptor.
    pub fn with_output(mut self, name: impl Into<String>, href: impl Into<String>) -> Self {
        self.outputs.push(OutputDescriptor {
            name: name.into(),
            href: href.into(),
            data_type: None,
            content_type: None,
        });
        self
    }
}

/// One named output of a finished task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputDescriptor {
    /// Output name, e.g. `"circuit-result-counts.json"`.
    pub name: String,
    /// Where to fetch the output.
    pub href: String,
    /// Logical data type, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    /// MIME type, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

/// Body for submitting one circuit to a plugin runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    /// Circuit as a `data:text/x-qasm;base64,...` URL.
    pub circuit: String,
    /// Number of shots.
    pub shots: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_payload_success() {
        let body = r#"{
            "status": "SUCCESS",
            "outputs": [
                {"name": "log.txt", "href": "https://runner/files/1", "dataType": "text", "contentType": "text/plain"},
                {"name": "result-counts.json", "href": "https://runner/files/2"}
            ],
            "log": "ignored"
        }"#;
        let payload: StatusPayload = serde_json::from_str(body).unwrap();
        assert_eq!(payload.status, RemoteStatus::Success);
        assert_eq!(payload.outputs.len(), 2);
        assert_eq!(payload.outputs[0].content_type.as_deref(), Some("text/plain"));
        assert_eq!(payload.outputs[1].href, "https://runner/files/2");
    }

    #[test]
    fn test_status_payload_pending_without_outputs() {
        let payload: StatusPayload = serde_json::from_str(r#"{"status": "PENDING"}"#).unwrap();
        assert_eq!(payload.status, RemoteStatus::Pending);
        assert!(payload.outputs.is_empty());
    }

    #[test]
    fn test_status_payload_unknown_tag() {
        let payload: StatusPayload = serde_json::from_str(r#"{"status": "RETRY"}"#).unwrap();
        assert_eq!(payload.status, RemoteStatus::Other("RETRY".into()));
        assert_eq!(payload.status.to_string(), "RETRY");
    }

    #[test]
    fn test_status_payload_missing_status_is_error() {
        assert!(serde_json::from_str::<StatusPayload>(r#"{"outputs": []}"#).is_err());
    }

    #[test]
    fn test_submit_request_serialization() {
        let req = SubmitRequest {
            circuit: "data:text/x-qasm;base64,AA==".into(),
            shots: 1024,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["circuit"], "data:text/x-qasm;base64,AA==");
        assert_eq!(json["shots"], 1024);
    }

    #[test]
    fn test_client_debug_redacts_token() {
        let client =
            PluginClient::with_options(Some("secret".into()), DEFAULT_POLL_REQUEST_TIMEOUT)
                .unwrap();
        let dbg = format!("{client:?}");
        assert!(!dbg.contains("secret"));
        assert!(dbg.contains("[REDACTED]"));
    }

    #[test]
    fn test_client_empty_token_is_ignored() {
        let client = PluginClient::with_options(Some(String::new()), Duration::from_secs(3)).unwrap();
        assert!(client.token.is_none());
        assert_eq!(client.poll_timeout(), Duration::from_secs(3));
    }
}
