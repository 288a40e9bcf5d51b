//! Tekton Pipeline HTTP Client
//!
//! A type-safe async client for the IBM Cloud Continuous Delivery Tekton
//! Pipeline API (v2).
//!
//! Every operation builds one request from its path parameters, options and
//! body, sends it, and decodes the JSON response into the models from
//! `tekton-core`.
//!
//! # Example
//!
//! ```no_run
//! use tekton_client::{ClientConfig, TektonPipelineClient};
//! use tekton_core::dto::run::CreatePipelineRun;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ClientConfig::from_env()?;
//!     let client = TektonPipelineClient::from_config(&config)?;
//!
//!     let run = client
//!         .create_tekton_pipeline_run(
//!             "94619026-912b-4d92-8f51-6c74f0692d90",
//!             &CreatePipelineRun::for_trigger("Manual Trigger"),
//!         )
//!         .await?;
//!
//!     println!("Started run: {}", run.id);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod pager;

mod definitions;
mod pipelines;
mod properties;
mod runs;
mod triggers;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use auth::{Authenticator, BearerTokenAuthenticator, NoAuthAuthenticator};
pub use config::{AuthConfig, ClientConfig};
pub use error::{ClientError, Result};
pub use pager::PipelineRunsPager;

use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

use crate::error::error_message;

/// Service endpoint used when none is configured
pub const DEFAULT_SERVICE_URL: &str = "https://api.us-south.devops.cloud.ibm.com/pipeline/v2";

const CLIENT_USER_AGENT: &str = concat!("tekton-client/", env!("CARGO_PKG_VERSION"));
const JSON: &str = "application/json";
const MERGE_PATCH_JSON: &str = "application/merge-patch+json";

/// HTTP client for the Tekton Pipeline API
///
/// Operations are grouped by resource:
/// - Pipelines (create, get, update, delete)
/// - Pipeline runs (list, start, get, cancel, rerun, delete, logs)
/// - Definitions (list, create, get, replace, delete)
/// - Pipeline and trigger properties (list, create, get, replace, delete)
/// - Triggers (list, create, get, update, duplicate, delete)
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct TektonPipelineClient {
    /// Base URL of the service (e.g., "https://api.us-south.devops.cloud.ibm.com/pipeline/v2")
    base_url: String,
    /// HTTP client instance
    client: Client,
    /// Applied to every outgoing request
    authenticator: Arc<dyn Authenticator>,
}

impl TektonPipelineClient {
    /// Create a new client without authentication
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the service
    ///
    /// # Example
    /// ```
    /// use tekton_client::TektonPipelineClient;
    ///
    /// let client = TektonPipelineClient::new("https://api.us-south.devops.cloud.ibm.com/pipeline/v2");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use tekton_client::TektonPipelineClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = TektonPipelineClient::with_client("http://localhost:8080", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            authenticator: Arc::new(NoAuthAuthenticator),
        }
    }

    /// Create a client from a validated configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self::with_client(&config.service_url, client)
            .with_authenticator(config.authenticator()?))
    }

    /// Replace the authenticator applied to requests
    pub fn with_authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = authenticator;
        self
    }

    /// Get the base URL of the service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Request Building
    // =============================================================================

    /// Build an endpoint URL below the base URL
    ///
    /// Each segment is percent-encoded on its own, so IDs and property names
    /// can never introduce extra path components.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        if self.base_url.is_empty() {
            return Err(ClientError::MissingServiceUrl);
        }

        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidServiceUrl(format!("{}: {}", self.base_url, e)))?;

        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidServiceUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// Start a request with the headers every call carries
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!("{} {}", method, url);
        self.client
            .request(method, url)
            .header(ACCEPT, JSON)
            .header(USER_AGENT, CLIENT_USER_AGENT)
    }

    /// Attach a JSON merge patch body
    fn merge_patch<T: Serialize>(request: RequestBuilder, patch: &T) -> Result<RequestBuilder> {
        let body = serde_json::to_vec(patch)
            .map_err(|e| ClientError::InvalidRequest(format!("Failed to encode patch: {}", e)))?;

        Ok(request.header(CONTENT_TYPE, MERGE_PATCH_JSON).body(body))
    }

    /// Authenticate and send a request
    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response> {
        let request = self.authenticator.authenticate(request).await?;
        Ok(request.send().await?)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            return Err(Self::api_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response that returns no content (e.g., DELETE operations)
    ///
    /// This method checks the status code and returns an error if the request failed.
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        Ok(())
    }

    async fn api_error(response: reqwest::Response) -> ClientError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        debug!("Request failed with status {}: {}", status, body);

        ClientError::api_error(status.as_u16(), error_message(&body))
    }
}

/// Reject empty required path parameters before any request is made
pub(crate) fn require(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ClientError::InvalidRequest(format!("{} must be set", name)));
    }
    Ok(())
}
