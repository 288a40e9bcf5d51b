//! Client configuration
//!
//! Settings for reaching the Tekton Pipeline service: where it lives, how
//! requests are authenticated and how long a request may take.

use std::sync::Arc;
use std::time::Duration;

use crate::DEFAULT_SERVICE_URL;
use crate::auth::{Authenticator, BearerTokenAuthenticator, NoAuthAuthenticator};
use crate::error::{ClientError, Result};

/// Environment variable holding the service URL
pub const ENV_URL: &str = "CD_TEKTON_PIPELINE_URL";
/// Environment variable selecting the authentication scheme
pub const ENV_AUTH_TYPE: &str = "CD_TEKTON_PIPELINE_AUTH_TYPE";
/// Environment variable holding the bearer token
pub const ENV_BEARER_TOKEN: &str = "CD_TEKTON_PIPELINE_BEARER_TOKEN";
/// Environment variable holding the request timeout in seconds
pub const ENV_TIMEOUT: &str = "CD_TEKTON_PIPELINE_TIMEOUT";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// How requests are authenticated
#[derive(Clone, PartialEq, Eq)]
pub enum AuthConfig {
    /// No credentials
    NoAuth,
    /// A caller-supplied bearer token
    BearerToken(String),
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthConfig::NoAuth => write!(f, "NoAuth"),
            AuthConfig::BearerToken(_) => write!(f, "BearerToken(<redacted>)"),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the service (e.g., "https://api.us-south.devops.cloud.ibm.com/pipeline/v2")
    pub service_url: String,

    /// Authentication scheme and credentials
    pub auth: AuthConfig,

    /// Maximum time for a single request, including reading the body
    pub timeout: Duration,
}

impl ClientConfig {
    /// Creates a new configuration with defaults
    pub fn new(service_url: impl Into<String>) -> Self {
        Self {
            service_url: service_url.into(),
            auth: AuthConfig::NoAuth,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - CD_TEKTON_PIPELINE_URL (optional, default: us-south endpoint)
    /// - CD_TEKTON_PIPELINE_AUTH_TYPE (optional, `noauth` or `bearertoken`;
    ///   defaults to `bearertoken` when a token is present)
    /// - CD_TEKTON_PIPELINE_BEARER_TOKEN (required for bearer auth)
    /// - CD_TEKTON_PIPELINE_TIMEOUT (optional, seconds, default: 60)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let service_url = lookup(ENV_URL).unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string());

        let token = lookup(ENV_BEARER_TOKEN).filter(|t| !t.is_empty());
        let auth = match lookup(ENV_AUTH_TYPE).map(|s| s.to_ascii_lowercase()) {
            Some(kind) if kind == "noauth" => AuthConfig::NoAuth,
            Some(kind) if kind == "bearertoken" => AuthConfig::BearerToken(token.ok_or_else(|| {
                ClientError::InvalidConfig(format!(
                    "{} must be set for bearer token authentication",
                    ENV_BEARER_TOKEN
                ))
            })?),
            Some(kind) => {
                return Err(ClientError::InvalidConfig(format!(
                    "unsupported authentication type: {}",
                    kind
                )));
            }
            None => token.map_or(AuthConfig::NoAuth, AuthConfig::BearerToken),
        };

        let timeout = match lookup(ENV_TIMEOUT) {
            Some(raw) => raw.parse::<u64>().map(Duration::from_secs).map_err(|_| {
                ClientError::InvalidConfig(format!("{} must be a number of seconds", ENV_TIMEOUT))
            })?,
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            service_url,
            auth,
            timeout,
        })
    }

    /// Use a bearer token for every request
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.auth = AuthConfig::BearerToken(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.service_url.is_empty() {
            return Err(ClientError::MissingServiceUrl);
        }

        if !self.service_url.starts_with("http://") && !self.service_url.starts_with("https://") {
            return Err(ClientError::InvalidServiceUrl(format!(
                "{} must start with http:// or https://",
                self.service_url
            )));
        }

        if let AuthConfig::BearerToken(token) = &self.auth {
            if token.trim().is_empty() {
                return Err(ClientError::InvalidConfig(
                    "bearer token cannot be empty".to_string(),
                ));
            }
        }

        if self.timeout.is_zero() {
            return Err(ClientError::InvalidConfig(
                "timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Authenticator matching the configured scheme
    pub fn authenticator(&self) -> Result<Arc<dyn Authenticator>> {
        Ok(match &self.auth {
            AuthConfig::NoAuth => Arc::new(NoAuthAuthenticator),
            AuthConfig::BearerToken(token) => Arc::new(BearerTokenAuthenticator::new(token.clone())?),
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE_URL)
    }
}
