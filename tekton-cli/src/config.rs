//! Configuration module
//!
//! Turns the global command-line options into a client configuration.

use anyhow::{Context, Result};
use tekton_client::config::{ENV_AUTH_TYPE, ENV_BEARER_TOKEN, ENV_TIMEOUT, ENV_URL};
use tekton_client::{ClientConfig, TektonPipelineClient};

/// Global options as given on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub service_url: String,
    pub auth_type: Option<String>,
    pub bearer_token: Option<String>,
    pub timeout_secs: u64,
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Settings handed to the API client
    pub client: ClientConfig,
}

impl Config {
    /// Resolve the settings with the same rules the client applies to its
    /// environment variables
    pub fn new(settings: Settings) -> Result<Self> {
        let timeout = settings.timeout_secs.to_string();
        let lookup = |key: &str| match key {
            ENV_URL => Some(settings.service_url.clone()),
            ENV_AUTH_TYPE => settings.auth_type.clone(),
            ENV_BEARER_TOKEN => settings.bearer_token.clone(),
            ENV_TIMEOUT => Some(timeout.clone()),
            _ => None,
        };

        let client = ClientConfig::from_lookup(lookup).context("Invalid client configuration")?;

        Ok(Self { client })
    }

    /// Build an API client for this configuration
    pub fn api_client(&self) -> Result<TektonPipelineClient> {
        TektonPipelineClient::from_config(&self.client).context("Invalid client configuration")
    }
}
